use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Purely random placement seeded from a `u64`, with no safe start cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomHazardGenerator {
    seed: u64,
}

impl RandomHazardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl HazardGenerator for RandomHazardGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        scatter_hazards(config, &mut rng)
    }
}

/// Draws `config.hazards` distinct cells, each draw uniform over the cells
/// not picked yet.
pub fn scatter_hazards<R: Rng>(config: GameConfig, rng: &mut R) -> Array2<bool> {
    let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());
    let width = usize::from(config.width);
    let mut candidates: Vec<usize> = (0..usize::from(config.total_cells())).collect();

    for _ in 0..config.hazards {
        if candidates.is_empty() {
            log::warn!("Ran out of candidate cells, board only fits {}", config.total_cells());
            break;
        }
        let pick = rng.random_range(0..candidates.len());
        let index = candidates.swap_remove(pick);
        mask[[index / width, index % width]] = true;
    }

    mask
}
