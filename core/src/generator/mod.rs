use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Strategy deciding which cells of a fresh board hold hazards.
pub trait HazardGenerator {
    /// Returns a `(rows, cols)` mask with exactly `config.hazards` cells set.
    fn generate(self, config: GameConfig) -> Array2<bool>;
}
