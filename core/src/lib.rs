#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod error;
mod generator;
mod session;
mod types;

pub const DEFAULT_SIZE: Coord = 25;
pub const DEFAULT_HAZARDS: CellCount = 50;

/// Board dimensions and hazard count for one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub hazards: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, hazards: CellCount) -> Self {
        Self {
            width,
            height,
            hazards,
        }
    }

    pub fn new(width: Coord, height: Coord, hazards: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, hazards);
        config.validate()?;
        Ok(config)
    }

    /// Both dimensions must be positive and at least one cell must stay safe.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.hazards >= self.total_cells() {
            log::warn!(
                "Rejected configuration {}x{} with {} hazards",
                self.width,
                self.height,
                self.hazards
            );
            return Err(GameError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                hazards: self.hazards,
            });
        }
        Ok(())
    }

    /// `(rows, cols)`, the shape of the cell grid.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazards)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_SIZE, DEFAULT_HAZARDS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitHazard,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitHazard => true,
        }
    }
}
