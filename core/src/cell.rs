use serde::{Deserialize, Serialize};

use crate::*;

/// What the player currently sees on top of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for Cover {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A single grid unit. Position and hazard are fixed at creation, only the
/// cover changes, and once revealed it stays revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    hazard: bool,
    cover: Cover,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord, hazard: bool) -> Self {
        Self {
            row,
            col,
            hazard,
            cover: Cover::Hidden,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn cover(&self) -> Cover {
        self.cover
    }

    pub const fn is_hazard(&self) -> bool {
        self.hazard
    }

    /// Flagged cells count as hidden.
    pub const fn is_hidden(&self) -> bool {
        matches!(self.cover, Cover::Hidden | Cover::Flagged)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }

    /// Flips the flag of a hidden cell, revealed cells are left untouched.
    pub fn toggle_flag(&mut self) -> MarkOutcome {
        match self.cover {
            Cover::Hidden => {
                self.cover = Cover::Flagged;
                MarkOutcome::Changed
            }
            Cover::Flagged => {
                self.cover = Cover::Hidden;
                MarkOutcome::Changed
            }
            Cover::Revealed => MarkOutcome::NoChange,
        }
    }

    pub(crate) fn set_hazard(&mut self) {
        self.hazard = true;
    }

    /// Returns `false` when the cell was already revealed. Clears any flag.
    pub(crate) fn uncover(&mut self) -> bool {
        if self.is_hidden() {
            self.cover = Cover::Revealed;
            true
        } else {
            false
        }
    }
}

/// Player-facing view of a cell, handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: Coord,
    pub col: Coord,
    pub hidden: bool,
    pub flagged: bool,
    /// Only set once the cell has been revealed.
    pub hazard: bool,
    /// Hazard neighbor count, only for revealed non-hazard cells.
    pub label: Option<u8>,
    /// The hazard that ended the game.
    pub triggered: bool,
}
