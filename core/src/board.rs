use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// The full grid of cells, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    revealed_safe: CellCount,
}

impl Board {
    /// Builds a board with hazards scattered by `rng`.
    pub fn generate<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        Self::from_hazard_mask(scatter_hazards(config, rng))
    }

    pub fn with_generator<G: HazardGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Self::from_hazard_mask(generator.generate(config))
    }

    /// Takes a `(rows, cols)` mask of hazard positions.
    pub fn from_hazard_mask(mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mask.dim();
        let hazards = mask.iter().filter(|&&hazard| hazard).count();
        let config = GameConfig::new_unchecked(
            Coord::try_from(cols).unwrap_or(0),
            Coord::try_from(rows).unwrap_or(0),
            CellCount::try_from(hazards).unwrap_or(CellCount::MAX),
        );
        config.validate()?;

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            Cell::new(row as Coord, col as Coord, mask[[row, col]])
        });
        log::debug!(
            "Built {}x{} board with {} hazards",
            config.width,
            config.height,
            config.hazards
        );

        Ok(Self {
            config,
            cells,
            revealed_safe: 0,
        })
    }

    /// Duplicate coordinates count once.
    pub fn from_hazard_coords(width: Coord, height: Coord, hazards: &[Coord2]) -> Result<Self> {
        GameConfig::new_unchecked(width, height, 0).validate()?;
        let mut mask: Array2<bool> = Array2::default((height, width).to_nd_index());

        for &(row, col) in hazards {
            if row >= height || col >= width {
                return Err(GameError::InvalidCoords);
            }
            mask[(row, col).to_nd_index()] = true;
        }

        Self::from_hazard_mask(mask)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn hazard_count(&self) -> CellCount {
        self.config.hazards
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.config.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors_of(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter_neighbors(coords)
            .map(|pos| &self.cells[pos.to_nd_index()])
    }

    /// Counts hazards among all eight neighbors, whatever their cover.
    pub fn hazard_neighbor_count(&self, coords: Coord2) -> u8 {
        self.neighbors_of(coords)
            .filter(|cell| cell.is_hazard())
            .count() as u8
    }

    /// Number shown on a revealed safe cell, `None` while hidden or on a hazard.
    pub fn label(&self, coords: Coord2) -> Option<u8> {
        let cell = self.cell(coords)?;
        (!cell.is_hidden() && !cell.is_hazard()).then(|| self.hazard_neighbor_count(coords))
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let outcome = self.cells[coords.to_nd_index()].toggle_flag();
        log::trace!("Toggle flag at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Reveals a hidden cell, flooding outwards while no hidden neighbor is a
    /// hazard. Every newly revealed position is appended to `changed`.
    ///
    /// A hazard is revealed on its own and never floods; deciding the game
    /// outcome is left to the caller.
    pub fn reveal(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_hazard() {
            self.uncover(coords, changed);
            log::trace!("Revealed hazard at {:?}", coords);
            return Ok(RevealOutcome::HitHazard);
        }

        self.uncover(coords, changed);
        log::trace!(
            "Revealed cell at {:?}, label: {}",
            coords,
            self.hazard_neighbor_count(coords)
        );

        // cells are uncovered before being pushed, so each is visited once
        let mut pending = vec![coords];
        while let Some(pos) = pending.pop() {
            let hidden: SmallVec<[Coord2; 8]> = self
                .cells
                .iter_neighbors(pos)
                .filter(|&next| self.cells[next.to_nd_index()].is_hidden())
                .collect();

            if hidden
                .iter()
                .any(|&next| self.cells[next.to_nd_index()].is_hazard())
            {
                continue;
            }

            for next in hidden {
                if self.uncover(next, changed) {
                    log::trace!("Flood revealed cell at {:?}", next);
                    pending.push(next);
                }
            }
        }

        Ok(RevealOutcome::Revealed)
    }

    /// True once every non-hazard cell is revealed.
    pub fn win_condition(&self) -> bool {
        self.revealed_safe + self.config.hazards == self.config.total_cells()
    }

    pub fn all_hazards(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_hazard())
    }

    /// Uncovers every hazard still hidden.
    pub fn reveal_hazards(&mut self, changed: &mut Vec<Coord2>) {
        let hazards: Vec<Coord2> = self.all_hazards().map(Cell::coords).collect();
        for coords in hazards {
            self.uncover(coords, changed);
        }
    }

    /// Uncovers every cell still hidden, hazards included.
    pub fn reveal_all(&mut self, changed: &mut Vec<Coord2>) {
        let hidden: Vec<Coord2> = self
            .cells
            .iter()
            .filter(|cell| cell.is_hidden())
            .map(Cell::coords)
            .collect();
        for coords in hidden {
            self.uncover(coords, changed);
        }
    }

    pub fn view(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.cell(coords)?;
        let revealed = !cell.is_hidden();
        Some(CellView {
            row: cell.row(),
            col: cell.col(),
            hidden: cell.is_hidden(),
            flagged: cell.is_flagged(),
            hazard: revealed && cell.is_hazard(),
            label: self.label(coords),
            triggered: false,
        })
    }

    fn uncover(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.uncover() {
            return false;
        }
        if !cell.is_hazard() {
            self.revealed_safe += 1;
        }
        changed.push(coords);
        true
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: Coord, height: Coord, hazards: &[Coord2]) -> Board {
        Board::from_hazard_coords(width, height, hazards).unwrap()
    }

    fn revealed(board: &Board) -> usize {
        board.cells().filter(|cell| !cell.is_hidden()).count()
    }

    #[test]
    fn generate_places_distinct_hazards() {
        let config = GameConfig::default();
        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = Board::generate(config, &mut rng).unwrap();
            assert_eq!(board.all_hazards().count(), 50);
            assert_eq!(board.hazard_count(), 50);
            assert_eq!(board.cells().count(), 625);
            assert!(board.cells().all(Cell::is_hidden));
        }
    }

    #[test]
    fn generate_rejects_invalid_config() {
        let mut rng = SmallRng::seed_from_u64(0);
        let config = GameConfig::new_unchecked(3, 3, 9);
        assert!(matches!(
            Board::generate(config, &mut rng),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn cells_know_their_coordinates() {
        let board = board(4, 3, &[]);
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board[(2, 3)].coords(), (2, 3));
        assert!(board.cell((3, 0)).is_none());
        assert!(board.cell((0, 4)).is_none());
    }

    #[test]
    fn from_hazard_coords_rejects_out_of_bounds() {
        assert_eq!(
            Board::from_hazard_coords(3, 3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn from_hazard_coords_rejects_full_board() {
        assert!(matches!(
            Board::from_hazard_coords(1, 2, &[(0, 0), (1, 0)]),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn hazard_neighbor_count_uses_all_neighbors() {
        let board = board(3, 3, &[(0, 0), (0, 2), (2, 1)]);
        assert_eq!(board.hazard_neighbor_count((1, 1)), 3);
        assert_eq!(board.hazard_neighbor_count((0, 1)), 2);
        assert_eq!(board.hazard_neighbor_count((2, 2)), 1);
        assert_eq!(board.neighbors_of((1, 1)).count(), 8);
        assert_eq!(board.neighbors_of((0, 0)).count(), 3);
    }

    #[test]
    fn reveal_labelled_cell_does_not_propagate() {
        let mut board = board(3, 3, &[(0, 0)]);
        let mut changed = Vec::new();

        let outcome = board.reveal((1, 1), &mut changed).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(changed, vec![(1, 1)]);
        assert_eq!(board.label((1, 1)), Some(1));
        assert_eq!(revealed(&board), 1);
    }

    #[test]
    fn flood_fill_stops_at_labelled_boundary() {
        // hazard wall down column 2 of a 5 wide board
        let hazards = [(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)];
        let mut board = board(5, 5, &hazards);
        let mut changed = Vec::new();

        board.reveal((2, 0), &mut changed).unwrap();

        for row in 0..5 {
            assert!(!board[(row, 0)].is_hidden());
            assert!(!board[(row, 1)].is_hidden());
            assert_eq!(board.label((row, 0)), Some(0));
            assert!(board.label((row, 1)).unwrap() > 0);
            assert!(board[(row, 3)].is_hidden());
            assert!(board[(row, 4)].is_hidden());
        }
        assert_eq!(changed.len(), 10);
        assert!(!board.win_condition());
    }

    #[test]
    fn reveal_already_revealed_cell_is_no_change() {
        let mut board = board(3, 3, &[(2, 2)]);
        let mut changed = Vec::new();
        board.reveal((1, 1), &mut changed).unwrap();
        changed.clear();

        assert_eq!(board.reveal((1, 1), &mut changed).unwrap(), RevealOutcome::NoChange);
        assert!(changed.is_empty());
    }

    #[test]
    fn reveal_hazard_directly_does_not_flood() {
        let mut board = board(3, 3, &[(0, 0)]);
        let mut changed = Vec::new();

        let outcome = board.reveal((0, 0), &mut changed).unwrap();

        assert_eq!(outcome, RevealOutcome::HitHazard);
        assert_eq!(changed, vec![(0, 0)]);
        assert_eq!(board.label((0, 0)), None);
        assert!(!board.win_condition());
    }

    #[test]
    fn reveal_out_of_bounds_errors() {
        let mut board = board(3, 3, &[]);
        let mut changed = Vec::new();
        assert_eq!(board.reveal((3, 1), &mut changed), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flood_fill_reveals_flagged_safe_cells() {
        let mut board = board(4, 1, &[(0, 3)]);
        board.toggle_flag((0, 1)).unwrap();
        let mut changed = Vec::new();

        board.reveal((0, 0), &mut changed).unwrap();

        assert!(!board[(0, 1)].is_hidden());
        assert!(!board[(0, 1)].is_flagged());
        assert_eq!(board.label((0, 2)), Some(1));
        assert!(board.win_condition());
    }

    #[test]
    fn win_condition_needs_every_safe_cell() {
        let mut board = board(2, 1, &[(0, 0)]);
        assert!(!board.win_condition());
        let mut changed = Vec::new();
        board.reveal((0, 1), &mut changed).unwrap();
        assert!(board.win_condition());
    }

    #[test]
    fn large_open_board_floods_without_recursion() {
        let mut board = board(Coord::MAX, Coord::MAX, &[]);
        let mut changed = Vec::new();

        board.reveal((127, 127), &mut changed).unwrap();

        assert_eq!(changed.len(), usize::from(board.total_cells()));
        assert!(board.win_condition());
    }

    #[test]
    fn reveal_hazards_touches_each_hazard_once() {
        let mut board = board(4, 4, &[(0, 0), (3, 3), (1, 2)]);
        let mut changed = Vec::new();

        board.reveal_hazards(&mut changed);
        board.reveal_hazards(&mut changed);

        assert_eq!(changed.len(), 3);
        assert!(board.all_hazards().all(|cell| !cell.is_hidden()));
        assert_eq!(revealed(&board), 3);
    }

    #[test]
    fn reveal_all_uncovers_remaining_cells() {
        let mut board = board(3, 3, &[(1, 1)]);
        let mut changed = Vec::new();
        board.reveal((0, 0), &mut changed).unwrap();
        changed.clear();

        board.reveal_all(&mut changed);

        assert_eq!(changed.len(), 8);
        assert_eq!(revealed(&board), 9);
    }

    #[test]
    fn view_hides_hazard_until_revealed() {
        let mut board = board(2, 2, &[(0, 0)]);
        let hidden = board.view((0, 0)).unwrap();
        assert!(hidden.hidden);
        assert!(!hidden.hazard);
        assert_eq!(hidden.label, None);

        board.reveal_hazards(&mut Vec::new());
        let shown = board.view((0, 0)).unwrap();
        assert!(!shown.hidden);
        assert!(shown.hazard);
        assert_eq!(shown.label, None);
    }
}
