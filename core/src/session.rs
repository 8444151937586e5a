use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Running
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    Running,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// No moves are accepted once the session is finished.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Cells touched by one action and the state the session ended up in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub cells_changed: Vec<CellView>,
    pub state: SessionState,
}

impl ActionReport {
    pub fn has_update(&self) -> bool {
        !self.cells_changed.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: Coord,
    pub height: Coord,
    /// Row-major.
    pub cells: Vec<CellView>,
    pub state: SessionState,
    pub elapsed_seconds: u32,
    pub flags_placed: CellCount,
}

/// One play-through, from a fresh board to a win or a loss.
///
/// Each session owns its board and clock; starting over means building a new
/// session, which drops everything belonging to the old one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    state: SessionState,
    clock: Clock,
    triggered_hazard: Option<Coord2>,
}

impl GameSession {
    /// Hazards are placed at random from `seed`. The first move is not
    /// guaranteed to be safe.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let board = Board::with_generator(config, RandomHazardGenerator::new(seed))?;
        log::debug!("New session {:?}, seed {}", config, seed);
        Ok(Self::from_board(board))
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
            clock: Clock::new(),
            triggered_hazard: None,
        }
    }

    /// Replaces this session with a fresh one. On error the current session is
    /// left untouched.
    pub fn restart(&mut self, config: GameConfig, seed: u64) -> Result<()> {
        *self = Self::new(config, seed)?;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed()
    }

    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn flags_placed(&self) -> CellCount {
        self.board.flagged_count()
    }

    /// Hazards minus placed flags, negative when over-flagged.
    pub fn hazards_left(&self) -> isize {
        (self.board.hazard_count() as isize) - (self.flags_placed() as isize)
    }

    /// Left click: unflags a flagged cell, loses on a hazard, otherwise
    /// reveals and checks for the win.
    pub fn primary_action(&mut self, row: Coord, col: Coord) -> ActionReport {
        let Ok(coords) = self.check_move((row, col)) else {
            return self.report(Vec::new());
        };
        self.start_timer_on_first_action();

        let cell = self.board[coords];
        let mut changed = Vec::new();

        if cell.is_flagged() {
            self.toggle_flag_at(coords, &mut changed);
        } else if cell.is_hazard() {
            self.triggered_hazard = Some(coords);
            self.board.reveal_hazards(&mut changed);
            self.finish(SessionState::Lost);
        } else {
            match self.board.reveal(coords, &mut changed) {
                Ok(outcome) => log::trace!("Reveal at {:?}: {:?}", coords, outcome),
                Err(err) => log::trace!("Reveal at {:?} ignored: {}", coords, err),
            }
            if self.board.win_condition() {
                self.board.reveal_all(&mut changed);
                self.finish(SessionState::Won);
            }
        }

        self.report(changed)
    }

    /// Right click: toggles the flag on a hidden cell. Does not start the clock.
    pub fn secondary_action(&mut self, row: Coord, col: Coord) -> ActionReport {
        let mut changed = Vec::new();
        if let Ok(coords) = self.check_move((row, col)) {
            self.toggle_flag_at(coords, &mut changed);
        }
        self.report(changed)
    }

    /// Driven once per second from outside, only counts while running.
    pub fn tick(&mut self) -> u32 {
        if self.state.is_running() {
            self.clock.tick()
        } else {
            self.clock.elapsed()
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.cells().filter_map(|cell| self.view(cell.coords())).collect(),
            state: self.state,
            elapsed_seconds: self.clock.elapsed(),
            flags_placed: self.flags_placed(),
        }
    }

    pub fn view(&self, coords: Coord2) -> Option<CellView> {
        let mut view = self.board.view(coords)?;
        view.triggered = self.triggered_hazard == Some(coords);
        Some(view)
    }

    fn check_move(&self, coords: Coord2) -> Result<Coord2> {
        if self.state.is_finished() {
            log::trace!("Ignoring move at {:?}, session is over", coords);
            return Err(GameError::AlreadyEnded);
        }
        self.board.validate_coords(coords).inspect_err(|_| {
            log::trace!("Ignoring move at {:?}, outside the board", coords);
        })
    }

    fn toggle_flag_at(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) {
        if let Ok(MarkOutcome::Changed) = self.board.toggle_flag(coords) {
            changed.push(coords);
        }
    }

    fn start_timer_on_first_action(&mut self) {
        if self.state == SessionState::NotStarted {
            log::debug!("Session started");
            self.state = SessionState::Running;
        }
        self.clock.start();
    }

    fn finish(&mut self, state: SessionState) {
        self.clock.stop();
        self.state = state;
        log::debug!(
            "Session ended {:?} after {} seconds",
            state,
            self.clock.elapsed()
        );
    }

    fn report(&self, changed: Vec<Coord2>) -> ActionReport {
        ActionReport {
            cells_changed: changed
                .into_iter()
                .filter_map(|coords| self.view(coords))
                .collect(),
            state: self.state,
        }
    }
}
