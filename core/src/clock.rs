use core::fmt;
use serde::{Deserialize, Serialize};

/// Elapsed-seconds counter advanced by an external once-per-second driver.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    elapsed: u32,
    ticking: bool,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            elapsed: 0,
            ticking: false,
        }
    }

    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub const fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Returns `true` only when this call started the clock.
    pub fn start(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn stop(&mut self) {
        self.ticking = false;
    }

    pub fn reset(&mut self) {
        self.ticking = false;
        self.elapsed = 0;
    }

    /// Ticks while stopped are dropped.
    pub fn tick(&mut self) -> u32 {
        if self.ticking {
            self.elapsed = self.elapsed.saturating_add(1);
        }
        self.elapsed
    }
}

/// Zero-padded to at least three digits.
impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.elapsed)
    }
}
