//! Simulation clock. Owned by the driver; the core only reads it.

use serde::{Deserialize, Serialize};

use crate::item::Tick;

/// Monotonically increasing tick counter, starting at tick 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    now: Tick,
}

impl Clock {
    pub fn new() -> Self {
        Self { now: 1 }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        self.now += 1;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
