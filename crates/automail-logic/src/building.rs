//! Building geometry: how many floors exist and where the mailroom sits.

use serde::{Deserialize, Serialize};

use crate::item::Floor;

/// Immutable floor layout for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Number of floors.
    pub floors: u32,
    /// Number of the lowest floor.
    pub lowest_floor: Floor,
    /// Floor where robots load, return, and wait.
    pub mailroom_floor: Floor,
}

impl Building {
    pub fn new(floors: u32, lowest_floor: Floor, mailroom_floor: Floor) -> Self {
        Self {
            floors,
            lowest_floor,
            mailroom_floor,
        }
    }

    /// Highest floor number (inclusive), or `None` if it does not fit in a
    /// [`Floor`].
    pub fn checked_top_floor(&self) -> Option<Floor> {
        let floors = Floor::try_from(self.floors).ok()?;
        self.lowest_floor.checked_add(floors - 1)
    }

    /// Highest floor number (inclusive), saturating at `Floor::MAX`.
    pub fn top_floor(&self) -> Floor {
        self.checked_top_floor().unwrap_or(Floor::MAX)
    }

    /// Whether `floor` exists in this building.
    pub fn contains(&self, floor: Floor) -> bool {
        let offset = i64::from(floor) - i64::from(self.lowest_floor);
        self.floors > 0 && offset >= 0 && offset < i64::from(self.floors)
    }
}

impl Default for Building {
    fn default() -> Self {
        Self::new(14, 1, 1)
    }
}
