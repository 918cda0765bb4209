//! Mail items and the scalar types used to describe them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulation time in whole ticks.
pub type Tick = u32;
/// A floor number. Signed so movement math never underflows below floor 0.
pub type Floor = i32;
/// Stable identifier assigned by the generator.
pub type ItemId = u64;

/// One piece of mail. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    destination: Floor,
    weight: u32,
    fragile: bool,
    arrival: Tick,
}

impl Item {
    pub fn new(id: ItemId, destination: Floor, weight: u32, fragile: bool, arrival: Tick) -> Self {
        Self {
            id,
            destination,
            weight,
            fragile,
            arrival,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn destination(&self) -> Floor {
        self.destination
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    /// Tick at which the item entered the mailroom.
    pub fn arrival(&self) -> Tick {
        self.arrival
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mail Item:: ID: {:6} | Arrival: {:4} | Destination: {:2} | Weight: {:4}",
            self.id, self.arrival, self.destination, self.weight
        )?;
        if self.fragile {
            write!(f, " | Fragile")?;
        }
        Ok(())
    }
}
