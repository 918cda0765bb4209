//! Simulation constants shared by the allocator, the robots, and the harness.
//!
//! These are fixed for every run; anything a building or scenario may vary
//! lives in [`crate::config::SimConfig`] instead.

/// Heaviest single item any robot slot will accept.
pub const INDIVIDUAL_MAX_WEIGHT: u32 = 2000;

/// Ticks a caution-capable robot spends wrapping a fragile item before it leaves.
pub const WRAP_TIME: u32 = 2;

/// Nominal ticks charged for unwrapping a fragile item at its destination.
///
/// Only accounted in statistics. The unwrap itself finishes on the tick after
/// arrival.
pub const UNWRAP_TIME: u32 = 1;

/// Upper bound on items one caution-mode load may hand a single robot.
pub const MAX_ITEMS_PER_LOAD: usize = 3;

/// Per-trip drop-off ceilings by robot variant.
pub mod delivery_ceilings {
    /// Hand + tube.
    pub const BASIC: u32 = 2;
    /// Hand + tube + special hand.
    pub const CAUTION: u32 = 3;
}

/// Scoring parameters applied by the delivery ledger.
pub mod scoring {
    /// Exponent applied to each item's time-in-system.
    pub const DELIVERY_PENALTY: f64 = 1.2;
    /// Priority weight of ordinary mail (no priority classes are generated).
    pub const PRIORITY_WEIGHT: f64 = 0.0;
}
