//! Fatal simulation errors.
//!
//! Every variant here halts a run: they indicate either mail the fleet is not
//! built to carry or a broken invariant between the allocator and the robots.
//! Duplicate deliveries are not errors; see [`crate::delivery::DeliveryOutcome`].

use thiserror::Error;

use crate::item::ItemId;
use crate::robot::{RobotId, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomailError {
    /// An item heavier than any slot allows was offered to a robot.
    #[error("item {item} too heavy: weight {weight} exceeds maximum {max}")]
    ItemTooHeavy { item: ItemId, weight: u32, max: u32 },

    /// A fragile item was offered to a slot that cannot carry fragile mail.
    #[error("fragile item {item} mishandled: cannot be placed in {slot}")]
    FragileItemMishandled { item: ItemId, slot: Slot },

    /// A robot dropped off more items in one trip than it can carry.
    #[error("robot R{robot} delivered {delivered} items in a single trip (ceiling {ceiling})")]
    ExcessiveDelivery {
        robot: RobotId,
        delivered: u32,
        ceiling: u32,
    },
}

pub type Result<T> = std::result::Result<T, AutomailError>;
