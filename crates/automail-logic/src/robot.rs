//! Robot delivery state machine.
//!
//! A robot carries up to three items: `hand` and `tube` hold ordinary mail,
//! and caution-capable robots add a `special_hand` for one fragile item.
//! Every tick the fleet calls [`Robot::step`] once per robot, in index order.
//!
//! # States
//!
//! | State | Meaning |
//! |-------|---------|
//! | `Returning` | Heading back to the mailroom (initial state) |
//! | `Waiting` | Registered with the pool, waiting to be loaded and dispatched |
//! | `Delivering` | Moving to, or dropping off at, the active item's floor |
//! | `Wrapping` | Caution only: wrapping a fragile item before leaving |
//! | `Unwrapping` | Caution only: unwrapping and handing over a fragile item |
//!
//! # Adjacency freeze
//!
//! A caution-capable robot will not move while another robot one floor above
//! or below is unwrapping, or is parked at the destination of the fragile item
//! it carries. Robots later in the step order see the already-updated state of
//! earlier robots within the same tick.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::building::Building;
use crate::constants::{delivery_ceilings, INDIVIDUAL_MAX_WEIGHT, UNWRAP_TIME, WRAP_TIME};
use crate::delivery::{DeliveryOutcome, DeliverySink};
use crate::error::{AutomailError, Result};
use crate::item::{Floor, Item, Tick};
use crate::pool::Pool;
use crate::stats::RobotStats;

/// Index of a robot in the fleet's step order.
pub type RobotId = usize;

/// Robot capability variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotKind {
    /// Hand and tube only.
    Basic,
    /// Hand, tube, and a special hand for fragile mail.
    Caution,
}

impl RobotKind {
    pub fn has_special_hand(self) -> bool {
        matches!(self, RobotKind::Caution)
    }

    /// Most drop-offs allowed between two dispatches.
    pub fn delivery_ceiling(self) -> u32 {
        match self {
            RobotKind::Basic => delivery_ceilings::BASIC,
            RobotKind::Caution => delivery_ceilings::CAUTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotState {
    Returning,
    Waiting,
    Delivering,
    Wrapping,
    Unwrapping,
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RobotState::Returning => "RETURNING",
            RobotState::Waiting => "WAITING",
            RobotState::Delivering => "DELIVERING",
            RobotState::Wrapping => "WRAPPING",
            RobotState::Unwrapping => "UNWRAPPING",
        };
        f.pad(name)
    }
}

/// Item-carrying slot on a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Hand,
    Tube,
    SpecialHand,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Hand => "hand",
            Slot::Tube => "tube",
            Slot::SpecialHand => "special hand",
        };
        f.write_str(name)
    }
}

/// Read-only view of every other robot in the fleet, split around the robot
/// currently stepping.
#[derive(Debug, Clone, Copy)]
pub struct Roster<'a> {
    before: &'a [Robot],
    after: &'a [Robot],
}

impl<'a> Roster<'a> {
    pub fn new(before: &'a [Robot], after: &'a [Robot]) -> Self {
        Self { before, after }
    }

    /// A roster with no peers (single-robot fleets, tests).
    pub fn empty() -> Self {
        Self::new(&[], &[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Robot> + 'a {
        self.before.iter().chain(self.after.iter())
    }
}

#[derive(Debug, Clone)]
pub struct Robot {
    id: RobotId,
    kind: RobotKind,
    state: RobotState,
    current_floor: Floor,
    destination_floor: Floor,
    mailroom_floor: Floor,
    received_dispatch: bool,
    hand: Option<Item>,
    tube: Option<Item>,
    special_hand: Option<Item>,
    delivery_counter: u32,
    wrap_countdown: u32,
    stats: RobotStats,
}

impl Robot {
    /// A robot parked in the mailroom, about to register with the pool.
    pub fn new(id: RobotId, kind: RobotKind, building: &Building) -> Self {
        Self {
            id,
            kind,
            state: RobotState::Returning,
            current_floor: building.mailroom_floor,
            destination_floor: building.mailroom_floor,
            mailroom_floor: building.mailroom_floor,
            received_dispatch: false,
            hand: None,
            tube: None,
            special_hand: None,
            delivery_counter: 0,
            wrap_countdown: 0,
            stats: RobotStats::default(),
        }
    }

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn kind(&self) -> RobotKind {
        self.kind
    }

    pub fn state(&self) -> RobotState {
        self.state
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn destination_floor(&self) -> Floor {
        self.destination_floor
    }

    pub fn hand(&self) -> Option<&Item> {
        self.hand.as_ref()
    }

    pub fn tube(&self) -> Option<&Item> {
        self.tube.as_ref()
    }

    pub fn special_hand(&self) -> Option<&Item> {
        self.special_hand.as_ref()
    }

    /// Drop-offs since the last dispatch.
    pub fn delivery_counter(&self) -> u32 {
        self.delivery_counter
    }

    pub fn stats(&self) -> &RobotStats {
        &self.stats
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.hand.is_none() && self.tube.is_none() && self.special_hand.is_none()
    }

    pub fn is_dispatched(&self) -> bool {
        self.received_dispatch
    }

    /// Trace label, e.g. `R0(1)` for robot 0 with a loaded tube.
    pub fn label(&self) -> String {
        format!("R{}({})", self.id, u8::from(self.tube.is_some()))
    }

    // ── Loading ─────────────────────────────────────────────────────────

    pub fn add_to_hand(&mut self, item: Item) -> Result<()> {
        debug_assert!(self.hand.is_none(), "hand already loaded");
        Self::check_ordinary(&item, Slot::Hand)?;
        self.hand = Some(item);
        Ok(())
    }

    pub fn add_to_tube(&mut self, item: Item) -> Result<()> {
        debug_assert!(self.tube.is_none(), "tube already loaded");
        Self::check_ordinary(&item, Slot::Tube)?;
        self.tube = Some(item);
        Ok(())
    }

    pub fn add_to_special_hand(&mut self, item: Item) -> Result<()> {
        debug_assert!(self.special_hand.is_none(), "special hand already loaded");
        if !self.kind.has_special_hand() {
            return Err(AutomailError::FragileItemMishandled {
                item: item.id(),
                slot: Slot::SpecialHand,
            });
        }
        check_weight(&item)?;
        self.special_hand = Some(item);
        Ok(())
    }

    fn check_ordinary(item: &Item, slot: Slot) -> Result<()> {
        if item.is_fragile() {
            return Err(AutomailError::FragileItemMishandled {
                item: item.id(),
                slot,
            });
        }
        check_weight(item)
    }

    /// Mark the robot runnable. Called by the pool once it has loaded items.
    pub fn dispatch(&mut self) {
        self.received_dispatch = true;
    }

    // ── Stepping ────────────────────────────────────────────────────────

    /// Advance the state machine by one tick.
    ///
    /// `peers` is only read, for the adjacency freeze. `pool` receives tube
    /// returns and idle registrations; `sink` receives every drop-off.
    pub fn step(
        &mut self,
        now: Tick,
        peers: Roster<'_>,
        pool: &mut Pool,
        sink: &mut dyn DeliverySink,
    ) -> Result<()> {
        match self.state {
            RobotState::Returning => {
                if self.current_floor == self.mailroom_floor {
                    if let Some(item) = self.tube.take() {
                        log::info!("T: {:3} >  +addToPool [{}]", now, item);
                        pool.add_item(item);
                    }
                    pool.register_idle(self.id);
                    self.change_state(now, RobotState::Waiting);
                } else if !self.must_freeze(peers) {
                    self.move_towards(self.mailroom_floor);
                }
            }
            RobotState::Waiting => {
                if !self.is_empty() && self.received_dispatch {
                    self.received_dispatch = false;
                    self.delivery_counter = 0;
                    self.set_route();
                    if self.special_hand.is_some() {
                        self.wrap_countdown = WRAP_TIME;
                        self.stats.wrap_unwrap_time += WRAP_TIME + UNWRAP_TIME;
                        self.change_state(now, RobotState::Wrapping);
                    } else {
                        self.change_state(now, RobotState::Delivering);
                    }
                }
            }
            RobotState::Wrapping => {
                self.wrap_countdown = self.wrap_countdown.saturating_sub(1);
                if self.wrap_countdown == 0 {
                    self.change_state(now, RobotState::Delivering);
                }
            }
            RobotState::Delivering => {
                if self.current_floor == self.destination_floor {
                    if self.special_hand.is_some() {
                        self.change_state(now, RobotState::Unwrapping);
                    } else {
                        self.drop_off_hand(now, sink)?;
                    }
                } else if !self.must_freeze(peers) {
                    self.move_towards(self.destination_floor);
                }
            }
            RobotState::Unwrapping => self.drop_off_special(now, sink)?,
        }
        Ok(())
    }

    fn drop_off_hand(&mut self, now: Tick, sink: &mut dyn DeliverySink) -> Result<()> {
        let Some(item) = self.hand.take() else {
            self.change_state(now, RobotState::Returning);
            return Ok(());
        };
        let weight = item.weight();
        if let DeliveryOutcome::Delivered { .. } = sink.deliver(item, now) {
            self.stats.record_normal(weight);
        }
        self.count_delivery()?;

        if self.tube.is_none() && self.special_hand.is_none() {
            self.change_state(now, RobotState::Returning);
        } else {
            self.hand = self.tube.take();
            self.set_route();
            self.change_state(now, RobotState::Delivering);
        }
        Ok(())
    }

    fn drop_off_special(&mut self, now: Tick, sink: &mut dyn DeliverySink) -> Result<()> {
        if let Some(item) = self.special_hand.take() {
            let weight = item.weight();
            if let DeliveryOutcome::Delivered { .. } = sink.deliver(item, now) {
                self.stats.record_caution(weight);
            }
            self.count_delivery()?;
        }

        if self.hand.is_none() {
            self.change_state(now, RobotState::Returning);
        } else {
            self.set_route();
            self.change_state(now, RobotState::Delivering);
        }
        Ok(())
    }

    fn count_delivery(&mut self) -> Result<()> {
        self.delivery_counter += 1;
        let ceiling = self.kind.delivery_ceiling();
        if self.delivery_counter > ceiling {
            return Err(AutomailError::ExcessiveDelivery {
                robot: self.id,
                delivered: self.delivery_counter,
                ceiling,
            });
        }
        Ok(())
    }

    /// Whether this robot is handling fragile mail in place: unwrapping, or
    /// parked at its fragile item's floor.
    pub fn is_handling_fragile(&self) -> bool {
        self.state == RobotState::Unwrapping
            || (self.special_hand.is_some() && self.current_floor == self.destination_floor)
    }

    /// Adjacency freeze check. Basic robots never freeze.
    pub fn must_freeze(&self, peers: Roster<'_>) -> bool {
        self.kind.has_special_hand()
            && peers.iter().any(|peer| {
                peer.is_handling_fragile() && (peer.current_floor - self.current_floor).abs() == 1
            })
    }

    /// The fragile item's floor takes priority over the hand's.
    fn set_route(&mut self) {
        if let Some(item) = self.special_hand.as_ref().or(self.hand.as_ref()) {
            self.destination_floor = item.destination();
        }
    }

    fn move_towards(&mut self, destination: Floor) {
        if self.current_floor < destination {
            self.current_floor += 1;
        } else {
            self.current_floor -= 1;
        }
    }

    fn change_state(&mut self, now: Tick, next: RobotState) {
        if self.state != next {
            log::debug!(
                "T: {:3} > {:>7} changed from {} to {}",
                now,
                self.label(),
                self.state,
                next
            );
        }
        self.state = next;
        if next == RobotState::Delivering {
            if let Some(active) = self.special_hand.as_ref().or(self.hand.as_ref()) {
                log::debug!("T: {:3} > {:>9}-> [{}]", now, self.label(), active);
            }
        }
    }
}

fn check_weight(item: &Item) -> Result<()> {
    if item.weight() > INDIVIDUAL_MAX_WEIGHT {
        return Err(AutomailError::ItemTooHeavy {
            item: item.id(),
            weight: item.weight(),
            max: INDIVIDUAL_MAX_WEIGHT,
        });
    }
    Ok(())
}
