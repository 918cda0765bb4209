//! Mail pool and allocator.
//!
//! The pool buffers items waiting in the mailroom, ordered by destination
//! floor, and keeps a FIFO queue of idle robots that have registered for
//! loading. Once per tick, [`Pool::allocate_step`] walks that queue and loads
//! each robot from the front of the pending sequence.
//!
//! # Ordering
//!
//! Pending items are kept in ascending destination order, so nearer floors
//! are served first. Items with equal destinations keep their insertion order.
//!
//! # Allocation modes
//!
//! | Mode | Slots filled |
//! |------|--------------|
//! | `Simple` | hand, then tube |
//! | `Caution` | special hand (fragile), hand, tube; at most 3 items and 1 fragile per trip |
//!
//! An error from a slot aborts the whole step. Items already placed during
//! the same step stay placed; the failing item stays in the pool.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_ITEMS_PER_LOAD;
use crate::error::Result;
use crate::item::Item;
use crate::robot::{Robot, RobotId};

/// How the allocator fills robots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationMode {
    /// Hand and tube only. Used whenever caution handling is off.
    Simple,
    /// Fragile items go to the special hand. Requires caution-capable robots.
    Caution,
}

impl AllocationMode {
    /// Caution mode needs both fragile mail and caution handling enabled.
    pub fn from_flags(fragile: bool, caution: bool) -> Self {
        if fragile && caution {
            AllocationMode::Caution
        } else {
            AllocationMode::Simple
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pool {
    mode: AllocationMode,
    pending: Vec<Item>,
    idle: VecDeque<RobotId>,
}

impl Pool {
    pub fn new(mode: AllocationMode) -> Self {
        Self {
            mode,
            pending: Vec::new(),
            idle: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> AllocationMode {
        self.mode
    }

    /// Items awaiting assignment, in delivery priority order.
    pub fn pending(&self) -> &[Item] {
        &self.pending
    }

    /// Robots registered as idle, in FIFO order.
    pub fn idle_robots(&self) -> impl Iterator<Item = RobotId> + '_ {
        self.idle.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Insert an item after every pending item with the same or a nearer
    /// destination.
    pub fn add_item(&mut self, item: Item) {
        let at = self
            .pending
            .partition_point(|queued| queued.destination() <= item.destination());
        self.pending.insert(at, item);
    }

    /// Queue a robot for loading. A robot already queued is not added twice.
    pub fn register_idle(&mut self, robot: RobotId) {
        if !self.idle.contains(&robot) {
            self.idle.push_back(robot);
        }
    }

    /// Load every idle robot that can take mail, dispatching the ones that
    /// received at least one item. Returns how many robots were dispatched.
    ///
    /// `robots` is the fleet, indexed by [`RobotId`].
    pub fn allocate_step(&mut self, robots: &mut [Robot]) -> Result<usize> {
        let mut dispatched = 0;
        let mut i = 0;
        while i < self.idle.len() {
            let id = self.idle[i];
            let Some(robot) = robots.get_mut(id) else {
                debug_assert!(false, "idle queue holds unknown robot R{id}");
                i += 1;
                continue;
            };
            debug_assert!(robot.is_empty(), "idle robot R{id} is carrying mail");

            let loaded = match self.mode {
                AllocationMode::Simple => self.load_simple(robot)?,
                AllocationMode::Caution => self.load_caution(robot)?,
            };
            if loaded > 0 {
                robot.dispatch();
                self.idle.remove(i);
                dispatched += 1;
            } else {
                i += 1;
            }
        }
        Ok(dispatched)
    }

    fn load_simple(&mut self, robot: &mut Robot) -> Result<usize> {
        let mut loaded = 0;
        if let Some(front) = self.pending.first() {
            robot.add_to_hand(front.clone())?;
            self.pending.remove(0);
            loaded += 1;
        }
        if loaded > 0 {
            if let Some(front) = self.pending.first() {
                robot.add_to_tube(front.clone())?;
                self.pending.remove(0);
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    fn load_caution(&mut self, robot: &mut Robot) -> Result<usize> {
        let mut loaded = 0;
        while loaded < MAX_ITEMS_PER_LOAD {
            let Some(front) = self.pending.first() else {
                break;
            };
            if front.is_fragile() {
                // One fragile item per trip.
                if robot.special_hand().is_some() {
                    break;
                }
                robot.add_to_special_hand(front.clone())?;
            } else if robot.hand().is_none() {
                robot.add_to_hand(front.clone())?;
            } else if robot.tube().is_none() {
                robot.add_to_tube(front.clone())?;
            } else {
                break;
            }
            self.pending.remove(0);
            loaded += 1;
        }
        Ok(loaded)
    }
}
