//! Fleet orchestration: one pool, many robots, a fixed step order.

use crate::building::Building;
use crate::delivery::DeliverySink;
use crate::error::Result;
use crate::item::Tick;
use crate::pool::{AllocationMode, Pool};
use crate::robot::{Robot, RobotKind, Roster};
use crate::stats::FleetStatistics;

/// The mail pool plus every robot it serves.
#[derive(Debug, Clone)]
pub struct Automail {
    pool: Pool,
    robots: Vec<Robot>,
}

impl Automail {
    pub fn new(robots: usize, kind: RobotKind, mode: AllocationMode, building: &Building) -> Self {
        Self {
            pool: Pool::new(mode),
            robots: (0..robots)
                .map(|id| Robot::new(id, kind, building))
                .collect(),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut Pool {
        &mut self.pool
    }

    /// Robots in step order.
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    /// Allocate, then step every robot in index order.
    ///
    /// Each robot sees its peers as they are at that moment, so robots later
    /// in the order observe moves made earlier in the same tick.
    pub fn tick(&mut self, now: Tick, sink: &mut dyn DeliverySink) -> Result<()> {
        self.pool.allocate_step(&mut self.robots)?;
        for index in 0..self.robots.len() {
            let (before, rest) = self.robots.split_at_mut(index);
            let Some((robot, after)) = rest.split_first_mut() else {
                break;
            };
            robot.step(now, Roster::new(before, after), &mut self.pool, sink)?;
        }
        Ok(())
    }

    pub fn statistics(&self) -> FleetStatistics {
        FleetStatistics::aggregate(self.robots.iter().map(Robot::stats))
    }
}
