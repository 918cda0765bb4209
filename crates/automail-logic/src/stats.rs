//! Delivery statistics.
//!
//! Each robot keeps its own [`RobotStats`]; the harness folds them into a
//! [`FleetStatistics`] after the run.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Per-robot delivery tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotStats {
    /// Items dropped off from the hand.
    pub normal_delivered: u32,
    /// Total weight of hand drop-offs.
    pub normal_weight: u64,
    /// Fragile items dropped off from the special hand.
    pub caution_delivered: u32,
    /// Total weight of fragile drop-offs.
    pub caution_weight: u64,
    /// Ticks charged to wrapping and unwrapping.
    pub wrap_unwrap_time: u32,
}

impl RobotStats {
    pub fn record_normal(&mut self, weight: u32) {
        self.normal_delivered += 1;
        self.normal_weight += u64::from(weight);
    }

    pub fn record_caution(&mut self, weight: u32) {
        self.caution_delivered += 1;
        self.caution_weight += u64::from(weight);
    }

    pub fn total_delivered(&self) -> u32 {
        self.normal_delivered + self.caution_delivered
    }
}

impl Add for RobotStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            normal_delivered: self.normal_delivered + rhs.normal_delivered,
            normal_weight: self.normal_weight + rhs.normal_weight,
            caution_delivered: self.caution_delivered + rhs.caution_delivered,
            caution_weight: self.caution_weight + rhs.caution_weight,
            wrap_unwrap_time: self.wrap_unwrap_time + rhs.wrap_unwrap_time,
        }
    }
}

impl AddAssign for RobotStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for RobotStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Fleet-wide totals, as printed at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetStatistics {
    pub robots: usize,
    pub totals: RobotStats,
}

impl FleetStatistics {
    pub fn aggregate<'a>(stats: impl IntoIterator<Item = &'a RobotStats>) -> Self {
        let mut robots = 0;
        let mut totals = RobotStats::default();
        for s in stats {
            robots += 1;
            totals += *s;
        }
        Self { robots, totals }
    }

    /// Human-readable report lines.
    pub fn report_lines(&self) -> Vec<String> {
        let t = &self.totals;
        vec![
            format!("The number of packages delivered normally: {}", t.normal_delivered),
            format!("The number of packages delivered using caution: {}", t.caution_delivered),
            format!("The total weight of the packages delivered normally: {}", t.normal_weight),
            format!(
                "The total weight of the packages delivered using caution: {}",
                t.caution_weight
            ),
            format!(
                "The total amount of time spent by the special arms wrapping & unwrapping items: {}",
                t.wrap_unwrap_time
            ),
        ]
    }
}
