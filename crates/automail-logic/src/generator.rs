//! Mail generator.
//!
//! All mail for a run is generated up front, then released into the pool
//! tick by tick as each item's arrival time comes up.

use rand::Rng;

use crate::building::Building;
use crate::config::SimConfig;
use crate::item::{Item, Tick};
use crate::pool::Pool;

#[derive(Debug, Clone)]
pub struct MailGenerator {
    /// Not-yet-arrived items, sorted by arrival then id.
    scheduled: Vec<Item>,
    next: usize,
}

impl MailGenerator {
    pub fn new(config: &SimConfig, building: &Building, rng: &mut impl Rng) -> Self {
        let mut scheduled: Vec<Item> = (0..config.mail_to_create as u64)
            .map(|id| {
                let destination = rng.gen_range(building.lowest_floor..=building.top_floor());
                let arrival = rng.gen_range(1..=config.last_delivery_time);
                let weight = rng.gen_range(0..=config.mail_max_weight);
                let fragile = config.fragile && rng.gen_ratio(1, config.fragile_one_in.max(1));
                Item::new(id, destination, weight, fragile, arrival)
            })
            .collect();
        scheduled.sort_by_key(|item| (item.arrival(), item.id()));
        Self { scheduled, next: 0 }
    }

    /// Build a generator from a fixed list of items.
    pub fn from_items(mut items: Vec<Item>) -> Self {
        items.sort_by_key(|item| (item.arrival(), item.id()));
        Self {
            scheduled: items,
            next: 0,
        }
    }

    /// Total items this generator will produce.
    pub fn mail_to_create(&self) -> usize {
        self.scheduled.len()
    }

    /// Items still waiting for their arrival tick.
    pub fn remaining(&self) -> usize {
        self.scheduled.len() - self.next
    }

    /// Release every item arriving at or before `now` into the pool.
    /// Returns how many were released.
    pub fn step(&mut self, now: Tick, pool: &mut Pool) -> usize {
        let start = self.next;
        while let Some(item) = self.scheduled.get(self.next) {
            if item.arrival() > now {
                break;
            }
            log::debug!("T: {:3} > new addToPool [{}]", now, item);
            pool.add_item(item.clone());
            self.next += 1;
        }
        self.next - start
    }
}
