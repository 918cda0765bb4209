//! Delivery confirmation and scoring.
//!
//! Robots hand every completed item to a [`DeliverySink`] exactly once. The
//! sink is the only place that knows which items have already been delivered,
//! so duplicate detection and score bookkeeping live here rather than in the
//! robots.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::scoring::{DELIVERY_PENALTY, PRIORITY_WEIGHT};
use crate::item::{Item, ItemId, Tick};

/// What the sink made of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// First confirmation for this item; `score` was added to the total.
    Delivered { score: f64 },
    /// The item had already been confirmed. Nothing was counted.
    Duplicate,
}

impl DeliveryOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DeliveryOutcome::Duplicate)
    }
}

/// Receives items from robots as they are dropped off.
pub trait DeliverySink {
    fn deliver(&mut self, item: Item, now: Tick) -> DeliveryOutcome;
}

/// Score contribution of delivering `item` at tick `now`.
///
/// Longer time in the system costs super-linearly.
pub fn delivery_score(item: &Item, now: Tick) -> f64 {
    let waited = f64::from(now.saturating_sub(item.arrival()));
    waited.powf(DELIVERY_PENALTY) * (1.0 + PRIORITY_WEIGHT.sqrt())
}

/// The reference sink: remembers delivered ids and accumulates the score.
#[derive(Debug, Default)]
pub struct DeliveryLedger {
    delivered: HashSet<ItemId>,
    score: f64,
    duplicates: u32,
}

impl DeliveryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    pub fn is_delivered(&self, id: ItemId) -> bool {
        self.delivered.contains(&id)
    }

    /// Sum of per-item scores. Lower is better.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// How many duplicate confirmations were rejected.
    pub fn duplicates(&self) -> u32 {
        self.duplicates
    }
}

impl DeliverySink for DeliveryLedger {
    fn deliver(&mut self, item: Item, now: Tick) -> DeliveryOutcome {
        if !self.delivered.insert(item.id()) {
            self.duplicates += 1;
            log::warn!("T: {:3} > item {} already delivered [{}]", now, item.id(), item);
            return DeliveryOutcome::Duplicate;
        }
        let score = delivery_score(&item, now);
        self.score += score;
        log::info!(
            "T: {:3} > Deliv({:4}) [{}]",
            now,
            self.delivered.len(),
            item
        );
        DeliveryOutcome::Delivered { score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_grows_with_waiting_time() {
        let item = Item::new(0, 3, 100, false, 10);
        assert_eq!(delivery_score(&item, 10), 0.0);
        assert!((delivery_score(&item, 11) - 1.0).abs() < 1e-9);
        let two = delivery_score(&item, 12);
        assert!((two - 2f64.powf(1.2)).abs() < 1e-9);
    }

    #[test]
    fn duplicate_delivery_is_rejected_without_rescoring() {
        let mut ledger = DeliveryLedger::new();
        let item = Item::new(5, 2, 50, false, 1);

        let first = ledger.deliver(item.clone(), 4);
        assert!(matches!(first, DeliveryOutcome::Delivered { .. }));
        let score = ledger.score();

        let second = ledger.deliver(item, 9);
        assert!(second.is_duplicate());
        assert_eq!(ledger.delivered_count(), 1);
        assert_eq!(ledger.duplicates(), 1);
        assert_eq!(ledger.score(), score);
        assert!(ledger.is_delivered(5));
    }
}
