//! Whole-run driver: generator, allocator, robots, and clock in lock-step.
//!
//! ```
//! use automail_logic::config::SimConfig;
//! use automail_logic::simulation::Simulation;
//!
//! let config = SimConfig {
//!     mail_to_create: 10,
//!     seed: Some(1),
//!     ..SimConfig::default()
//! };
//! let report = Simulation::new(config).unwrap().run().unwrap();
//! assert_eq!(report.delivered, 10);
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::building::Building;
use crate::clock::Clock;
use crate::config::{InvalidConfig, SimConfig};
use crate::delivery::DeliveryLedger;
use crate::error::Result;
use crate::fleet::Automail;
use crate::generator::MailGenerator;
use crate::item::Tick;
use crate::stats::FleetStatistics;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Tick at which the last item had been delivered.
    pub final_time: Tick,
    /// Accumulated delivery score. Lower is better.
    pub score: f64,
    pub delivered: usize,
    pub statistics: FleetStatistics,
}

#[derive(Debug)]
pub struct Simulation {
    building: Building,
    clock: Clock,
    generator: MailGenerator,
    automail: Automail,
    ledger: DeliveryLedger,
}

impl Simulation {
    /// Validate `config` and set up a fresh run.
    pub fn new(config: SimConfig) -> std::result::Result<Self, InvalidConfig> {
        let config = config.validated()?;
        let building = config.building();
        let generator = match config.seed {
            Some(seed) => MailGenerator::new(&config, &building, &mut StdRng::seed_from_u64(seed)),
            None => MailGenerator::new(&config, &building, &mut StdRng::from_entropy()),
        };
        let automail = Automail::new(config.robots, config.robot_kind(), config.mode(), &building);
        Ok(Self::with_parts(building, generator, automail))
    }

    /// Assemble a run from prepared parts (scripted mail, custom fleets).
    pub fn with_parts(building: Building, generator: MailGenerator, automail: Automail) -> Self {
        Self {
            building,
            clock: Clock::new(),
            generator,
            automail,
            ledger: DeliveryLedger::new(),
        }
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn automail(&self) -> &Automail {
        &self.automail
    }

    pub fn ledger(&self) -> &DeliveryLedger {
        &self.ledger
    }

    /// Whether every generated item has been delivered.
    pub fn is_complete(&self) -> bool {
        self.ledger.delivered_count() >= self.generator.mail_to_create()
    }

    /// One tick: release arrivals, allocate, step robots, advance the clock.
    pub fn tick(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.generator.step(now, self.automail.pool_mut());
        self.automail.tick(now, &mut self.ledger)?;
        self.clock.tick();
        Ok(())
    }

    /// Tick until every item is delivered.
    pub fn run(&mut self) -> Result<SimulationReport> {
        while !self.is_complete() {
            self.tick()?;
        }
        log::info!("T: {} | Simulation complete!", self.clock.now());
        Ok(self.report())
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            final_time: self.clock.now(),
            score: self.ledger.score(),
            delivered: self.ledger.delivered_count(),
            statistics: self.automail.statistics(),
        }
    }
}
