//! Run configuration and validation.
//!
//! The harness loads a [`SimConfig`] from JSON, then [`validate_config`]
//! reports every problem at once so a bad file can be fixed in one pass.
//!
//! ```
//! use automail_logic::config::{validate_config, SimConfig};
//!
//! let config = SimConfig::from_json_str(r#"{ "robots": 2, "floors": 6 }"#).unwrap();
//! assert_eq!(config.mail_to_create, 80);
//! assert!(validate_config(&config).is_empty());
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::building::Building;
use crate::item::{Floor, Tick};
use crate::pool::AllocationMode;
use crate::robot::RobotKind;

/// Everything that varies between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fleet size.
    pub robots: usize,
    /// Number of floors in the building.
    pub floors: u32,
    /// Number of the lowest floor.
    pub lowest_floor: Floor,
    /// Floor where robots load and return.
    pub mailroom_floor: Floor,
    /// How many items the generator produces.
    pub mail_to_create: usize,
    /// Heaviest item the generator will produce.
    pub mail_max_weight: u32,
    /// Latest arrival tick for generated mail.
    pub last_delivery_time: Tick,
    /// Whether the generator produces fragile items.
    pub fragile: bool,
    /// Whether robots are caution-capable.
    pub caution: bool,
    /// Print fleet statistics after the run.
    pub statistics: bool,
    /// With `fragile` set, each item is fragile with probability 1/n.
    pub fragile_one_in: u32,
    /// RNG seed (None = seed from entropy).
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            robots: 3,
            floors: 14,
            lowest_floor: 1,
            mailroom_floor: 1,
            mail_to_create: 80,
            mail_max_weight: 2000,
            last_delivery_time: 100,
            fragile: false,
            caution: false,
            statistics: false,
            fragile_one_in: 10,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read, parse, and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        config.validated().map_err(LoadConfigError::Invalid)
    }

    /// Return the config unchanged if it passes [`validate_config`].
    pub fn validated(self) -> Result<Self, InvalidConfig> {
        let errors = validate_config(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(InvalidConfig(errors))
        }
    }

    pub fn building(&self) -> Building {
        Building::new(self.floors, self.lowest_floor, self.mailroom_floor)
    }

    pub fn mode(&self) -> AllocationMode {
        AllocationMode::from_flags(self.fragile, self.caution)
    }

    pub fn robot_kind(&self) -> RobotKind {
        if self.caution {
            RobotKind::Caution
        } else {
            RobotKind::Basic
        }
    }
}

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// At least one robot is required.
    NoRobots,
    /// The building needs at least one floor.
    NoFloors,
    /// The top floor number would not fit in a [`Floor`].
    TooManyFloors { floors: u32, lowest: Floor },
    /// Mailroom is outside the building.
    MailroomOutOfRange { mailroom: Floor, lowest: Floor, top: Floor },
    /// Nothing to deliver.
    NoMail,
    /// Arrivals must fall on a tick ≥ 1.
    InvalidLastDeliveryTime(Tick),
    /// Fragile probability denominator must be positive.
    InvalidFragileRate(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoRobots => write!(f, "robots must be at least 1"),
            ConfigError::NoFloors => write!(f, "floors must be at least 1"),
            ConfigError::TooManyFloors { floors, lowest } => write!(
                f,
                "{} floors starting at floor {} overflow the highest floor number",
                floors, lowest
            ),
            ConfigError::MailroomOutOfRange {
                mailroom,
                lowest,
                top,
            } => write!(
                f,
                "mailroom floor {} outside building floors {}..={}",
                mailroom, lowest, top
            ),
            ConfigError::NoMail => write!(f, "mail_to_create must be at least 1"),
            ConfigError::InvalidLastDeliveryTime(t) => {
                write!(f, "last_delivery_time must be at least 1, got {}", t)
            }
            ConfigError::InvalidFragileRate(n) => {
                write!(f, "fragile_one_in must be at least 1, got {}", n)
            }
        }
    }
}

/// Every problem found in one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {}", join(.0))]
pub struct InvalidConfig(pub Vec<ConfigError>);

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(InvalidConfig),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.robots == 0 {
        errors.push(ConfigError::NoRobots);
    }
    if config.floors == 0 {
        errors.push(ConfigError::NoFloors);
    } else {
        let building = config.building();
        match building.checked_top_floor() {
            None => errors.push(ConfigError::TooManyFloors {
                floors: config.floors,
                lowest: config.lowest_floor,
            }),
            Some(top) if !building.contains(config.mailroom_floor) => {
                errors.push(ConfigError::MailroomOutOfRange {
                    mailroom: config.mailroom_floor,
                    lowest: building.lowest_floor,
                    top,
                });
            }
            Some(_) => {}
        }
    }
    if config.mail_to_create == 0 {
        errors.push(ConfigError::NoMail);
    }
    if config.last_delivery_time == 0 {
        errors.push(ConfigError::InvalidLastDeliveryTime(config.last_delivery_time));
    }
    if config.fragile && config.fragile_one_in == 0 {
        errors.push(ConfigError::InvalidFragileRate(config.fragile_one_in));
    }

    errors
}
