//! Pure simulation logic for Automail.
//!
//! A fleet of robots carries mail from a mailroom to the floors of a
//! building. This crate holds everything that decides *what happens*: the
//! mail pool and its allocator, the robot delivery state machine, and the
//! lock-step driver around them. It does no I/O beyond the `log` facade, so
//! the harness, tests, and any future front end share one implementation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`building`] | Floor range and mailroom location |
//! | [`clock`] | Tick counter owned by the driver |
//! | [`config`] | Run configuration, JSON loading, validation |
//! | [`constants`] | Weight limit, wrap/unwrap times, delivery ceilings, scoring |
//! | [`delivery`] | Delivery sink trait, duplicate-rejecting ledger, scoring |
//! | [`error`] | Fatal simulation errors |
//! | [`fleet`] | Pool + robots, one tick in fixed robot order |
//! | [`generator`] | Up-front mail generation, released on arrival |
//! | [`item`] | Mail items, ticks, floors |
//! | [`pool`] | Pending mail ordering and the allocator |
//! | [`robot`] | Robot slots and delivery state machine |
//! | [`simulation`] | Whole-run loop and final report |
//! | [`stats`] | Per-robot and fleet delivery statistics |

pub mod building;
pub mod clock;
pub mod config;
pub mod constants;
pub mod delivery;
pub mod error;
pub mod fleet;
pub mod generator;
pub mod item;
pub mod pool;
pub mod robot;
pub mod simulation;
pub mod stats;

pub use error::{AutomailError, Result};
