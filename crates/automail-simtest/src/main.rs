//! Automail Headless Simulation Harness
//!
//! Runs one configured building to completion and prints the final
//! delivery time and score. Fatal delivery errors end the run with a
//! non-zero exit status.
//!
//! Usage:
//!   cargo run -p automail-simtest
//!   cargo run -p automail-simtest -- --config data/automail.json --seed 30006
//!   cargo run -p automail-simtest -- --verbose

use std::path::PathBuf;

use anyhow::{Context, Result};
use automail_logic::config::SimConfig;
use automail_logic::simulation::{Simulation, SimulationReport};
use clap::Parser;
use tracing_subscriber::EnvFilter;

// ── Default configuration (same JSON shipped under data/) ──────────────
const DEFAULT_CONFIG_JSON: &str = include_str!("../../../data/automail.json");

// ── Command line ────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "automail-simtest")]
#[command(about = "Run the Automail mail-delivery simulation to completion")]
struct Args {
    /// Configuration file (JSON). Defaults to the bundled configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Print fleet statistics after the run, overriding the configuration
    #[arg(long)]
    statistics: bool,

    /// Log every robot transition
    #[arg(long, short)]
    verbose: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn load_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimConfig::from_json_str(DEFAULT_CONFIG_JSON)
                .context("parsing bundled configuration")?,
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.statistics |= self.statistics;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

// ── Entry point ─────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.load_config()?;
    println!("=== Automail Simulation ===\n");
    print_config(&config);

    let statistics = config.statistics;
    let mut simulation = Simulation::new(config)?;
    let report = match simulation.run() {
        Ok(report) => report,
        Err(err) => {
            log::error!("T: {} | {}", simulation.now(), err);
            println!("Simulation unable to complete.");
            std::process::exit(1);
        }
    };

    print_report(&report, statistics);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

// ── Output ──────────────────────────────────────────────────────────────

fn print_config(config: &SimConfig) {
    let seed = config
        .seed
        .map_or_else(|| "random".to_string(), |s| s.to_string());
    println!("Seed: {}", seed);
    println!("Floors: {}", config.floors);
    println!("Fragile enabled: {}", config.fragile);
    println!("Caution enabled: {}", config.caution);
    println!("Mail_to_Create: {}", config.mail_to_create);
    println!("Last_Delivery_Time: {}", config.last_delivery_time);
    println!("Robots: {}", config.robots);
    println!();
}

fn print_report(report: &SimulationReport, statistics: bool) {
    println!("Final Delivery time: {}", report.final_time);
    println!("Final Score: {:.2}", report.score);
    if statistics {
        println!();
        for line in report.statistics.report_lines() {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_is_valid() {
        let config = SimConfig::from_json_str(DEFAULT_CONFIG_JSON).unwrap();
        assert!(config.validated().is_ok());
    }

    #[test]
    fn defaults_use_bundled_config() {
        let args = Args::try_parse_from(["automail-simtest"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.verbose && !args.json);
        let config = args.load_config().unwrap();
        assert_eq!(config, SimConfig::from_json_str(DEFAULT_CONFIG_JSON).unwrap());
    }

    #[test]
    fn seed_flag_overrides_config() {
        let args = Args::try_parse_from(["automail-simtest", "--seed", "30006", "--statistics"])
            .unwrap();
        let config = args.load_config().unwrap();
        assert_eq!(config.seed, Some(30006));
        assert!(config.statistics);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args =
            Args::try_parse_from(["automail-simtest", "-c", "/nonexistent/automail.json"]).unwrap();
        let err = args.load_config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/automail.json"));
    }

    #[test]
    fn seed_must_be_a_number() {
        assert!(Args::try_parse_from(["automail-simtest", "--seed", "abc"]).is_err());
    }

    #[test]
    fn bundled_run_completes() {
        let config = SimConfig {
            seed: Some(1),
            ..SimConfig::from_json_str(DEFAULT_CONFIG_JSON).unwrap()
        };
        let report = Simulation::new(config.clone()).unwrap().run().unwrap();
        assert_eq!(report.delivered, config.mail_to_create);
        assert!(report.final_time > 1);
    }
}
