//! Mains - residential supply calculator
//!
//! Solves the unbalanced four-wire network of an installation and sweeps
//! the harmonic content of a thyristor-controlled voltage.
//!
//! # Usage
//!
//! ```bash
//! mains network scenarios/reference.mains
//! mains harmonics --orders 1,3,5,7,9,11,13 --points 100 --csv > harmonics.csv
//! ```

use std::f64::consts::PI;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use num_complex::Complex64;
use tracing_subscriber::EnvFilter;

use mains_core::{
    error::Result,
    harmonics::{HarmonicConfig, DEFAULT_BASE_VOLTAGE, DEFAULT_SWEEP_POINTS},
    report,
    scenario::{self, parse_impedance, Scenario},
};

/// Residential three-phase supply calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the four-wire network and print currents and voltages
    Network {
        /// Scenario file (.mains); the built-in reference installation if omitted
        #[arg(value_name = "SCENARIO_FILE")]
        file: Option<PathBuf>,

        /// RMS phase-to-neutral voltage in volts
        #[arg(long)]
        voltage: Option<f64>,

        /// Neutral conductor impedance, e.g. 0.086+0.38j
        #[arg(long, value_parser = impedance_arg)]
        neutral: Option<Complex64>,

        /// Grounded load impedance, e.g. 12.1
        #[arg(long, value_parser = impedance_arg)]
        load: Option<Complex64>,
    },

    /// Sweep harmonic amplitudes over firing angle
    Harmonics {
        /// Harmonic orders, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = [1u32, 3, 5, 7, 9, 11, 13])]
        orders: Vec<u32>,

        /// Number of firing angles between 0 and 90 degrees
        #[arg(long, default_value_t = DEFAULT_SWEEP_POINTS)]
        points: usize,

        /// RMS reference voltage in volts
        #[arg(long, default_value_t = DEFAULT_BASE_VOLTAGE)]
        base_voltage: f64,

        /// Print the whole table as CSV instead of the 90 degree checkpoint
        #[arg(long)]
        csv: bool,
    },
}

fn impedance_arg(text: &str) -> std::result::Result<Complex64, String> {
    parse_impedance(text).ok_or_else(|| format!("invalid impedance '{}'", text))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Network {
            file,
            voltage,
            neutral,
            load,
        } => {
            // Load the installation
            let mut scenario = match file {
                Some(path) => scenario::parse_file(&path)?,
                None => Scenario::reference(),
            };

            // Command-line values win over file directives
            if let Some(v) = voltage {
                scenario.config = scenario.config.with_phase_voltage(v);
            }
            if let Some(z) = neutral {
                scenario.config = scenario.config.with_neutral_impedance(z);
            }
            if let Some(z) = load {
                scenario.config = scenario.config.with_load_impedance(z);
            }

            let solution = scenario.solve()?;
            report::write_network_report(&mut out, &solution)?;
        }

        Command::Harmonics {
            orders,
            points,
            base_voltage,
            csv,
        } => {
            let table = HarmonicConfig::new()
                .with_orders(orders)
                .with_points(points)
                .with_base_voltage(base_voltage)
                .evaluate()?;

            if csv {
                report::write_csv(&mut out, &table)?;
            } else {
                report::write_checkpoint(&mut out, &table, PI / 2.0)?;
            }
        }
    }

    Ok(())
}
