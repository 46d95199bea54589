//! # Mains Core
//!
//! Steady-state analysis of a residential three-phase, four-wire supply.
//!
//! This library provides:
//! - Reduction of household devices to one equivalent impedance per phase
//! - A nodal solver for the unbalanced network with a shared, lossy neutral
//!   and a water heater grounded between phase A and neutral
//! - Closed-form harmonic amplitudes of a thyristor-controlled voltage as a
//!   function of firing angle
//! - A small text format for describing installations
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Phases, devices, load aggregation and the voltage source
//! - [`solver`] - System matrix assembly, LU solve and post-processing
//! - [`harmonics`] - Harmonic orders, firing angle sweeps and amplitude tables
//! - [`scenario`] - Parser for the installation description format
//! - [`report`] - Text and CSV output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! mains network scenarios/reference.mains
//! mains harmonics --orders 1,3,5,7 --points 100 --csv > harmonics.csv
//! ```
//!
//! ### Library
//!
//! ```
//! use mains_core::{harmonics::HarmonicConfig, scenario::Scenario};
//!
//! let solution = Scenario::reference().solve().unwrap();
//! assert!(solution.residual() < 1e-9);
//!
//! let table = HarmonicConfig::default().evaluate().unwrap();
//! assert_eq!(table.curves.len(), 7);
//! ```
//!
//! ## Network Model
//!
//! Each phase's devices are combined in parallel. The three phase currents
//! and the load current are the unknowns of a 4×4 complex system whose
//! right-hand side is the balanced source (0°, 120°, 240°) plus a zero
//! reference entry for the grounded load node. The system is solved once
//! by LU decomposition; neutral current and voltages are derived from the
//! result.

pub mod circuit;
pub mod error;
pub mod harmonics;
pub mod scenario;
pub mod solver;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use circuit::{Device, Phase, PhaseImpedances, PhaseValues, VoltagePhasors};
pub use error::{ErrorKind, MainsError, Result};
pub use harmonics::{HarmonicConfig, HarmonicOrder, HarmonicTable};
pub use scenario::Scenario;
pub use solver::{NetworkConfig, NetworkSolution, NetworkSolver};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmNetwork;
