//! Nodal solver for the unbalanced four-wire network.
//!
//! The installation is reduced to a fixed 4×4 complex system `Z · I = V`
//! where:
//! - I holds the three phase currents and the grounded-load current
//! - Z encodes the node equations at the three phase nodes and the load node
//! - V holds the balanced source phasors and a zero reference entry
//!
//! The matrix structure is:
//! ```text
//! [ Za+2Zf   Zf      Zf      Za       ] [ Ia ]   [ Va ]
//! [ Zf       Zb+2Zf  Zf      0        ] [ Ib ] = [ Vb ]
//! [ Zf       Zf      Zc+2Zf  -Zc      ] [ Ic ]   [ Vc ]
//! [ Za       0       -Zc     Zl+Zb+Zc ] [ Il ]   [ 0  ]
//! ```
//!
//! The system is solved directly by LU decomposition with partial
//! pivoting. Neutral current, neutral voltage drop, load voltage and
//! per-phase voltages are derived from the solved currents.

mod matrix;
mod network;

pub use matrix::{LuFactors, SystemMatrix, LOAD_INDEX, SYSTEM_SIZE};
pub use network::{
    load_voltage, neutral_current, neutral_voltage_drop, phase_voltages, CurrentVector,
    DerivedQuantities, NetworkConfig, NetworkSolution, NetworkSolver,
};

/// Default RMS phase-to-neutral voltage (volts).
pub const DEFAULT_PHASE_VOLTAGE: f64 = 127.0;

/// Default neutral conductor impedance as (resistance, reactance) in ohms.
pub const DEFAULT_NEUTRAL_IMPEDANCE: (f64, f64) = (0.086, 0.38);

/// Default grounded water-heater resistance (ohms).
pub const DEFAULT_LOAD_IMPEDANCE: f64 = 12.1;

/// Relative pivot magnitude below which the matrix is treated as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-12;
