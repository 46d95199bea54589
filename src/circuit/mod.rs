//! Per-phase circuit description.
//!
//! This module holds the inputs of the network solve: the phase labels,
//! the household [`Device`] records, their reduction to one equivalent
//! impedance per phase, and the balanced voltage source.

mod aggregate;
mod device;
mod source;
mod types;
mod validate;

pub use aggregate::equivalent_impedances;
pub use device::{reference_catalog, Device};
pub use source::{polar_degrees, VoltagePhasors, PHASE_ANGLES_DEG};
pub use types::*;
pub use validate::{ensure_finite, ensure_finite_complex, ensure_invertible};
