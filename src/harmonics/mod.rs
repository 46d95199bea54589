//! Harmonic content of a phase-controlled AC voltage.
//!
//! A thyristor that starts conducting at firing angle α chops each
//! half-cycle of the supply. For every harmonic order n the two Fourier
//! coefficients of the chopped waveform have closed forms:
//!
//! ```text
//! n = 1:  b = V/π · (π − α + sin(2α)/2)
//!         a = V/(2π) · (1 − cos(2α))
//!
//! n ≠ 1:  b = 2V/π · [ sin((n+1)α)/(n+1) − sin((n−1)α)/(n−1) ]
//!         a = V/π · [ (cos((1−n)π) − cos((1−n)α))/(n−1)
//!                     − (cos((n+1)α) − cos((n+1)π))/(n+1) ]
//! ```
//!
//! and the amplitude is `sqrt(a² + b²)`. Order 1 is dispatched to its own
//! formula because the general one divides by n − 1.

mod evaluator;
mod order;
mod sweep;

pub use evaluator::{
    amplitude, components, harmonic_table, FourierComponents, HarmonicCurve, HarmonicTable,
};
pub use order::HarmonicOrder;
pub use sweep::{check_angle, FiringAngleSweep};

use std::f64::consts::PI;

use crate::circuit::ensure_finite;
use crate::error::{MainsError, Result};

/// Default RMS reference voltage for the harmonic sweep (volts).
pub const DEFAULT_BASE_VOLTAGE: f64 = 221.11;

/// Default harmonic orders.
pub const DEFAULT_ORDERS: [u32; 7] = [1, 3, 5, 7, 9, 11, 13];

/// Default number of sweep points.
pub const DEFAULT_SWEEP_POINTS: usize = 100;

/// Maximum distance (radians) between a sweep angle and a checkpoint.
pub const CHECKPOINT_TOLERANCE: f64 = 1e-9;

/// Configuration for a harmonic sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicConfig {
    /// RMS reference voltage (volts).
    pub base_voltage: f64,
    /// Orders to evaluate, in output order.
    pub orders: Vec<u32>,
    /// Number of firing angles.
    pub points: usize,
    /// Last firing angle of the sweep (radians); the sweep starts at 0.
    pub sweep_end: f64,
}

impl Default for HarmonicConfig {
    fn default() -> Self {
        Self {
            base_voltage: DEFAULT_BASE_VOLTAGE,
            orders: DEFAULT_ORDERS.to_vec(),
            points: DEFAULT_SWEEP_POINTS,
            sweep_end: PI / 2.0,
        }
    }
}

impl HarmonicConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference voltage.
    pub fn with_base_voltage(mut self, volts: f64) -> Self {
        self.base_voltage = volts;
        self
    }

    /// Set the harmonic orders.
    pub fn with_orders(mut self, orders: Vec<u32>) -> Self {
        self.orders = orders;
        self
    }

    /// Set the number of sweep points.
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Set the final sweep angle (radians).
    pub fn with_sweep_end(mut self, angle: f64) -> Self {
        self.sweep_end = angle;
        self
    }

    /// Build the validated sweep.
    pub fn sweep(&self) -> Result<FiringAngleSweep> {
        FiringAngleSweep::linspace(0.0, self.sweep_end, self.points)
    }

    /// Evaluate the configured table.
    pub fn evaluate(&self) -> Result<HarmonicTable> {
        ensure_finite("base voltage", self.base_voltage)?;
        if self.orders.is_empty() {
            return Err(MainsError::invalid_parameter(
                "harmonic orders",
                "at least one order is required",
            ));
        }
        let orders = HarmonicOrder::from_list(&self.orders)?;
        let sweep = self.sweep()?;
        harmonic_table(&orders, &sweep, self.base_voltage)
    }
}
