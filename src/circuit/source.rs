//! Balanced three-phase voltage source.

use num_complex::Complex64;

use super::types::{Phase, PhaseValues};
use super::validate::ensure_finite;
use crate::error::{MainsError, Result};

/// Phase displacement of A, B and C in degrees.
pub const PHASE_ANGLES_DEG: [f64; 3] = [0.0, 120.0, 240.0];

/// Convert a polar value with the angle in degrees to rectangular form.
pub fn polar_degrees(magnitude: f64, angle_deg: f64) -> Complex64 {
    Complex64::from_polar(magnitude, angle_deg.to_radians())
}

/// Right-hand side of the network equations.
///
/// Holds the three phase phasors plus the reference entry for the load
/// node, which is grounded and always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltagePhasors {
    /// Phase-to-neutral source voltages
    pub phases: PhaseValues<Complex64>,
    /// Reference (ground) entry
    pub reference: Complex64,
}

impl VoltagePhasors {
    /// Build a balanced set with the given RMS phase magnitude.
    pub fn balanced(magnitude: f64) -> Result<Self> {
        let magnitude = ensure_finite("phase voltage", magnitude)?;
        if magnitude < 0.0 {
            return Err(MainsError::invalid_parameter(
                "phase voltage",
                format!("magnitude must be non-negative, got {magnitude}"),
            ));
        }
        Ok(Self {
            phases: PhaseValues::from_fn(|p| polar_degrees(magnitude, PHASE_ANGLES_DEG[p.index()])),
            reference: Complex64::new(0.0, 0.0),
        })
    }

    /// The 4-element vector in matrix order (A, B, C, reference).
    pub fn as_array(&self) -> [Complex64; 4] {
        [self.phases.a, self.phases.b, self.phases.c, self.reference]
    }

    /// Line voltages V_AB, V_BC, V_CA.
    pub fn phase_to_phase(&self) -> PhaseValues<Complex64> {
        PhaseValues::from_fn(|p| {
            let next = Phase::ALL[(p.index() + 1) % 3];
            self.phases[p] - self.phases[next]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_balanced_phasors() {
        let v = VoltagePhasors::balanced(127.0).unwrap();
        let arr = v.as_array();

        assert_abs_diff_eq!(arr[0].re, 127.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arr[0].im, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arr[1].re, -63.5, epsilon = 1e-9);
        assert_abs_diff_eq!(arr[1].im, 127.0 * 3f64.sqrt() / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arr[2].re, -63.5, epsilon = 1e-9);
        assert_abs_diff_eq!(arr[2].im, -127.0 * 3f64.sqrt() / 2.0, epsilon = 1e-9);
        assert_eq!(arr[3], Complex64::new(0.0, 0.0));

        // Balanced set sums to zero
        let sum = arr[0] + arr[1] + arr[2];
        assert_abs_diff_eq!(sum.norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_line_voltages() {
        let v = VoltagePhasors::balanced(127.0).unwrap();
        for (_, line) in v.phase_to_phase().iter() {
            assert_relative_eq!(line.norm(), 127.0 * 3f64.sqrt(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_invalid_magnitude() {
        assert!(VoltagePhasors::balanced(f64::NAN).is_err());
        assert!(VoltagePhasors::balanced(-1.0).is_err());
    }
}
