//! Firing angle sweeps.

use std::f64::consts::PI;

use crate::error::{MainsError, Result};

/// Ordered firing angles in radians, each within [0, π].
#[derive(Debug, Clone, PartialEq)]
pub struct FiringAngleSweep {
    angles: Vec<f64>,
}

impl FiringAngleSweep {
    /// Generates `points` linearly spaced angles in [start, stop].
    ///
    /// The last angle equals `stop` exactly so checkpoints at the end of
    /// the sweep can be found by value.
    pub fn linspace(start: f64, stop: f64, points: usize) -> Result<Self> {
        if points == 0 {
            return Err(MainsError::InvalidSweep {
                message: "sweep needs at least one point".to_string(),
            });
        }
        check_angle(start)?;
        check_angle(stop)?;
        let angles = match points {
            1 => vec![start],
            _ => {
                let step = (stop - start) / (points as f64 - 1.0);
                (0..points)
                    .map(|i| if i == points - 1 { stop } else { start + step * i as f64 })
                    .collect()
            }
        };
        Self::from_angles(angles)
    }

    /// The default sweep over [0, π/2].
    pub fn quarter_cycle(points: usize) -> Result<Self> {
        Self::linspace(0.0, PI / 2.0, points)
    }

    /// Wrap an explicit angle list.
    ///
    /// Checks:
    /// - Every angle is finite and within [0, π]
    /// - Angles are non-decreasing
    pub fn from_angles(angles: Vec<f64>) -> Result<Self> {
        for &angle in &angles {
            check_angle(angle)?;
        }
        if angles.windows(2).any(|w| w[1] < w[0]) {
            return Err(MainsError::InvalidSweep {
                message: "angles must be in increasing order".to_string(),
            });
        }
        Ok(Self { angles })
    }

    /// Angles in radians.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Angles converted to degrees.
    pub fn degrees(&self) -> Vec<f64> {
        self.angles.iter().map(|a| a.to_degrees()).collect()
    }

    /// Number of angles.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether the sweep has no angles.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Reject angles outside [0, π].
pub fn check_angle(angle: f64) -> Result<f64> {
    if angle.is_finite() && (0.0..=PI).contains(&angle) {
        Ok(angle)
    } else {
        Err(MainsError::FiringAngleOutOfRange { angle })
    }
}
