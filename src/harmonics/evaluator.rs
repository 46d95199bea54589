//! Closed-form Fourier coefficients of a phase-controlled waveform.

use std::f64::consts::PI;

use crate::circuit::ensure_finite;
use crate::error::Result;

use super::order::HarmonicOrder;
use super::sweep::{check_angle, FiringAngleSweep};
use super::CHECKPOINT_TOLERANCE;

/// The two orthogonal Fourier components of one harmonic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourierComponents {
    /// Sine-branch coefficient (volts)
    pub sine: f64,
    /// Cosine-branch coefficient (volts)
    pub cosine: f64,
}

impl FourierComponents {
    /// Resultant amplitude, `sqrt(sine² + cosine²)`.
    pub fn amplitude(&self) -> f64 {
        self.sine.hypot(self.cosine)
    }
}

/// Fundamental (n = 1). The general form divides by n − 1 here.
fn fundamental_components(base: f64, alpha: f64) -> FourierComponents {
    FourierComponents {
        sine: (base / PI) * (PI - alpha + (2.0 * alpha).sin() / 2.0),
        cosine: (base / (2.0 * PI)) * (1.0 - (2.0 * alpha).cos()),
    }
}

/// Orders n ≠ 1.
fn general_components(n: f64, base: f64, alpha: f64) -> FourierComponents {
    let up = n + 1.0;
    let down = n - 1.0;

    let sine = (2.0 * base / PI) * (((up * alpha).sin() / up) - ((down * alpha).sin() / down));

    let lagging = ((1.0 - n) * PI).cos() - ((1.0 - n) * alpha).cos();
    let leading = (up * alpha).cos() - (up * PI).cos();
    let cosine = (base / PI) * ((lagging / down) - (leading / up));

    FourierComponents { sine, cosine }
}

/// Fourier components of `order` at firing angle `alpha` (radians).
pub fn components(
    order: HarmonicOrder,
    alpha: f64,
    base_voltage: f64,
) -> Result<FourierComponents> {
    let alpha = check_angle(alpha)?;
    let base = ensure_finite("base voltage", base_voltage)?;
    Ok(components_unchecked(order, alpha, base))
}

fn components_unchecked(order: HarmonicOrder, alpha: f64, base: f64) -> FourierComponents {
    if order.is_fundamental() {
        fundamental_components(base, alpha)
    } else {
        general_components(f64::from(order.get()), base, alpha)
    }
}

/// Amplitude of `order` at firing angle `alpha` (radians).
pub fn amplitude(order: HarmonicOrder, alpha: f64, base_voltage: f64) -> Result<f64> {
    components(order, alpha, base_voltage).map(|c| c.amplitude())
}

/// Amplitudes of one harmonic across a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicCurve {
    /// Harmonic order
    pub order: HarmonicOrder,
    /// Amplitude per sweep angle, index-aligned with the sweep
    pub amplitudes: Vec<f64>,
}

/// Amplitude curves for a set of orders over a shared sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicTable {
    /// Angles every curve is aligned with
    pub sweep: FiringAngleSweep,
    /// One curve per requested order, in request order
    pub curves: Vec<HarmonicCurve>,
}

impl HarmonicTable {
    /// Amplitudes for `order`, if it was requested.
    pub fn amplitudes(&self, order: HarmonicOrder) -> Option<&[f64]> {
        self.curves
            .iter()
            .find(|c| c.order == order)
            .map(|c| c.amplitudes.as_slice())
    }

    /// Amplitude of every order at the sweep point matching `angle`.
    ///
    /// Returns `None` when no sweep angle lies within the checkpoint
    /// tolerance of `angle`.
    pub fn checkpoint(&self, angle: f64) -> Option<Vec<(HarmonicOrder, f64)>> {
        let index = self
            .sweep
            .angles()
            .iter()
            .position(|a| (a - angle).abs() < CHECKPOINT_TOLERANCE)?;
        let values: Vec<_> = self
            .curves
            .iter()
            .map(|c| (c.order, c.amplitudes[index]))
            .collect();
        for (order, amplitude) in &values {
            tracing::debug!(%order, amplitude, angle, "checkpoint");
        }
        Some(values)
    }
}

/// Evaluate every `(order, angle)` pair of `orders × sweep`.
pub fn harmonic_table(
    orders: &[HarmonicOrder],
    sweep: &FiringAngleSweep,
    base_voltage: f64,
) -> Result<HarmonicTable> {
    let _span = tracing::info_span!(
        "harmonic_table",
        orders = orders.len(),
        points = sweep.len()
    )
    .entered();
    let base = ensure_finite("base voltage", base_voltage)?;

    let curves = orders
        .iter()
        .map(|&order| HarmonicCurve {
            order,
            amplitudes: sweep
                .angles()
                .iter()
                .map(|&alpha| components_unchecked(order, alpha, base).amplitude())
                .collect(),
        })
        .collect();

    Ok(HarmonicTable {
        sweep: sweep.clone(),
        curves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, MainsError};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const BASE: f64 = 221.11;

    fn order(n: u32) -> HarmonicOrder {
        HarmonicOrder::new(n).unwrap()
    }

    #[test]
    fn test_fundamental_at_quarter_cycle() {
        let a = amplitude(order(1), PI / 2.0, BASE).unwrap();
        assert_abs_diff_eq!(a, 131.057_099_835_188, epsilon = 1e-6);
    }

    #[test]
    fn test_full_conduction() {
        // With no delay the fundamental carries the whole base voltage
        // and the odd harmonics vanish.
        assert_abs_diff_eq!(amplitude(order(1), 0.0, BASE).unwrap(), BASE, epsilon = 1e-9);
        for n in [3, 5, 7, 9, 11, 13] {
            assert_abs_diff_eq!(amplitude(order(n), 0.0, BASE).unwrap(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_general_orders_at_quarter_cycle() {
        let expected = [
            (3, 70.381_498_934_097_96),
            (5, 23.460_499_644_699_32),
            (7, 23.460_499_644_699_32),
            (9, 14.076_299_786_819_593),
            (13, 10.054_499_847_728_28),
        ];
        for (n, value) in expected {
            let a = amplitude(order(n), PI / 2.0, BASE).unwrap();
            assert_relative_eq!(a, value, max_relative = 1e-9);
        }
        let a = amplitude(order(3), PI / 4.0, BASE).unwrap();
        assert_relative_eq!(a, 99.534_470_332_748_87, max_relative = 1e-9);
    }

    #[test]
    fn test_fundamental_components() {
        let c = components(order(1), PI / 2.0, BASE).unwrap();
        assert_relative_eq!(c.sine, BASE / 2.0, max_relative = 1e-12);
        assert_relative_eq!(c.cosine, BASE / PI, max_relative = 1e-12);
    }

    #[test]
    fn test_general_branch_converges_near_one() {
        // The general form stays finite and settles as n approaches 1.
        // It does not approach the fundamental: its sine branch tends to
        // (V/π)(sin 2α − 2α), so agreement with order 1 near n = 1 is
        // deliberately not asserted here.
        let near = general_components(1.0 + 1e-6, BASE, 0.7).amplitude();
        let nearer = general_components(1.0 + 1e-7, BASE, 0.7).amplitude();
        assert!(near.is_finite() && nearer.is_finite());
        assert_relative_eq!(near, nearer, max_relative = 1e-4);
    }

    #[test]
    fn test_amplitude_non_negative() {
        let sweep = FiringAngleSweep::linspace(0.0, PI, 181).unwrap();
        let table = harmonic_table(&HarmonicOrder::odd(13), &sweep, BASE).unwrap();
        for curve in &table.curves {
            assert!(curve.amplitudes.iter().all(|a| *a >= 0.0 && a.is_finite()));
        }
    }

    #[test]
    fn test_reference_table() {
        let orders = HarmonicOrder::from_list(&[1, 3, 5, 7, 9, 11, 13]).unwrap();
        let sweep = FiringAngleSweep::quarter_cycle(100).unwrap();
        let table = harmonic_table(&orders, &sweep, BASE).unwrap();

        assert_eq!(table.curves.len(), 7);
        for (curve, expected) in table.curves.iter().zip(&orders) {
            assert_eq!(curve.order, *expected);
            assert_eq!(curve.amplitudes.len(), 100);
        }

        let checkpoint = table.checkpoint(PI / 2.0).unwrap();
        assert_eq!(checkpoint[0].0, HarmonicOrder::FUNDAMENTAL);
        assert_abs_diff_eq!(checkpoint[0].1, 131.057_099_835_188, epsilon = 1e-6);
        assert_abs_diff_eq!(checkpoint[5].1, 14.076_299_786_819_593, epsilon = 1e-6);

        // Table entries agree with pointwise evaluation
        let h5 = table.amplitudes(order(5)).unwrap();
        let alpha = sweep.angles()[42];
        assert_eq!(h5[42], amplitude(order(5), alpha, BASE).unwrap());

        assert!(table.checkpoint(1.0).is_none());
        assert!(table.amplitudes(order(15)).is_none());
    }

    #[test]
    fn test_domain_errors() {
        let err = amplitude(order(3), -0.1, BASE).unwrap_err();
        assert!(matches!(err, MainsError::FiringAngleOutOfRange { .. }));
        assert_eq!(err.kind(), ErrorKind::Domain);

        assert!(amplitude(order(3), PI + 1e-6, BASE).is_err());
        assert!(amplitude(order(3), 0.5, f64::INFINITY).is_err());

        let sweep = FiringAngleSweep::quarter_cycle(10).unwrap();
        assert!(harmonic_table(&[order(1)], &sweep, f64::NAN).is_err());
    }
}
