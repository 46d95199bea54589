//! Reduction of per-device loads to one equivalent impedance per phase.

use num_complex::Complex64;

use super::device::Device;
use super::types::{Phase, PhaseImpedances, PhaseValues};
use super::validate::ensure_invertible;
use crate::error::{MainsError, Result};

/// Combine all devices on each phase in parallel.
///
/// Each phase's equivalent impedance is `1 / Σ(1/Zᵢ)` over the devices
/// tagged with that phase. Fails if a device impedance is zero or
/// non-finite, or if a phase has no devices.
pub fn equivalent_impedances(devices: &[Device]) -> Result<PhaseImpedances> {
    let mut admittance = PhaseValues::<Complex64>::default();
    let mut counts = PhaseValues::<usize>::default();

    for device in devices {
        let z = ensure_invertible(&device.name, device.impedance)?;
        admittance[device.phase] += z.inv();
        counts[device.phase] += 1;
    }

    let mut equivalent = PhaseImpedances::default();
    for phase in Phase::ALL {
        if counts[phase] == 0 {
            return Err(MainsError::EmptyPhase { phase });
        }
        let y = admittance[phase];
        if y.re == 0.0 && y.im == 0.0 {
            return Err(MainsError::invalid_parameter(
                format!("phase {phase} admittance"),
                "device admittances cancel to zero",
            ));
        }
        equivalent[phase] = y.inv();
        tracing::debug!(
            %phase,
            devices = counts[phase],
            re = equivalent[phase].re,
            im = equivalent[phase].im,
            "equivalent impedance"
        );
    }

    Ok(equivalent)
}
