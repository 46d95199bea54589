//! Household devices and the reference installation catalog.

use num_complex::Complex64;

use super::types::Phase;

/// A load connected between one phase and neutral.
///
/// Devices are immutable once built; the phase label is a closed
/// enumeration so a misspelled phase cannot reach the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Phase the device is wired to
    pub phase: Phase,
    /// Human-readable label used in reports and error messages
    pub name: String,
    /// Impedance in ohms
    pub impedance: Complex64,
}

impl Device {
    /// Create a new device.
    pub fn new(phase: Phase, name: impl Into<String>, impedance: Complex64) -> Self {
        Self {
            phase,
            name: name.into(),
            impedance,
        }
    }

    /// Create a purely resistive device.
    pub fn resistive(phase: Phase, name: impl Into<String>, ohms: f64) -> Self {
        Self::new(phase, name, Complex64::new(ohms, 0.0))
    }
}

/// Devices of the reference residential installation.
///
/// Eight loads on phase A (including two inductive air conditioners),
/// three on phase B and five on phase C.
pub fn reference_catalog() -> Vec<Device> {
    let air_conditioner = Complex64::new(0.89, 2.83);
    vec![
        Device::resistive(Phase::A, "tv1", 332.56),
        Device::resistive(Phase::A, "tv2", 332.56),
        Device::resistive(Phase::A, "lamp4", 3291.63),
        Device::resistive(Phase::A, "lamp5", 3291.63),
        Device::resistive(Phase::A, "cooktop1", 13.44),
        Device::resistive(Phase::A, "microwave", 13.44),
        Device::new(Phase::A, "air_conditioner1", air_conditioner),
        Device::new(Phase::A, "air_conditioner2", air_conditioner),
        Device::resistive(Phase::B, "airfryer", 10.75),
        Device::resistive(Phase::B, "cooktop2", 13.44),
        Device::resistive(Phase::B, "lamp1", 3291.63),
        Device::resistive(Phase::C, "cooktop3", 13.44),
        Device::resistive(Phase::C, "computer", 21.51),
        Device::resistive(Phase::C, "lamp2", 3291.63),
        Device::resistive(Phase::C, "lamp3", 3291.63),
        Device::resistive(Phase::C, "refrigerator", 22.58),
    ]
}
