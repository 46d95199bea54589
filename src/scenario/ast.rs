//! Syntax tree types for the scenario format.

use num_complex::Complex64;

use crate::circuit::Phase;

/// Complete representation of a parsed scenario file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioAst {
    /// `.voltage` directive (RMS phase voltage)
    pub voltage: Option<f64>,
    /// `.neutral` directive (neutral conductor impedance)
    pub neutral: Option<Complex64>,
    /// `.load` directive (grounded load impedance)
    pub load: Option<Complex64>,
    /// Device lines in file order
    pub devices: Vec<DeviceDef>,
}

/// A device line from the scenario file.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDef {
    /// Phase label
    pub phase: Phase,
    /// Device name
    pub name: String,
    /// Impedance in ohms
    pub impedance: Complex64,
    /// Source line number for error reporting
    pub line: usize,
}
