//! Network solve and post-processing.

use num_complex::Complex64;

use crate::circuit::{
    ensure_finite, ensure_finite_complex, equivalent_impedances, Device, PhaseImpedances,
    PhaseValues, VoltagePhasors,
};
use crate::error::{MainsError, Result};

use super::matrix::{SystemMatrix, LOAD_INDEX, SYSTEM_SIZE};
use super::{
    DEFAULT_LOAD_IMPEDANCE, DEFAULT_NEUTRAL_IMPEDANCE, DEFAULT_PHASE_VOLTAGE, PIVOT_TOLERANCE,
};

/// Configuration for the network solver.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// RMS phase-to-neutral voltage (volts).
    pub phase_voltage: f64,
    /// Neutral conductor impedance (ohms).
    pub neutral_impedance: Complex64,
    /// Grounded single-phase load impedance (ohms).
    pub load_impedance: Complex64,
    /// Relative pivot magnitude below which the system is treated as singular.
    pub pivot_tolerance: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            phase_voltage: DEFAULT_PHASE_VOLTAGE,
            neutral_impedance: Complex64::new(
                DEFAULT_NEUTRAL_IMPEDANCE.0,
                DEFAULT_NEUTRAL_IMPEDANCE.1,
            ),
            load_impedance: Complex64::new(DEFAULT_LOAD_IMPEDANCE, 0.0),
            pivot_tolerance: PIVOT_TOLERANCE,
        }
    }
}

impl NetworkConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RMS phase voltage.
    pub fn with_phase_voltage(mut self, volts: f64) -> Self {
        self.phase_voltage = volts;
        self
    }

    /// Set the neutral conductor impedance.
    pub fn with_neutral_impedance(mut self, impedance: Complex64) -> Self {
        self.neutral_impedance = impedance;
        self
    }

    /// Set the grounded load impedance.
    pub fn with_load_impedance(mut self, impedance: Complex64) -> Self {
        self.load_impedance = impedance;
        self
    }

    /// Set the singular-pivot tolerance.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Check every parameter before any computation runs.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("phase voltage", self.phase_voltage)?;
        ensure_finite_complex("neutral impedance", self.neutral_impedance)?;
        ensure_finite_complex("load impedance", self.load_impedance)?;
        let tolerance = ensure_finite("pivot tolerance", self.pivot_tolerance)?;
        if tolerance <= 0.0 {
            return Err(MainsError::invalid_parameter(
                "pivot tolerance",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Solved branch currents: the three phase currents and the load current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentVector {
    /// Phase currents I_A, I_B, I_C
    pub phases: PhaseValues<Complex64>,
    /// Current through the grounded load
    pub load: Complex64,
}

impl CurrentVector {
    /// Build from a solution vector in matrix order.
    pub fn from_array(x: [Complex64; SYSTEM_SIZE]) -> Self {
        Self {
            phases: PhaseValues::new(x[0], x[1], x[2]),
            load: x[LOAD_INDEX],
        }
    }

    /// The currents in matrix order (A, B, C, load).
    pub fn as_array(&self) -> [Complex64; SYSTEM_SIZE] {
        [self.phases.a, self.phases.b, self.phases.c, self.load]
    }
}

/// Neutral current: the sum of the three phase currents.
pub fn neutral_current(currents: &CurrentVector) -> Complex64 {
    currents.phases.a + currents.phases.b + currents.phases.c
}

/// Voltage drop along the neutral conductor, `-Zf · I_n`.
pub fn neutral_voltage_drop(neutral_impedance: Complex64, neutral_current: Complex64) -> Complex64 {
    -neutral_impedance * neutral_current
}

/// Voltage across the grounded load, `Z_load · I_load`.
pub fn load_voltage(load_impedance: Complex64, currents: &CurrentVector) -> Complex64 {
    load_impedance * currents.load
}

/// Voltage across each phase's equivalent impedance, `Z_p · I_p`.
pub fn phase_voltages(
    impedances: &PhaseImpedances,
    currents: &CurrentVector,
) -> PhaseValues<Complex64> {
    PhaseValues::from_fn(|p| impedances[p] * currents.phases[p])
}

/// Quantities derived from a solved [`CurrentVector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    /// I_A + I_B + I_C
    pub neutral_current: Complex64,
    /// -Zf · I_n
    pub neutral_voltage_drop: Complex64,
    /// Z_load · I_load
    pub load_voltage: Complex64,
    /// Z_p · I_p for each phase
    pub phase_voltages: PhaseValues<Complex64>,
}

impl DerivedQuantities {
    /// Derive all secondary quantities without touching the currents.
    pub fn derive(
        currents: &CurrentVector,
        impedances: &PhaseImpedances,
        neutral_impedance: Complex64,
        load_impedance: Complex64,
    ) -> Self {
        let i_n = neutral_current(currents);
        Self {
            neutral_current: i_n,
            neutral_voltage_drop: neutral_voltage_drop(neutral_impedance, i_n),
            load_voltage: load_voltage(load_impedance, currents),
            phase_voltages: phase_voltages(impedances, currents),
        }
    }
}

/// Full result of a network solve.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSolution {
    /// Equivalent impedance per phase
    pub impedances: PhaseImpedances,
    /// Source voltages used as the right-hand side
    pub voltages: VoltagePhasors,
    /// Assembled system matrix
    pub matrix: SystemMatrix,
    /// Solved currents
    pub currents: CurrentVector,
    /// Neutral current and voltages
    pub derived: DerivedQuantities,
}

impl NetworkSolution {
    /// Largest row residual of `Z · I - V`.
    pub fn residual(&self) -> f64 {
        self.matrix
            .residual(&self.currents.as_array(), &self.voltages.as_array())
    }
}

/// Solver for the unbalanced four-wire network.
#[derive(Debug, Clone, Default)]
pub struct NetworkSolver {
    config: NetworkConfig,
}

impl NetworkSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Aggregate a device catalog and solve the network.
    pub fn solve_devices(&self, devices: &[Device]) -> Result<NetworkSolution> {
        self.config.validate()?;
        let impedances = equivalent_impedances(devices)?;
        let voltages = VoltagePhasors::balanced(self.config.phase_voltage)?;
        self.solve(&impedances, &voltages)
    }

    /// Solve for the currents given per-phase impedances and source voltages.
    pub fn solve(
        &self,
        impedances: &PhaseImpedances,
        voltages: &VoltagePhasors,
    ) -> Result<NetworkSolution> {
        let _span = tracing::info_span!("network_solve").entered();
        self.config.validate()?;
        for (phase, z) in impedances.iter() {
            ensure_finite_complex(&format!("phase {phase} impedance"), *z)?;
        }
        for (phase, v) in voltages.phases.iter() {
            ensure_finite_complex(&format!("phase {phase} source voltage"), *v)?;
        }
        ensure_finite_complex("reference voltage", voltages.reference)?;

        let zf = self.config.neutral_impedance;
        let zl = self.config.load_impedance;
        let matrix = SystemMatrix::build(impedances, zf, zl);
        let factors = matrix.factor(self.config.pivot_tolerance)?;
        let currents = CurrentVector::from_array(factors.solve(&voltages.as_array())?);
        let derived = DerivedQuantities::derive(&currents, impedances, zf, zl);

        tracing::debug!(
            neutral_current = derived.neutral_current.norm(),
            load_current = currents.load.norm(),
            "network solved"
        );

        Ok(NetworkSolution {
            impedances: *impedances,
            voltages: *voltages,
            matrix,
            currents,
            derived,
        })
    }
}
