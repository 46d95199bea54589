//! Text description of an installation.
//!
//! A scenario lists the household devices per phase and optionally
//! overrides the supply voltage, neutral conductor and grounded load.
//! The format is line-oriented and human-editable.
//!
//! # Grammar Overview
//!
//! ```text
//! scenario    = { line }
//! line        = comment | directive | device | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".voltage" value | ".neutral" impedance | ".load" impedance
//! device      = phase name impedance
//!
//! phase       = "A" | "B" | "C"
//! name        = identifier
//! impedance   = value | value sign value ('j' | 'i') | value ('j' | 'i')
//! value       = ['-' | '+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+] [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Example
//!
//! ```text
//! .voltage 127
//! .neutral 0.086+0.38j
//! .load    12.1
//!
//! A  tv1       332.56
//! A  ac1       0.89+2.83j
//! B  airfryer  10.75
//! C  computer  21.51
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_impedance, parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use std::collections::HashSet;

use crate::circuit::{ensure_invertible, reference_catalog, Device};
use crate::error::{MainsError, Result};
use crate::solver::{NetworkConfig, NetworkSolution, NetworkSolver};

/// A device catalog together with its network parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Supply, neutral and load parameters
    pub config: NetworkConfig,
    /// Devices in declaration order
    pub devices: Vec<Device>,
}

impl Scenario {
    /// The reference residential installation with default parameters.
    pub fn reference() -> Self {
        Self {
            config: NetworkConfig::default(),
            devices: reference_catalog(),
        }
    }

    /// Build a scenario from a parsed file, filling unset directives from
    /// the default configuration.
    pub fn from_ast(ast: ScenarioAst) -> Result<Self> {
        let mut config = NetworkConfig::default();
        if let Some(volts) = ast.voltage {
            config = config.with_phase_voltage(volts);
        }
        if let Some(z) = ast.neutral {
            config = config.with_neutral_impedance(z);
        }
        if let Some(z) = ast.load {
            config = config.with_load_impedance(z);
        }
        config.validate()?;

        let mut names = HashSet::new();
        let mut devices = Vec::with_capacity(ast.devices.len());
        for def in ast.devices {
            if !names.insert(def.name.clone()) {
                return Err(MainsError::DuplicateDevice {
                    name: def.name,
                    line: def.line,
                });
            }
            ensure_invertible(&def.name, def.impedance)?;
            devices.push(Device::new(def.phase, def.name, def.impedance));
        }

        Ok(Self { config, devices })
    }

    /// Aggregate the devices and solve the network.
    pub fn solve(&self) -> Result<NetworkSolution> {
        NetworkSolver::new(self.config.clone()).solve_devices(&self.devices)
    }
}

/// Parse scenario text into a syntax tree.
pub fn parse_ast(input: &str) -> Result<ScenarioAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse scenario text.
pub fn parse(input: &str) -> Result<Scenario> {
    Scenario::from_ast(parse_ast(input)?)
}

/// Parse a scenario file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path).map_err(|e| MainsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Phase;
    use crate::error::ErrorKind;
    use num_complex::Complex64;

    const REFERENCE: &str = include_str!("../../scenarios/reference.mains");

    #[test]
    fn test_reference_file_matches_builtin() {
        let parsed = parse(REFERENCE).unwrap();
        assert_eq!(parsed, Scenario::reference());
    }

    #[test]
    fn test_reference_file_solves() {
        let solution = parse(REFERENCE).unwrap().solve().unwrap();
        let i_n = solution.derived.neutral_current;
        assert!((i_n.norm() - 52.233_381).abs() < 1e-5);
    }

    #[test]
    fn test_directive_overrides() {
        let scenario = parse(".voltage 220\nA r1 10\nB r2 10\nC r3 10\n").unwrap();
        assert_eq!(scenario.config.phase_voltage, 220.0);
        assert_eq!(scenario.config.load_impedance, Complex64::new(12.1, 0.0));
        assert_eq!(scenario.devices[2].phase, Phase::C);
    }

    #[test]
    fn test_duplicate_device() {
        let err = parse("A r1 10\nB r1 10\n").unwrap_err();
        assert!(matches!(err, MainsError::DuplicateDevice { line: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_zero_impedance_rejected_on_load() {
        let err = parse("A short 0\nB r 1\nC r2 1\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_phase_fails_at_solve() {
        let scenario = parse("A r1 10\nC r3 10\n").unwrap();
        assert!(matches!(
            scenario.solve(),
            Err(MainsError::EmptyPhase { phase: Phase::B })
        ));
    }
}
