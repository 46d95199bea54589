//! Error types for the mains circuit and harmonic kernels.
//!
//! This module provides a unified error type [`MainsError`] that covers
//! all error conditions that can occur during scenario parsing, load
//! aggregation, the network solve, and harmonic evaluation.

use thiserror::Error;

use crate::circuit::Phase;

/// Result type alias using [`MainsError`].
pub type Result<T> = std::result::Result<T, MainsError>;

/// Broad failure category of a [`MainsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad circuit parameters: empty phase, zero or non-finite impedance.
    Configuration,
    /// The linear system could not be solved reliably.
    Numerical,
    /// Harmonic order or firing angle outside its domain.
    Domain,
    /// Malformed scenario text or unreadable files.
    Input,
}

/// Unified error type for all mains operations.
#[derive(Error, Debug)]
pub enum MainsError {
    // ============ Configuration Errors ============
    /// A phase has no devices, so its admittance sum is empty
    #[error("Phase {phase} has no devices assigned")]
    EmptyPhase { phase: Phase },

    /// A device impedance is exactly zero (infinite admittance)
    #[error("Device '{device}' has zero impedance")]
    ZeroImpedance { device: String },

    /// A parameter is NaN or infinite
    #[error("Parameter '{param}' is not finite (value: {value})")]
    NonFiniteParameter { param: String, value: f64 },

    /// A parameter is finite but otherwise unusable
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ Numerical Errors ============
    /// Matrix is singular and cannot be solved
    #[error("Singular system matrix (relative pivot {pivot:.2e}) - check impedance values")]
    SingularMatrix { pivot: f64 },

    /// Solution contains NaN or infinite entries
    #[error("Numerical overflow while computing {quantity}")]
    NumericalOverflow { quantity: String },

    // ============ Domain Errors ============
    /// Harmonic order must be a positive integer
    #[error("Invalid harmonic order {order} - orders start at 1")]
    InvalidHarmonicOrder { order: u32 },

    /// Firing angle outside [0, pi]
    #[error("Firing angle {angle} rad is outside [0, pi]")]
    FiringAngleOutOfRange { angle: f64 },

    /// Sweep definition cannot produce an ordered angle sequence
    #[error("Invalid firing angle sweep: {message}")]
    InvalidSweep { message: String },

    // ============ Input Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Directive given more than once
    #[error("Directive '{directive}' repeated at line {line}")]
    DuplicateDirective { directive: String, line: usize },

    /// Two devices share a name
    #[error("Duplicate device name '{name}' at line {line}")]
    DuplicateDevice { name: String, line: usize },

    /// Error reading scenario file
    #[error("Failed to read scenario file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report
    #[error("Report output error: {source}")]
    OutputError {
        #[from]
        source: std::io::Error,
    },
}

impl MainsError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPhase { .. }
            | Self::ZeroImpedance { .. }
            | Self::NonFiniteParameter { .. }
            | Self::InvalidParameter { .. } => ErrorKind::Configuration,
            Self::SingularMatrix { .. } | Self::NumericalOverflow { .. } => ErrorKind::Numerical,
            Self::InvalidHarmonicOrder { .. }
            | Self::FiringAngleOutOfRange { .. }
            | Self::InvalidSweep { .. } => ErrorKind::Domain,
            Self::LexerError { .. }
            | Self::ParseError { .. }
            | Self::DuplicateDirective { .. }
            | Self::DuplicateDevice { .. }
            | Self::FileReadError { .. }
            | Self::OutputError { .. } => ErrorKind::Input,
        }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a non-finite parameter error
    pub fn non_finite(param: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteParameter {
            param: param.into(),
            value,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            MainsError::EmptyPhase { phase: Phase::B }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            MainsError::SingularMatrix { pivot: 0.0 }.kind(),
            ErrorKind::Numerical
        );
        assert_eq!(
            MainsError::InvalidHarmonicOrder { order: 0 }.kind(),
            ErrorKind::Domain
        );
        assert_eq!(MainsError::parse(3, "oops").kind(), ErrorKind::Input);
    }

    #[test]
    fn test_error_messages() {
        let err = MainsError::EmptyPhase { phase: Phase::C };
        assert_eq!(err.to_string(), "Phase C has no devices assigned");

        let err = MainsError::lexer(2, 5, "unexpected character '$'");
        assert_eq!(
            err.to_string(),
            "Lexer error at line 2, column 5: unexpected character '$'"
        );
    }
}
