//! Core types for per-phase circuit representation.

use std::fmt;
use std::ops::{Index, IndexMut};

use num_complex::Complex64;

/// One of the three live conductors of the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// All phases in matrix order.
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    /// Row/column of this phase in the system matrix.
    pub fn index(&self) -> usize {
        match self {
            Phase::A => 0,
            Phase::B => 1,
            Phase::C => 2,
        }
    }

    /// Parse a phase label (`A`, `B`, `C`, case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "A" => Some(Phase::A),
            "B" => Some(Phase::B),
            "C" => Some(Phase::C),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
        };
        write!(f, "{}", label)
    }
}

/// A value held once per phase.
///
/// The key set is fixed, so this is a plain record rather than a map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseValues<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

impl<T> PhaseValues<T> {
    /// Create from the three per-phase values.
    pub fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }

    /// Build by evaluating `f` for each phase in order.
    pub fn from_fn<F: FnMut(Phase) -> T>(mut f: F) -> Self {
        Self {
            a: f(Phase::A),
            b: f(Phase::B),
            c: f(Phase::C),
        }
    }

    /// Apply `f` to every value.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> PhaseValues<U> {
        PhaseValues {
            a: f(&self.a),
            b: f(&self.b),
            c: f(&self.c),
        }
    }

    /// Iterate `(phase, value)` pairs in phase order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &T)> {
        Phase::ALL.into_iter().map(move |p| (p, &self[p]))
    }
}

impl<T> Index<Phase> for PhaseValues<T> {
    type Output = T;

    fn index(&self, phase: Phase) -> &T {
        match phase {
            Phase::A => &self.a,
            Phase::B => &self.b,
            Phase::C => &self.c,
        }
    }
}

impl<T> IndexMut<Phase> for PhaseValues<T> {
    fn index_mut(&mut self, phase: Phase) -> &mut T {
        match phase {
            Phase::A => &mut self.a,
            Phase::B => &mut self.b,
            Phase::C => &mut self.c,
        }
    }
}

/// Equivalent impedance per phase, in ohms.
pub type PhaseImpedances = PhaseValues<Complex64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::from_label("a"), Some(Phase::A));
        assert_eq!(Phase::from_label("C"), Some(Phase::C));
        assert_eq!(Phase::from_label("N"), None);
        assert_eq!(Phase::B.to_string(), "B");
    }

    #[test]
    fn test_phase_values_indexing() {
        let mut values = PhaseValues::from_fn(|p| p.index() * 10);
        assert_eq!(values[Phase::B], 10);
        values[Phase::C] += 1;
        assert_eq!(values.c, 21);

        let doubled = values.map(|v| v * 2);
        let collected: Vec<_> = doubled.iter().map(|(p, v)| (p, *v)).collect();
        assert_eq!(collected, vec![(Phase::A, 0), (Phase::B, 20), (Phase::C, 42)]);
    }
}
