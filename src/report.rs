//! Text reports for the CLI frontend.
//!
//! Writes solved quantities in polar form (`62.48 A ∠ -54.01°`) and
//! harmonic tables as plain text or CSV.

use std::fmt;
use std::io::Write;

use num_complex::Complex64;

use crate::error::Result;
use crate::harmonics::HarmonicTable;
use crate::solver::NetworkSolution;

/// A phasor displayed as magnitude and angle in degrees.
pub struct Polar {
    pub value: Complex64,
    pub unit: &'static str,
}

impl Polar {
    pub fn new(value: Complex64, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Polar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (magnitude, angle) = self.value.to_polar();
        write!(f, "{:.2} {} \u{2220} {:.2}\u{b0}", magnitude, self.unit, angle.to_degrees())
    }
}

/// Write the full network report.
pub fn write_network_report<W: Write>(out: &mut W, solution: &NetworkSolution) -> Result<()> {
    let currents = &solution.currents;
    let derived = &solution.derived;

    writeln!(out, "[1] Equivalent impedance per phase")?;
    for (phase, z) in solution.impedances.iter() {
        writeln!(out, "  Z{}: {}", phase, Polar::new(*z, "\u{3a9}"))?;
    }

    writeln!(out)?;
    writeln!(out, "[2] Currents")?;
    writeln!(out, "  Neutral: {}", Polar::new(derived.neutral_current, "A"))?;
    for (phase, i) in currents.phases.iter() {
        writeln!(out, "  Phase {}: {}", phase, Polar::new(*i, "A"))?;
    }
    writeln!(out, "  Load: {}", Polar::new(currents.load, "A"))?;

    writeln!(out)?;
    writeln!(out, "[3] Voltages")?;
    writeln!(out, "  Neutral drop: {}", Polar::new(derived.neutral_voltage_drop, "V"))?;
    for (phase, v) in derived.phase_voltages.iter() {
        writeln!(out, "  Phase {}: {}", phase, Polar::new(*v, "V"))?;
    }
    writeln!(out, "  Load: {}", Polar::new(derived.load_voltage, "V"))?;
    Ok(())
}

/// Write the amplitude of every order at one checkpoint angle.
pub fn write_checkpoint<W: Write>(out: &mut W, table: &HarmonicTable, angle: f64) -> Result<()> {
    match table.checkpoint(angle) {
        Some(values) => {
            writeln!(out, "Amplitudes at {:.2}\u{b0}:", angle.to_degrees())?;
            for (order, amplitude) in values {
                writeln!(out, "  {:>4}: {:.4} V", order.to_string(), amplitude)?;
            }
        }
        None => {
            writeln!(out, "No sweep point at {:.2}\u{b0}", angle.to_degrees())?;
        }
    }
    Ok(())
}

/// Write the whole table as CSV: one row per angle (degrees), one column per order.
pub fn write_csv<W: Write>(out: &mut W, table: &HarmonicTable) -> Result<()> {
    write!(out, "angle_deg")?;
    for curve in &table.curves {
        write!(out, ",{}", curve.order)?;
    }
    writeln!(out)?;

    for (i, degrees) in table.sweep.degrees().iter().enumerate() {
        write!(out, "{:.6}", degrees)?;
        for curve in &table.curves {
            write!(out, ",{:.6}", curve.amplitudes[i])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmonics::HarmonicConfig;
    use crate::scenario::Scenario;
    use std::f64::consts::PI;

    #[test]
    fn test_polar_format() {
        let p = Polar::new(Complex64::new(0.0, 2.0), "A");
        assert_eq!(p.to_string(), "2.00 A \u{2220} 90.00\u{b0}");
    }

    #[test]
    fn test_network_report() {
        let solution = Scenario::reference().solve().unwrap();
        let mut out = Vec::new();
        write_network_report(&mut out, &solution).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Neutral: 52.23 A"));
        assert!(text.contains("Phase A: 62.48 A \u{2220} -54.01\u{b0}"));
        assert!(text.contains("Load: 135.77 V"));
    }

    #[test]
    fn test_checkpoint_and_csv() {
        let table = HarmonicConfig::new().with_points(3).evaluate().unwrap();

        let mut out = Vec::new();
        write_checkpoint(&mut out, &table, PI / 2.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("H1: 131.0571 V"));

        let mut out = Vec::new();
        write_csv(&mut out, &table).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "angle_deg,H1,H3,H5,H7,H9,H11,H13");
        assert!(lines[3].starts_with("90.000000,131.057100"));
    }
}
