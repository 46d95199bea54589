//! System matrix assembly and dense LU solving.

use num_complex::Complex64;

use crate::circuit::PhaseImpedances;
use crate::error::{MainsError, Result};

/// Number of unknowns: three phase currents and the load current.
pub const SYSTEM_SIZE: usize = 4;

/// Row/column of the grounded load in the system matrix.
pub const LOAD_INDEX: usize = 3;

/// Coefficient matrix of the four-wire network, `Z · I = V`.
///
/// Rows are the node equations for phases A, B, C and the load node;
/// columns are the unknown branch currents in the same order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemMatrix {
    /// Coefficients, row-major
    pub a: [[Complex64; SYSTEM_SIZE]; SYSTEM_SIZE],
}

impl SystemMatrix {
    /// Assemble the matrix for the shared-neutral topology.
    ///
    /// ```text
    /// [ Za+2Zf   Zf      Zf      Za        ]
    /// [ Zf       Zb+2Zf  Zf      0         ]
    /// [ Zf       Zf      Zc+2Zf  -Zc       ]
    /// [ Za       0       -Zc     Zl+Zb+Zc  ]
    /// ```
    ///
    /// where `Zf` is the neutral wire and `Zl` the grounded load. The load
    /// couples to phase A directly, to phase C with a negative sign and
    /// not at all to phase B. This sign pattern follows the physical
    /// wiring and must not be symmetrised.
    pub fn build(impedances: &PhaseImpedances, neutral: Complex64, load: Complex64) -> Self {
        let zero = Complex64::new(0.0, 0.0);
        let (za, zb, zc) = (impedances.a, impedances.b, impedances.c);
        let zf = neutral;
        let two_zf = zf * 2.0;

        Self {
            a: [
                [za + two_zf, zf, zf, za],
                [zf, zb + two_zf, zf, zero],
                [zf, zf, zc + two_zf, -zc],
                [za, zero, -zc, load + zb + zc],
            ],
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.a[row][col]
    }

    /// Matrix-vector product `Z · x`.
    pub fn apply(&self, x: &[Complex64; SYSTEM_SIZE]) -> [Complex64; SYSTEM_SIZE] {
        let mut out = [Complex64::new(0.0, 0.0); SYSTEM_SIZE];
        for (row, value) in self.a.iter().zip(out.iter_mut()) {
            *value = row.iter().zip(x.iter()).map(|(a, b)| a * b).sum();
        }
        out
    }

    /// Largest residual magnitude `|Z · x - b|` over all rows.
    pub fn residual(&self, x: &[Complex64; SYSTEM_SIZE], b: &[Complex64; SYSTEM_SIZE]) -> f64 {
        self.apply(x)
            .iter()
            .zip(b.iter())
            .map(|(lhs, rhs)| (lhs - rhs).norm())
            .fold(0.0, f64::max)
    }

    /// Largest coefficient magnitude, used to scale the pivot test.
    fn scale(&self) -> f64 {
        self.a
            .iter()
            .flat_map(|row| row.iter())
            .map(|v| v.norm())
            .fold(0.0, f64::max)
    }

    /// Perform LU decomposition with partial pivoting.
    ///
    /// A pivot whose magnitude falls below `tolerance` times the largest
    /// coefficient is reported as a singular matrix.
    pub fn factor(&self, tolerance: f64) -> Result<LuFactors> {
        let n = SYSTEM_SIZE;
        let scale = self.scale();
        if scale == 0.0 || !scale.is_finite() {
            return Err(MainsError::SingularMatrix { pivot: 0.0 });
        }

        let mut lu = self.a;
        let mut pivots = [0, 1, 2, 3];
        let mut sign = 1.0;

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k][k].norm();
            let mut max_row = k;
            for (i, row) in lu.iter().enumerate().skip(k + 1) {
                let val = row[k].norm();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            let relative = max_val / scale;
            if relative < tolerance {
                return Err(MainsError::SingularMatrix { pivot: relative });
            }
            tracing::trace!(column = k, row = max_row, relative, "pivot");

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                lu.swap(k, max_row);
                sign = -sign;
            }

            // Eliminate
            let pivot = lu[k][k];
            for i in (k + 1)..n {
                let factor = lu[i][k] / pivot;
                lu[i][k] = factor;
                for j in (k + 1)..n {
                    let upper = lu[k][j];
                    lu[i][j] -= factor * upper;
                }
            }
        }

        Ok(LuFactors { lu, pivots, sign })
    }

    /// Factor and solve in one step.
    pub fn solve(
        &self,
        rhs: &[Complex64; SYSTEM_SIZE],
        tolerance: f64,
    ) -> Result<[Complex64; SYSTEM_SIZE]> {
        self.factor(tolerance)?.solve(rhs)
    }
}

/// LU decomposition of a [`SystemMatrix`] (L unit-diagonal, packed with U).
#[derive(Debug, Clone, Copy)]
pub struct LuFactors {
    lu: [[Complex64; SYSTEM_SIZE]; SYSTEM_SIZE],
    pivots: [usize; SYSTEM_SIZE],
    /// +1 or -1 depending on the number of row swaps
    sign: f64,
}

impl LuFactors {
    /// Solve the system using the pre-computed LU decomposition.
    pub fn solve(&self, rhs: &[Complex64; SYSTEM_SIZE]) -> Result<[Complex64; SYSTEM_SIZE]> {
        let n = SYSTEM_SIZE;
        let mut x = [Complex64::new(0.0, 0.0); SYSTEM_SIZE];

        // Apply pivot permutation
        for (i, value) in x.iter_mut().enumerate() {
            *value = rhs[self.pivots[i]];
        }

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                let lower = self.lu[i][j] * x[j];
                x[i] -= lower;
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let upper = self.lu[i][j] * x[j];
                x[i] -= upper;
            }
            x[i] /= self.lu[i][i];
        }

        if x.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
            return Err(MainsError::NumericalOverflow {
                quantity: "branch currents".to_string(),
            });
        }

        Ok(x)
    }

    /// Determinant of the factored matrix.
    pub fn determinant(&self) -> Complex64 {
        let diag: Complex64 = (0..SYSTEM_SIZE).map(|i| self.lu[i][i]).product();
        diag * self.sign
    }
}
