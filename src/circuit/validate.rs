//! Parameter validation.

use num_complex::Complex64;

use crate::error::{MainsError, Result};

/// Reject NaN and infinite scalars.
pub fn ensure_finite(param: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MainsError::non_finite(param, value))
    }
}

/// Reject complex values with a NaN or infinite component.
pub fn ensure_finite_complex(param: &str, value: Complex64) -> Result<Complex64> {
    if !value.re.is_finite() {
        return Err(MainsError::non_finite(format!("{param} (real part)"), value.re));
    }
    if !value.im.is_finite() {
        return Err(MainsError::non_finite(format!("{param} (imaginary part)"), value.im));
    }
    Ok(value)
}

/// Validate an impedance that will be inverted.
///
/// Checks:
/// - Both parts are finite
/// - The value is not exactly zero
pub fn ensure_invertible(name: &str, impedance: Complex64) -> Result<Complex64> {
    ensure_finite_complex(name, impedance)?;
    if impedance.re == 0.0 && impedance.im == 0.0 {
        return Err(MainsError::ZeroImpedance {
            device: name.to_string(),
        });
    }
    Ok(impedance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_finite_checks() {
        assert!(ensure_finite("v", 127.0).is_ok());
        assert!(matches!(
            ensure_finite("v", f64::NAN),
            Err(MainsError::NonFiniteParameter { .. })
        ));

        let err = ensure_finite_complex("zf", Complex64::new(0.1, f64::INFINITY)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("imaginary"));
    }

    #[test]
    fn test_zero_impedance_rejected() {
        let err = ensure_invertible("lamp", Complex64::new(-0.0, 0.0)).unwrap_err();
        assert!(matches!(err, MainsError::ZeroImpedance { ref device } if device == "lamp"));
        assert!(ensure_invertible("lamp", Complex64::new(0.0, 1e-9)).is_ok());
    }
}
