use crate::CoreError;

/// Floating point type used for edge flow values.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_accepts_zero_and_negatives() {
        assert_eq!(ensure_finite(0.0, "flow").unwrap(), 0.0);
        assert_eq!(ensure_finite(-3.5, "flow").unwrap(), -3.5);
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_finite_detects_infinity() {
        assert!(matches!(
            ensure_finite(Real::INFINITY, "flow"),
            Err(CoreError::NonFinite { what: "flow", .. })
        ));
    }
}
