use crate::CoreError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// Absolute tolerance used when checking `P = F - C`.
pub const PRESSURE_TOLERANCE: Real = 1e-9;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Require a finite value inside the closed interval `[lo, hi]`.
///
/// `expected` is a human-readable description of the range used in the error.
pub fn ensure_in_range(
    v: Real,
    lo: Real,
    hi: Real,
    what: &'static str,
    expected: &'static str,
) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < lo || v > hi {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            expected,
        });
    }
    Ok(v)
}

/// Require a finite, non-negative value.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, CoreError> {
    ensure_in_range(v, 0.0, Real::INFINITY, what, ">= 0")
}
