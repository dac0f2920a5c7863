use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Coarse classification shared by every engine error type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Coupling matrix is not square or its dimension disagrees with N.
    Shape,
    /// Coupling matrix has a forbidden entry (self-coupling, non-finite).
    Structure,
    /// Caller-supplied counts, parameters or initial values are invalid.
    Configuration,
    /// A produced state contains a non-finite value.
    NumericDivergence,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value} (expected {expected})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },
}
