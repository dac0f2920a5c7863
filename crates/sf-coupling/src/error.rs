//! Coupling-specific error types.

use sf_core::{ErrorKind, Real};
use thiserror::Error;

pub type CouplingResult<T> = Result<T, CouplingError>;

/// Coupling matrix construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CouplingError {
    /// The matrix has no rows.
    #[error("Coupling matrix is empty")]
    Empty,

    /// A row's length differs from the number of rows.
    #[error("Coupling matrix is not square: row {row} has {len} entries (expected {dimension})")]
    NotSquare {
        row: usize,
        len: usize,
        dimension: usize,
    },

    /// Matrix dimension disagrees with the subsystem count of a run.
    #[error("Coupling matrix dimension {actual} does not match subsystem count {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A link refers to a subsystem that doesn't exist.
    #[error("Link {source_index} -> {target} refers to a subsystem outside 0..{dimension}")]
    LinkOutOfRange {
        source_index: usize,
        target: usize,
        dimension: usize,
    },

    /// Non-zero diagonal entry.
    #[error("Subsystem {index} couples to itself with coefficient {value}")]
    SelfCoupling { index: usize, value: Real },

    /// NaN or infinite coefficient.
    #[error("Coefficient {source_index} -> {target} is not finite: {value}")]
    NonFiniteCoefficient {
        source_index: usize,
        target: usize,
        value: Real,
    },
}

impl CouplingError {
    /// Shape errors cover the matrix dimensions, structure errors its entries.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CouplingError::Empty
            | CouplingError::NotSquare { .. }
            | CouplingError::DimensionMismatch { .. }
            | CouplingError::LinkOutOfRange { .. } => ErrorKind::Shape,
            CouplingError::SelfCoupling { .. } | CouplingError::NonFiniteCoefficient { .. } => {
                ErrorKind::Structure
            }
        }
    }
}
