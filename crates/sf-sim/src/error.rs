//! Error types for simulation operations.

use sf_core::{CoreError, ErrorKind, Real};
use sf_coupling::CouplingError;
use thiserror::Error;

/// Errors encountered while configuring or running a contagion simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Coupling(#[from] CouplingError),

    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Numeric divergence at step {step}: subsystem {subsystem} {variable} = {value}")]
    NumericDivergence {
        step: usize,
        subsystem: usize,
        variable: &'static str,
        value: Real,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn configuration(what: impl Into<String>) -> Self {
        SimError::Configuration { what: what.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::Coupling(e) => e.kind(),
            SimError::Configuration { .. } => ErrorKind::Configuration,
            SimError::NumericDivergence { .. } => ErrorKind::NumericDivergence,
        }
    }
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Configuration {
            what: e.to_string(),
        }
    }
}
