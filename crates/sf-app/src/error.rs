//! Error types for the sf-app service layer.

use sf_core::ErrorKind;

/// Application error type shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Subsystem not found: {0}")]
    SubsystemNotFound(String),

    #[error("Scenario compilation failed: {0}")]
    Compile(String),

    /// Engine failure, tagged with its coarse kind.
    #[error("Simulation error ({kind:?}): {message}")]
    Simulation { kind: ErrorKind, message: String },

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Engine error kind, when the failure came from the engine.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Simulation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type for sf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sf_scenario::ScenarioError> for AppError {
    fn from(err: sf_scenario::ScenarioError) -> Self {
        match err {
            sf_scenario::ScenarioError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<sf_scenario::ValidationError> for AppError {
    fn from(err: sf_scenario::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sf_sim::SimError> for AppError {
    fn from(err: sf_sim::SimError) -> Self {
        AppError::Simulation {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<sf_coupling::CouplingError> for AppError {
    fn from(err: sf_coupling::CouplingError) -> Self {
        AppError::Simulation {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<sf_results::ResultsError> for AppError {
    fn from(err: sf_results::ResultsError) -> Self {
        match err {
            sf_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
