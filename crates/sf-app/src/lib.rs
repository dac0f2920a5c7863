//! Shared application service layer for strainflow.
//!
//! Frontends go through this crate to load scenarios, compile them into
//! simulator inputs, execute or reuse cached runs, and query results.

pub mod error;
pub mod metrics;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod runtime_compile;
pub mod scenario_service;

pub use error::{AppError, AppResult};
pub use metrics::{
    DEFAULT_TRUST_THRESHOLD, RunMetrics, SubsystemMetrics, TrustBreach, compute_run_metrics,
};
pub use progress::{RunProgressEvent, RunStage};
pub use query::{RunSummary, extract_series, get_run_summary, list_subsystem_ids};
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run,
    ensure_run_with_progress, list_runs, load_run, simulate_scenario,
};
pub use runtime_compile::{ScenarioRuntime, compile_scenario};
pub use scenario_service::{ScenarioSummary, load_scenario, save_scenario, summarize_scenario};
