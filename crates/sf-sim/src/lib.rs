//! Multi-system contagion simulation for strainflow.
//!
//! Provides:
//! - Five-variable subsystem state (flow, capacity, pressure, drift, trust)
//! - The per-step update rule with diffusion-style pressure contagion
//! - A fixed-step simulator that assembles the trajectory
//! - Divergence and trust-bound policies
//! - Deterministic exogenous shock schedules

pub mod contagion;
pub mod error;
pub mod model;
pub mod options;
pub mod params;
pub mod rule;
pub mod shocks;
pub mod sim;
pub mod state;
pub mod trajectory;

// Internal modules
mod divergence;

// Re-exports for public API
pub use contagion::ContagionModel;
pub use error::{SimError, SimResult};
pub use model::DiscreteModel;
pub use options::{DivergencePolicy, SimOptions, TrustBounds};
pub use params::Parameters;
pub use shocks::{Shock, ShockPulse, ShockSchedule};
pub use sim::{SimProgress, Simulator, run, run_isolated, run_model, run_with_options};
pub use state::{InitialCondition, SubsystemState, SystemCollection};
pub use trajectory::Trajectory;
