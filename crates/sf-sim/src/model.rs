//! DiscreteModel trait for pluggable step-driven systems.

use crate::error::SimResult;

/// Trait for discrete-time models driven by [`crate::run_model`].
///
/// A DiscreteModel must implement:
/// - State type (Clone, for trajectory snapshots)
/// - Initial state at step 0
/// - Advance: x[t+1] = f(t, x[t])
pub trait DiscreteModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the state at step 0.
    fn initial_state(&self) -> Self::State;

    /// Compute the state at step `t + 1` from the state at step `t`.
    ///
    /// Takes `&mut self` so models can keep per-run bookkeeping.
    fn advance(&mut self, t: usize, x: &Self::State) -> SimResult<Self::State>;
}
