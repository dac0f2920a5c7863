//! Run behaviour: divergence handling, trust bounds, parallelism.

use sf_core::Real;

use crate::error::{SimError, SimResult};

/// What to do when a step produces a non-finite value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DivergencePolicy {
    /// Stop with `SimError::NumericDivergence` at the first non-finite value.
    #[default]
    Abort,
    /// Keep non-finite values in the trajectory and carry on.
    Continue,
    /// Saturate F, C, D and T into `[-bound, bound]` after every step.
    /// NaN cannot be saturated and still aborts.
    Clamp { bound: Real },
}

/// Whether produced trust values are held inside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrustBounds {
    /// Trust follows the update rule exactly and may leave `[0, 1]`.
    #[default]
    Unbounded,
    /// Produced trust is clamped to `[0, 1]`.
    Clamp,
}

impl TrustBounds {
    pub fn apply(self, trust: Real) -> Real {
        match self {
            TrustBounds::Unbounded => trust,
            TrustBounds::Clamp => trust.clamp(0.0, 1.0),
        }
    }
}

/// Options for simulation runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimOptions {
    /// Recovery policy for non-finite values (default: abort)
    pub divergence: DivergencePolicy,
    /// Trust clamping (default: none)
    pub trust_bounds: TrustBounds,
    /// Update subsystems of one step on the rayon pool
    pub parallel: bool,
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if let DivergencePolicy::Clamp { bound } = self.divergence
            && !(bound.is_finite() && bound > 0.0)
        {
            return Err(SimError::configuration(format!(
                "clamp bound must be finite and positive, got {bound}"
            )));
        }
        Ok(())
    }
}
