//! Model parameters shared by every subsystem and step of a run.

use sf_core::{Real, ensure_in_range, ensure_non_negative};

use crate::error::SimResult;

/// Structural rates of the update rule.
///
/// No `Default`: every run states its parameters.
///
/// Valid ranges (checked by [`Parameters::validate`]):
/// - `capacity_rate`, `drift_decay`, `trust_recovery` in `[0, 1]`
/// - `drift_gain`, `trust_rate`, `correction_rate`, `contagion_strength` finite and `>= 0`
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    /// How fast capacity tracks flow.
    pub capacity_rate: Real,
    /// Drift decay `δ` in `D' = (1 - δ) D + α P_eff`.
    pub drift_decay: Real,
    /// Drift gain `α`.
    pub drift_gain: Real,
    /// Trust lost per unit of drift increase.
    pub trust_rate: Real,
    /// How strongly drift pulls flow back toward equilibrium.
    pub correction_rate: Real,
    /// Scalar applied to every coupling coefficient.
    pub contagion_strength: Real,
    /// Per-step recovery of trust toward 1, `+ r (1 - T)`. Zero disables recovery.
    pub trust_recovery: Real,
}

impl Parameters {
    pub fn new(
        capacity_rate: Real,
        drift_decay: Real,
        drift_gain: Real,
        trust_rate: Real,
        correction_rate: Real,
        contagion_strength: Real,
    ) -> Self {
        Self {
            capacity_rate,
            drift_decay,
            drift_gain,
            trust_rate,
            correction_rate,
            contagion_strength,
            trust_recovery: 0.0,
        }
    }

    pub fn with_trust_recovery(mut self, trust_recovery: Real) -> Self {
        self.trust_recovery = trust_recovery;
        self
    }

    pub fn with_contagion_strength(mut self, contagion_strength: Real) -> Self {
        self.contagion_strength = contagion_strength;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_in_range(self.capacity_rate, 0.0, 1.0, "capacity_rate", "[0, 1]")?;
        ensure_in_range(self.drift_decay, 0.0, 1.0, "drift_decay", "[0, 1]")?;
        ensure_non_negative(self.drift_gain, "drift_gain")?;
        ensure_non_negative(self.trust_rate, "trust_rate")?;
        ensure_non_negative(self.correction_rate, "correction_rate")?;
        ensure_non_negative(self.contagion_strength, "contagion_strength")?;
        ensure_in_range(self.trust_recovery, 0.0, 1.0, "trust_recovery", "[0, 1]")?;
        Ok(())
    }
}
