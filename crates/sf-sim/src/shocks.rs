//! Deterministic exogenous shocks.

use sf_core::Real;

use crate::error::{SimError, SimResult};

/// Exogenous additions applied to one subsystem during one transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shock {
    /// Added to `F[t+1]`.
    pub flow: Real,
    /// Added to `C[t+1]`.
    pub capacity: Real,
}

/// A shock applied to `subsystem` for every transition `t -> t+1` with `start <= t < end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShockPulse {
    pub subsystem: usize,
    pub start: usize,
    pub end: usize,
    pub flow: Real,
    pub capacity: Real,
}

/// Ordered set of shock pulses. Empty by default, which leaves the update rule untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShockSchedule {
    pulses: Vec<ShockPulse>,
}

impl ShockSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow "bubble" injected into one subsystem for the first `steps` transitions.
    pub fn pulse(subsystem: usize, steps: usize, flow: Real) -> Self {
        Self::new().with(ShockPulse {
            subsystem,
            start: 0,
            end: steps,
            flow,
            capacity: 0.0,
        })
    }

    pub fn with(mut self, pulse: ShockPulse) -> Self {
        self.pulses.push(pulse);
        self
    }

    pub fn add(&mut self, pulse: ShockPulse) -> &mut Self {
        self.pulses.push(pulse);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    pub fn pulses(&self) -> &[ShockPulse] {
        &self.pulses
    }

    pub fn validate(&self, subsystems: usize) -> SimResult<()> {
        for (k, pulse) in self.pulses.iter().enumerate() {
            if pulse.subsystem >= subsystems {
                return Err(SimError::configuration(format!(
                    "shock {k} targets subsystem {} but only {subsystems} exist",
                    pulse.subsystem
                )));
            }
            if pulse.start > pulse.end {
                return Err(SimError::configuration(format!(
                    "shock {k} starts at {} after it ends at {}",
                    pulse.start, pulse.end
                )));
            }
            if !(pulse.flow.is_finite() && pulse.capacity.is_finite()) {
                return Err(SimError::configuration(format!(
                    "shock {k} has a non-finite magnitude"
                )));
            }
        }
        Ok(())
    }

    /// Combined shocks for the transition out of `step`, one per subsystem.
    pub fn shocks_at(&self, step: usize, subsystems: usize) -> Vec<Shock> {
        let mut shocks = vec![Shock::default(); subsystems];
        for pulse in &self.pulses {
            if (pulse.start..pulse.end).contains(&step)
                && let Some(shock) = shocks.get_mut(pulse.subsystem)
            {
                shock.flow += pulse.flow;
                shock.capacity += pulse.capacity;
            }
        }
        shocks
    }
}
