//! Non-finite value handling after each step.

use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::options::DivergencePolicy;
use crate::state::SystemCollection;

/// Apply `policy` to the collection produced for `step`.
///
/// `warned` keeps the policy from logging more than once per run.
pub(crate) fn resolve(
    step: usize,
    next: SystemCollection,
    policy: DivergencePolicy,
    warned: &mut bool,
) -> SimResult<SystemCollection> {
    let Some((subsystem, variable, value)) = next.first_non_finite() else {
        return Ok(match policy {
            DivergencePolicy::Clamp { bound } => next.map(|s| s.saturated(bound)),
            _ => next,
        });
    };

    let diverged = SimError::NumericDivergence {
        step,
        subsystem,
        variable,
        value,
    };

    match policy {
        DivergencePolicy::Abort => Err(diverged),
        DivergencePolicy::Continue => {
            if !*warned {
                warn!(%diverged, "continuing past non-finite value");
                *warned = true;
            }
            Ok(next)
        }
        DivergencePolicy::Clamp { bound } => {
            let clamped = next.map(|s| s.saturated(bound));
            if clamped.first_non_finite().is_some() {
                return Err(diverged);
            }
            if !*warned {
                warn!(%diverged, bound, "saturated non-finite value");
                *warned = true;
            }
            Ok(clamped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SubsystemState;

    fn diverged() -> SystemCollection {
        SystemCollection::from_states(vec![
            SubsystemState::new(1.0, 0.0, 0.0, 1.0),
            SubsystemState::new(f64::INFINITY, 0.0, 0.0, 1.0),
        ])
    }

    #[test]
    fn abort_reports_first_offender() {
        let mut warned = false;
        let err = resolve(7, diverged(), DivergencePolicy::Abort, &mut warned).unwrap_err();
        assert_eq!(
            err,
            SimError::NumericDivergence {
                step: 7,
                subsystem: 1,
                variable: "flow",
                value: f64::INFINITY,
            }
        );
    }

    #[test]
    fn continue_keeps_values_and_warns_once() {
        let mut warned = false;
        let kept = resolve(1, diverged(), DivergencePolicy::Continue, &mut warned).unwrap();
        assert!(warned);
        assert_eq!(kept[1].flow(), f64::INFINITY);
    }

    #[test]
    fn clamp_saturates_infinity() {
        let mut warned = false;
        let policy = DivergencePolicy::Clamp { bound: 100.0 };
        let clamped = resolve(1, diverged(), policy, &mut warned).unwrap();
        assert_eq!(clamped[1].flow(), 100.0);
        assert_eq!(clamped[1].pressure(), 100.0);
    }

    #[test]
    fn clamp_cannot_rescue_nan() {
        let mut warned = false;
        let nan = SystemCollection::from_states(vec![SubsystemState::new(0.0, 0.0, f64::NAN, 1.0)]);
        let err = resolve(3, nan, DivergencePolicy::Clamp { bound: 1.0 }, &mut warned).unwrap_err();
        assert!(matches!(
            err,
            SimError::NumericDivergence {
                step: 3,
                variable: "drift",
                ..
            }
        ));
    }
}
