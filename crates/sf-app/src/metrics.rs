//! Summary metrics over persisted step records.
//!
//! Values stored as `None` (non-finite at run time) are ignored. A metric
//! with no finite input stays `None`.

use serde::{Deserialize, Serialize};
use sf_results::StepRecord;

/// Trust level below which a subsystem counts as having lost confidence.
pub const DEFAULT_TRUST_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SubsystemMetrics {
    pub id: String,
    pub peak_pressure: Option<f64>,
    pub peak_drift: Option<f64>,
    pub final_drift: Option<f64>,
    pub min_trust: Option<f64>,
    /// Initial trust minus minimum trust.
    pub trust_loss: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrustBreach {
    pub step: usize,
    pub subsystem_id: String,
    pub trust: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RunMetrics {
    pub subsystems: Vec<SubsystemMetrics>,
    /// Largest `max P - min P` across subsystems at any one step.
    pub max_pressure_spread: Option<f64>,
    pub max_spread_step: Option<usize>,
    pub trust_threshold: f64,
    /// First subsystem whose trust drops below the threshold.
    pub trust_breach: Option<TrustBreach>,
}

impl RunMetrics {
    pub fn subsystem(&self, id: &str) -> Option<&SubsystemMetrics> {
        self.subsystems.iter().find(|m| m.id == id)
    }
}

fn fold_max(acc: Option<f64>, v: f64) -> Option<f64> {
    Some(acc.map_or(v, |a| a.max(v)))
}

fn fold_min(acc: Option<f64>, v: f64) -> Option<f64> {
    Some(acc.map_or(v, |a| a.min(v)))
}

pub fn compute_run_metrics(records: &[StepRecord], trust_threshold: f64) -> RunMetrics {
    let Some(first) = records.first() else {
        return RunMetrics {
            trust_threshold,
            ..RunMetrics::default()
        };
    };

    let mut subsystems: Vec<SubsystemMetrics> = first
        .subsystems
        .iter()
        .map(|s| SubsystemMetrics {
            id: s.id.clone(),
            ..SubsystemMetrics::default()
        })
        .collect();
    let initial_trust: Vec<Option<f64>> = first.subsystems.iter().map(|s| s.trust).collect();

    let mut metrics = RunMetrics {
        trust_threshold,
        ..RunMetrics::default()
    };

    for record in records {
        let mut lo: Option<f64> = None;
        let mut hi: Option<f64> = None;

        for (m, snap) in subsystems.iter_mut().zip(&record.subsystems) {
            if let Some(p) = snap.pressure {
                m.peak_pressure = fold_max(m.peak_pressure, p);
                lo = fold_min(lo, p);
                hi = fold_max(hi, p);
            }
            if let Some(d) = snap.drift {
                m.peak_drift = fold_max(m.peak_drift, d);
                m.final_drift = Some(d);
            }
            if let Some(t) = snap.trust {
                m.min_trust = fold_min(m.min_trust, t);
                if metrics.trust_breach.is_none() && t < trust_threshold {
                    metrics.trust_breach = Some(TrustBreach {
                        step: record.step,
                        subsystem_id: snap.id.clone(),
                        trust: t,
                    });
                }
            }
        }

        if let (Some(lo), Some(hi)) = (lo, hi) {
            let spread = hi - lo;
            if metrics.max_pressure_spread.is_none_or(|best| spread > best) {
                metrics.max_pressure_spread = Some(spread);
                metrics.max_spread_step = Some(record.step);
            }
        }
    }

    for (m, t0) in subsystems.iter_mut().zip(initial_trust) {
        if let (Some(t0), Some(min)) = (t0, m.min_trust) {
            m.trust_loss = Some(t0 - min);
        }
    }

    metrics.subsystems = subsystems;
    metrics
}
