//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub steps: usize,
    pub subsystem_ids: Vec<String>,
    pub engine_version: String,
}

/// All subsystems at one step. Non-finite values are stored as `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub subsystems: Vec<SubsystemSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubsystemSnapshot {
    pub id: String,
    pub flow: Option<f64>,
    pub capacity: Option<f64>,
    pub pressure: Option<f64>,
    pub drift: Option<f64>,
    pub trust: Option<f64>,
}

impl SubsystemSnapshot {
    pub fn from_values(id: impl Into<String>, values: (f64, f64, f64, f64, f64)) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        let (flow, capacity, pressure, drift, trust) = values;
        Self {
            id: id.into(),
            flow: finite(flow),
            capacity: finite(capacity),
            pressure: finite(pressure),
            drift: finite(drift),
            trust: finite(trust),
        }
    }
}
