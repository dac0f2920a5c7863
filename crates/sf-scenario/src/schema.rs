//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub subsystems: Vec<SubsystemDef>,
    pub coupling: CouplingDef,
    pub parameters: ParametersDef,
    #[serde(default)]
    pub options: OptionsDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shocks: Vec<ShockDef>,
    /// Signed so that a negative count in a file is reported, not a parse error.
    pub steps: i64,
}

impl Scenario {
    pub fn subsystem_index(&self, id: &str) -> Option<usize> {
        self.subsystems.iter().position(|s| s.id == id)
    }

    pub fn subsystem_ids(&self) -> Vec<&str> {
        self.subsystems.iter().map(|s| s.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubsystemDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub flow: f64,
    pub capacity: f64,
    pub drift: f64,
    pub trust: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouplingDef {
    /// Row `i` holds the outgoing coefficients of subsystem `i`.
    Dense { rows: Vec<Vec<f64>> },
    Links {
        #[serde(default)]
        links: Vec<LinkDef>,
    },
    Preset {
        topology: TopologyDef,
        coefficient: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hub: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkDef {
    pub from: String,
    pub to: String,
    pub weight: f64,
    /// Also add the reverse link with the same weight.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub both: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TopologyDef {
    AllToAll,
    Ring,
    Chain,
    Star,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParametersDef {
    pub capacity_rate: f64,
    pub drift_decay: f64,
    pub drift_gain: f64,
    pub trust_rate: f64,
    pub correction_rate: f64,
    pub contagion_strength: f64,
    #[serde(default)]
    pub trust_recovery: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptionsDef {
    #[serde(default)]
    pub divergence: DivergenceDef,
    #[serde(default)]
    pub trust_bounds: TrustBoundsDef,
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DivergenceDef {
    #[default]
    Abort,
    Continue,
    Clamp {
        bound: f64,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrustBoundsDef {
    #[default]
    Unbounded,
    Clamp,
}

/// Additive perturbation applied to one subsystem on steps `start..end`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShockDef {
    pub subsystem: String,
    #[serde(default)]
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub flow: f64,
    #[serde(default)]
    pub capacity: f64,
}
