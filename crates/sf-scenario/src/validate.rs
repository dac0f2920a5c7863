//! Scenario validation logic.
//!
//! Checks references and structure only. Numeric ranges and coupling
//! shape are enforced by the engine when the scenario is compiled.

use crate::LATEST_VERSION;
use crate::schema::{CouplingDef, Scenario, TopologyDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.subsystems.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "subsystems".to_string(),
            value: "0".to_string(),
            reason: "at least one subsystem is required".to_string(),
        });
    }

    if scenario.steps < 0 {
        return Err(ValidationError::InvalidValue {
            field: "steps".to_string(),
            value: scenario.steps.to_string(),
            reason: "step count must be non-negative".to_string(),
        });
    }

    let mut ids = HashSet::new();
    for subsystem in &scenario.subsystems {
        if subsystem.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "subsystems.id".to_string(),
                value: format!("{:?}", subsystem.id),
                reason: "id must not be empty".to_string(),
            });
        }
        if !ids.insert(subsystem.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: subsystem.id.clone(),
                context: "subsystems".to_string(),
            });
        }
    }

    validate_coupling(&scenario.coupling, &ids)?;

    for shock in &scenario.shocks {
        if !ids.contains(shock.subsystem.as_str()) {
            return Err(ValidationError::MissingReference {
                id: shock.subsystem.clone(),
                context: "shock subsystem".to_string(),
            });
        }
        if shock.end < shock.start {
            return Err(ValidationError::InvalidValue {
                field: format!("shocks[{}].end", shock.subsystem),
                value: shock.end.to_string(),
                reason: format!("must not precede start {}", shock.start),
            });
        }
    }

    Ok(())
}

fn validate_coupling(coupling: &CouplingDef, ids: &HashSet<&str>) -> Result<(), ValidationError> {
    match coupling {
        CouplingDef::Dense { .. } => Ok(()),
        CouplingDef::Links { links } => {
            for link in links {
                for (id, context) in [(&link.from, "link from"), (&link.to, "link to")] {
                    if !ids.contains(id.as_str()) {
                        return Err(ValidationError::MissingReference {
                            id: id.clone(),
                            context: context.to_string(),
                        });
                    }
                }
            }
            Ok(())
        }
        CouplingDef::Preset { topology, hub, .. } => match (topology, hub) {
            (TopologyDef::Star, None) => Err(ValidationError::InvalidValue {
                field: "coupling.hub".to_string(),
                value: "none".to_string(),
                reason: "star topology requires a hub".to_string(),
            }),
            (_, Some(hub)) if !ids.contains(hub.as_str()) => {
                Err(ValidationError::MissingReference {
                    id: hub.clone(),
                    context: "coupling hub".to_string(),
                })
            }
            _ => Ok(()),
        },
    }
}
