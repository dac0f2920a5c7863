//! Content-based hashing for run IDs.

use sf_scenario::Scenario;
use sha2::{Digest, Sha256};

pub fn compute_run_id(scenario: &Scenario, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_scenario::schema::*;

    fn scenario(steps: i64) -> Scenario {
        Scenario {
            version: 1,
            name: "hash".to_string(),
            subsystems: vec![SubsystemDef {
                id: "s".to_string(),
                name: String::new(),
                flow: 1.0,
                capacity: 0.5,
                drift: 0.0,
                trust: 1.0,
                pressure: None,
            }],
            coupling: CouplingDef::Dense {
                rows: vec![vec![0.0]],
            },
            parameters: ParametersDef {
                capacity_rate: 0.2,
                drift_decay: 0.1,
                drift_gain: 0.3,
                trust_rate: 0.1,
                correction_rate: 0.4,
                contagion_strength: 1.0,
                trust_recovery: 0.0,
            },
            options: OptionsDef::default(),
            shocks: vec![],
            steps,
        }
    }

    #[test]
    fn hash_stability() {
        let a = compute_run_id(&scenario(10), "v1");
        let b = compute_run_id(&scenario(10), "v1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        assert_ne!(
            compute_run_id(&scenario(10), "v1"),
            compute_run_id(&scenario(11), "v1")
        );
        assert_ne!(
            compute_run_id(&scenario(10), "v1"),
            compute_run_id(&scenario(10), "v2")
        );
    }
}
