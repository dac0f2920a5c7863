//! Bundled scenarios must pass every engine check and run to completion.

use std::path::{Path, PathBuf};

use sf_app::{run_service, scenario_service};
use sf_core::ErrorKind;

const BUNDLED: [&str; 2] = ["two_sector_bubble.yaml", "ring_recovery.yaml"];

fn scenarios_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios")
}

#[test]
fn bundled_scenarios_validate_and_run() {
    for name in BUNDLED {
        let path = scenarios_dir().join(name);
        let scenario = scenario_service::load_scenario(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        scenario_service::validate_scenario(&scenario)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));

        let trajectory = run_service::simulate_scenario(&scenario)
            .unwrap_or_else(|e| panic!("Failed to run {}: {}", name, e));
        assert_eq!(trajectory.len(), scenario.steps as usize + 1, "{}", name);
        assert_eq!(trajectory.subsystem_count(), scenario.subsystems.len(), "{}", name);
    }
}

#[test]
fn out_of_range_trust_caught_beyond_reference_checks() {
    let path = scenarios_dir().join("two_sector_bubble.yaml");
    let mut scenario = scenario_service::load_scenario(&path).unwrap();
    scenario.subsystems[0].trust = 1.5;

    sf_scenario::validate_scenario(&scenario).unwrap();
    let err = scenario_service::validate_scenario(&scenario).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Configuration));
}
