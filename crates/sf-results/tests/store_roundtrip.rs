use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sf_results::{ResultsError, RunManifest, RunStore, StepRecord, SubsystemSnapshot};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(run_id: &str, scenario: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        scenario_name: scenario.to_string(),
        timestamp: timestamp.to_string(),
        steps: 1,
        subsystem_ids: vec!["a".to_string()],
        engine_version: "0.1.0".to_string(),
    }
}

fn records() -> Vec<StepRecord> {
    (0..2)
        .map(|step| StepRecord {
            step,
            subsystems: vec![SubsystemSnapshot::from_values(
                "a",
                (1.0, 0.5, 0.5, 0.1 * step as f64, 0.9),
            )],
        })
        .collect()
}

#[test]
fn save_list_load_roundtrip() {
    let scenario_dir = unique_temp_dir("sf_results_scenario");
    fs::create_dir_all(&scenario_dir).expect("failed to create temp scenario dir");
    let scenario_path = scenario_dir.join("scenario.yaml");
    fs::write(&scenario_path, "version: 1\n").expect("failed to write scenario file");

    let store = RunStore::for_scenario(&scenario_path).expect("failed to create run store");
    assert!(store.root_dir().ends_with(".strainflow/runs"));

    let m = manifest("run-123", "pair", "2026-10-01T00:00:00Z");
    store.save_run(&m, &records()).expect("failed to save run");
    assert!(store.has_run("run-123"));

    let runs = store.list_runs("pair").expect("failed to list runs");
    assert_eq!(runs, vec![m.clone()]);
    assert!(store.list_runs("other").unwrap().is_empty());

    assert_eq!(store.load_manifest("run-123").unwrap(), m);
    assert_eq!(store.load_steps("run-123").unwrap(), records());
}

#[test]
fn list_runs_newest_first() {
    let store = RunStore::new(unique_temp_dir("sf_results_order")).unwrap();
    store
        .save_run(&manifest("old", "s", "2026-01-01T00:00:00Z"), &records())
        .unwrap();
    store
        .save_run(&manifest("new", "s", "2026-06-01T00:00:00Z"), &records())
        .unwrap();

    let ids: Vec<String> = store
        .list_runs("s")
        .unwrap()
        .into_iter()
        .map(|m| m.run_id)
        .collect();
    assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);
    assert_eq!(store.list_all_runs().unwrap().len(), 2);
}

#[test]
fn missing_and_deleted_runs() {
    let store = RunStore::new(unique_temp_dir("sf_results_delete")).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));

    store
        .save_run(&manifest("gone", "s", "2026-01-01T00:00:00Z"), &records())
        .unwrap();
    store.delete_run("gone").unwrap();
    assert!(!store.has_run("gone"));
    assert!(matches!(
        store.load_steps("gone"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn non_finite_values_survive_as_null() {
    let store = RunStore::new(unique_temp_dir("sf_results_nonfinite")).unwrap();
    let record = StepRecord {
        step: 0,
        subsystems: vec![SubsystemSnapshot::from_values(
            "a",
            (f64::INFINITY, 0.0, f64::INFINITY, f64::NAN, 0.5),
        )],
    };
    store
        .save_run(&manifest("inf", "s", "2026-01-01T00:00:00Z"), &[record.clone()])
        .unwrap();

    let loaded = store.load_steps("inf").unwrap();
    assert_eq!(loaded, vec![record]);
    assert_eq!(loaded[0].subsystems[0].flow, None);
}
