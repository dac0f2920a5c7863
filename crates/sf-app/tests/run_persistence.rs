use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sf_app::{
    AppError, DEFAULT_TRUST_THRESHOLD, RunOptions, RunRequest, RunStage, compute_run_metrics,
    ensure_run, ensure_run_with_progress, list_runs, load_run, query, run_service,
};

const SCENARIO: &str = r#"
version: 1
name: persisted pair
subsystems:
  - { id: src, flow: 1.3, capacity: 1.0, drift: 0.1, trust: 0.8 }
  - { id: dst, flow: 1.0, capacity: 1.0, drift: 0.0, trust: 0.8 }
coupling:
  type: links
  links:
    - { from: src, to: dst, weight: 0.5 }
parameters:
  capacity_rate: 0.2
  drift_decay: 0.1
  drift_gain: 0.3
  trust_rate: 0.1
  correction_rate: 0.4
  contagion_strength: 1.0
steps: 12
"#;

fn scenario_file(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("scenario.yaml");
    fs::write(&path, SCENARIO).expect("failed to write scenario");
    path
}

#[test]
fn run_persists_and_is_reused_from_cache() {
    let path = scenario_file("sf_app_persist");
    let request = RunRequest {
        scenario_path: &path,
        options: RunOptions::default(),
    };

    let first = ensure_run(&request).expect("run failed");
    assert!(!first.loaded_from_cache);
    assert_eq!(first.manifest.steps, 12);
    assert_eq!(first.manifest.subsystem_ids, vec!["src", "dst"]);

    let second = ensure_run(&request).expect("cached run failed");
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);

    let runs = list_runs(&path, "persisted pair").unwrap();
    assert_eq!(runs.len(), 1);

    let (manifest, records) = load_run(&path, &first.run_id).unwrap();
    assert_eq!(manifest.run_id, first.run_id);
    assert_eq!(records.len(), 13);

    let summary = query::get_run_summary(&records).unwrap();
    assert_eq!(summary.step_range, (0, 12));
    assert_eq!(summary.subsystem_count, 2);

    // one step of contagion: 0.3 * 0.5 * 0.3
    let drift = query::extract_series(&records, "dst", "drift").unwrap();
    assert!((drift[1].1 - 0.045).abs() < 1e-12);

    let metrics = compute_run_metrics(&records, DEFAULT_TRUST_THRESHOLD);
    assert!(metrics.subsystem("dst").unwrap().peak_drift.unwrap() > 0.0);
}

#[test]
fn steps_override_changes_run_id() {
    let path = scenario_file("sf_app_override");
    let base = ensure_run(&RunRequest {
        scenario_path: &path,
        options: RunOptions::default(),
    })
    .unwrap();
    let shorter = ensure_run(&RunRequest {
        scenario_path: &path,
        options: RunOptions {
            steps_override: Some(3),
            ..RunOptions::default()
        },
    })
    .unwrap();

    assert_ne!(base.run_id, shorter.run_id);
    let (_, records) = load_run(&path, &shorter.run_id).unwrap();
    assert_eq!(records.len(), 4);
}

#[test]
fn no_cache_reruns_and_progress_is_reported() {
    let path = scenario_file("sf_app_progress");
    ensure_run(&RunRequest {
        scenario_path: &path,
        options: RunOptions::default(),
    })
    .unwrap();

    let request = RunRequest {
        scenario_path: &path,
        options: RunOptions {
            use_cache: false,
            ..RunOptions::default()
        },
    };
    let mut events = Vec::new();
    let response = ensure_run_with_progress(&request, Some(&mut |e| events.push(e))).unwrap();

    assert!(!response.loaded_from_cache);
    assert!(events.iter().any(|e| e.stage == RunStage::Compiling));
    let sim_steps: Vec<usize> = events
        .iter()
        .filter_map(|e| e.simulation.map(|p| p.step))
        .collect();
    assert_eq!(sim_steps, (1..=12).collect::<Vec<_>>());
    assert_eq!(events.last().map(|e| e.stage), Some(RunStage::Completed));
    assert!(response.timing.total_time_s >= response.timing.simulate_time_s);
}

#[test]
fn deleted_run_is_not_found() {
    let path = scenario_file("sf_app_delete");
    let response = ensure_run(&RunRequest {
        scenario_path: &path,
        options: RunOptions::default(),
    })
    .unwrap();

    run_service::delete_run(&path, &response.run_id).unwrap();
    assert!(matches!(
        load_run(&path, &response.run_id),
        Err(AppError::RunNotFound(_))
    ));
}
