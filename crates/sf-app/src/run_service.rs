//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use sf_results::{RunManifest, RunStore, StepRecord, SubsystemSnapshot};
use sf_scenario::Scenario;
use sf_sim::{SimProgress, Trajectory};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};
use crate::runtime_compile;
use crate::scenario_service;

/// Version stamped into run ids; a new engine release invalidates the cache.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
    /// Replaces the scenario's own step count.
    pub steps_override: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
            steps_override: None,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub simulate_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    simulation: Option<SimProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            simulation,
        });
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingScenario,
        started,
        Some("Loading scenario".to_string()),
        None,
    );

    let mut scenario = scenario_service::load_scenario(request.scenario_path)?;
    if let Some(steps) = request.options.steps_override {
        scenario.steps = i64::try_from(steps)
            .map_err(|_| AppError::InvalidInput(format!("step count {steps} is too large")))?;
    }

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    let run_id = sf_results::compute_run_id(&scenario, &request.options.engine_version);
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );

        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();
        info!(run_id = %run_id, "loaded cached run");

        emit_progress(
            &mut progress_cb,
            RunStage::Completed,
            started,
            Some("Loaded cached run".to_string()),
            None,
        );

        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    emit_progress(
        &mut progress_cb,
        RunStage::Compiling,
        started,
        Some("Compiling scenario".to_string()),
        None,
    );

    let compile_started = Instant::now();
    let runtime = runtime_compile::compile_scenario(&scenario)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    let simulate_started = Instant::now();
    let trajectory = {
        let mut on_step = |p: SimProgress| {
            emit_progress(&mut progress_cb, RunStage::Simulating, started, None, Some(p));
        };
        runtime
            .simulator()
            .run_with_progress(&runtime.initial, runtime.steps, Some(&mut on_step))?
    };
    timing.simulate_time_s = simulate_started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving results".to_string()),
        None,
    );

    let save_started = Instant::now();
    let records = trajectory_to_records(&trajectory, &runtime.subsystem_ids);
    let manifest = RunManifest {
        run_id: run_id.clone(),
        scenario_name: scenario.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        steps: runtime.steps,
        subsystem_ids: runtime.subsystem_ids.clone(),
        engine_version: request.options.engine_version.clone(),
    };
    store.save_run(&manifest, &records)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        steps = runtime.steps,
        subsystems = runtime.subsystem_count(),
        "run saved"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// Compile and run a scenario in memory, without touching the run store.
pub fn simulate_scenario(scenario: &Scenario) -> AppResult<Trajectory> {
    sf_scenario::validate_scenario(scenario)?;
    let runtime = runtime_compile::compile_scenario(scenario)?;
    Ok(runtime.simulator().run(&runtime.initial, runtime.steps)?)
}

/// One record per step, subsystems in scenario order.
pub fn trajectory_to_records(trajectory: &Trajectory, subsystem_ids: &[String]) -> Vec<StepRecord> {
    trajectory
        .iter()
        .enumerate()
        .map(|(step, collection)| StepRecord {
            step,
            subsystems: collection
                .iter()
                .zip(subsystem_ids)
                .map(|(state, id)| SubsystemSnapshot::from_values(id.clone(), state.as_tuple()))
                .collect(),
        })
        .collect()
}

/// List runs of a scenario, most recent first.
pub fn list_runs(scenario_path: &Path, scenario_name: &str) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.list_runs(scenario_name)?)
}

/// Load a specific run.
pub fn load_run(scenario_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<StepRecord>)> {
    let store = RunStore::for_scenario(scenario_path)?;

    let manifest = store.load_manifest(run_id)?;
    let records = store.load_steps(run_id)?;

    Ok((manifest, records))
}

pub fn delete_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.delete_run(run_id)?)
}
