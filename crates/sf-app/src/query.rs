//! Query helpers for extracting data from loaded runs.

use sf_results::{StepRecord, SubsystemSnapshot};

use crate::error::{AppError, AppResult};

/// Variable names accepted by [`extract_series`].
pub const VARIABLES: [&str; 5] = ["flow", "capacity", "pressure", "drift", "trust"];

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub step_range: (usize, usize),
    pub record_count: usize,
    pub subsystem_count: usize,
    /// Records holding at least one non-finite value.
    pub non_finite_records: usize,
}

pub fn get_run_summary(records: &[StepRecord]) -> AppResult<RunSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    let non_finite_records = records
        .iter()
        .filter(|r| r.subsystems.iter().any(has_missing_value))
        .count();

    Ok(RunSummary {
        step_range: (first.step, last.step),
        record_count: records.len(),
        subsystem_count: first.subsystems.len(),
        non_finite_records,
    })
}

fn has_missing_value(s: &SubsystemSnapshot) -> bool {
    [s.flow, s.capacity, s.pressure, s.drift, s.trust]
        .iter()
        .any(Option::is_none)
}

pub fn list_subsystem_ids(records: &[StepRecord]) -> Vec<String> {
    records
        .first()
        .map(|r| r.subsystems.iter().map(|s| s.id.clone()).collect())
        .unwrap_or_default()
}

fn variable_value(snapshot: &SubsystemSnapshot, variable: &str) -> AppResult<Option<f64>> {
    let value = match variable {
        "flow" | "F" => snapshot.flow,
        "capacity" | "C" => snapshot.capacity,
        "pressure" | "P" => snapshot.pressure,
        "drift" | "D" => snapshot.drift,
        "trust" | "T" => snapshot.trust,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown variable: {} (expected one of {})",
                variable,
                VARIABLES.join(", ")
            )));
        }
    };
    Ok(value)
}

/// `(step, value)` pairs for one subsystem variable; non-finite steps are skipped.
pub fn extract_series(
    records: &[StepRecord],
    subsystem_id: &str,
    variable: &str,
) -> AppResult<Vec<(usize, f64)>> {
    let mut series = Vec::new();
    let mut found = false;

    for record in records {
        if let Some(snapshot) = record.subsystems.iter().find(|s| s.id == subsystem_id) {
            found = true;
            if let Some(v) = variable_value(snapshot, variable)? {
                series.push((record.step, v));
            }
        }
    }

    if !found && !records.is_empty() {
        return Err(AppError::SubsystemNotFound(subsystem_id.to_string()));
    }
    Ok(series)
}
