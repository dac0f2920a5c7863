//! Scenario loading, saving, deep validation, and introspection.

use std::path::Path;

use sf_core::Tolerances;
use sf_scenario::{CouplingDef, Scenario};

use crate::error::AppResult;
use crate::runtime_compile;

/// Summary of a scenario for display.
#[derive(Debug, Clone)]
pub struct ScenarioSummary {
    pub name: String,
    pub subsystem_count: usize,
    pub coupling_form: &'static str,
    /// Number of nonzero off-diagonal coefficients.
    pub link_count: usize,
    pub symmetric: bool,
    pub shock_count: usize,
    pub steps: usize,
}

/// Load a scenario (YAML, or JSON by extension) and check its references.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    Ok(sf_scenario::load(path)?)
}

pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => sf_scenario::save_json(path, scenario)?,
        _ => sf_scenario::save_yaml(path, scenario)?,
    }
    Ok(())
}

/// Reference checks plus every engine check a run would perform.
pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    sf_scenario::validate_scenario(scenario)?;
    runtime_compile::compile_scenario(scenario)?;
    Ok(())
}

pub fn summarize_scenario(scenario: &Scenario) -> AppResult<ScenarioSummary> {
    let runtime = runtime_compile::compile_scenario(scenario)?;
    let n = runtime.coupling.dimension();
    let link_count = (0..n).map(|t| runtime.coupling.incoming(t).count()).sum();

    Ok(ScenarioSummary {
        name: scenario.name.clone(),
        subsystem_count: n,
        coupling_form: match scenario.coupling {
            CouplingDef::Dense { .. } => "dense",
            CouplingDef::Links { .. } => "links",
            CouplingDef::Preset { .. } => "preset",
        },
        link_count,
        symmetric: runtime.coupling.is_symmetric(Tolerances::default()),
        shock_count: runtime.shocks.pulses().len(),
        steps: runtime.steps,
    })
}
