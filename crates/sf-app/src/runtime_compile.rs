//! Compilation of a scenario definition into simulator inputs.

use sf_core::ErrorKind;
use sf_coupling::{CouplingBuilder, CouplingMatrix, topology};
use sf_scenario::{
    CouplingDef, DivergenceDef, OptionsDef, ParametersDef, Scenario, ShockDef, TopologyDef,
    TrustBoundsDef,
};
use sf_sim::{
    DivergencePolicy, InitialCondition, Parameters, ShockPulse, ShockSchedule, SimOptions,
    Simulator, TrustBounds,
};

use crate::error::{AppError, AppResult};

/// Everything the simulator needs, resolved from ids to indices.
#[derive(Debug, Clone)]
pub struct ScenarioRuntime {
    pub subsystem_ids: Vec<String>,
    pub initial: Vec<InitialCondition>,
    pub coupling: CouplingMatrix,
    pub params: Parameters,
    pub options: SimOptions,
    pub shocks: ShockSchedule,
    pub steps: usize,
}

impl ScenarioRuntime {
    pub fn simulator(&self) -> Simulator<'_> {
        Simulator::new(&self.coupling, &self.params)
            .with_options(self.options.clone())
            .with_shocks(self.shocks.clone())
    }

    pub fn subsystem_count(&self) -> usize {
        self.initial.len()
    }

    /// Engine-side checks, without running a step.
    fn check(&self) -> AppResult<()> {
        let n = self.subsystem_count();
        self.coupling.ensure_dimension(n)?;
        self.params.validate()?;
        self.options.validate()?;
        self.shocks.validate(n)?;
        for (i, ic) in self.initial.iter().enumerate() {
            ic.complete(i)?;
        }
        Ok(())
    }
}

/// Compile a scenario; the result has passed every engine check.
pub fn compile_scenario(scenario: &Scenario) -> AppResult<ScenarioRuntime> {
    if scenario.subsystems.is_empty() {
        return Err(AppError::Simulation {
            kind: ErrorKind::Configuration,
            message: "at least one subsystem is required".to_string(),
        });
    }

    let steps = usize::try_from(scenario.steps).map_err(|_| AppError::Simulation {
        kind: ErrorKind::Configuration,
        message: format!("step count must be non-negative, got {}", scenario.steps),
    })?;

    let initial: Vec<InitialCondition> = scenario
        .subsystems
        .iter()
        .map(|s| {
            let ic = InitialCondition::new(s.flow, s.capacity, s.drift, s.trust);
            match s.pressure {
                Some(p) => ic.with_pressure(p),
                None => ic,
            }
        })
        .collect();

    let runtime = ScenarioRuntime {
        subsystem_ids: scenario.subsystems.iter().map(|s| s.id.clone()).collect(),
        initial,
        coupling: build_coupling(scenario)?,
        params: build_parameters(&scenario.parameters),
        options: build_options(&scenario.options),
        shocks: build_shocks(scenario)?,
        steps,
    };
    runtime.check()?;
    Ok(runtime)
}

fn index_of(scenario: &Scenario, id: &str) -> AppResult<usize> {
    scenario
        .subsystem_index(id)
        .ok_or_else(|| AppError::SubsystemNotFound(id.to_string()))
}

pub fn build_coupling(scenario: &Scenario) -> AppResult<CouplingMatrix> {
    let n = scenario.subsystems.len();
    let matrix = match &scenario.coupling {
        CouplingDef::Dense { rows } => CouplingMatrix::with_dimension(rows, n)?,
        CouplingDef::Links { links } => {
            let mut builder = CouplingBuilder::new(n);
            for link in links {
                let from = index_of(scenario, &link.from)?;
                let to = index_of(scenario, &link.to)?;
                if link.both {
                    builder.link_both(from, to, link.weight);
                } else {
                    builder.link(from, to, link.weight);
                }
            }
            builder.build()?
        }
        CouplingDef::Preset {
            topology: kind,
            coefficient,
            hub,
        } => match kind {
            TopologyDef::AllToAll => topology::all_to_all(n, *coefficient)?,
            TopologyDef::Ring => topology::ring(n, *coefficient)?,
            TopologyDef::Chain => topology::chain(n, *coefficient)?,
            TopologyDef::Star => {
                let hub = hub.as_deref().ok_or_else(|| {
                    AppError::Compile("star topology requires a hub".to_string())
                })?;
                topology::star(n, index_of(scenario, hub)?, *coefficient)?
            }
        },
    };
    Ok(matrix)
}

pub fn build_parameters(def: &ParametersDef) -> Parameters {
    Parameters::new(
        def.capacity_rate,
        def.drift_decay,
        def.drift_gain,
        def.trust_rate,
        def.correction_rate,
        def.contagion_strength,
    )
    .with_trust_recovery(def.trust_recovery)
}

pub fn build_options(def: &OptionsDef) -> SimOptions {
    SimOptions {
        divergence: match def.divergence {
            DivergenceDef::Abort => DivergencePolicy::Abort,
            DivergenceDef::Continue => DivergencePolicy::Continue,
            DivergenceDef::Clamp { bound } => DivergencePolicy::Clamp { bound },
        },
        trust_bounds: match def.trust_bounds {
            TrustBoundsDef::Unbounded => TrustBounds::Unbounded,
            TrustBoundsDef::Clamp => TrustBounds::Clamp,
        },
        parallel: def.parallel,
    }
}

pub fn build_shocks(scenario: &Scenario) -> AppResult<ShockSchedule> {
    let mut schedule = ShockSchedule::new();
    for shock in &scenario.shocks {
        schedule.add(build_pulse(scenario, shock)?);
    }
    Ok(schedule)
}

fn build_pulse(scenario: &Scenario, shock: &ShockDef) -> AppResult<ShockPulse> {
    let to_step = |v: u64| {
        usize::try_from(v).map_err(|_| AppError::Compile(format!("shock step {v} out of range")))
    };
    Ok(ShockPulse {
        subsystem: index_of(scenario, &shock.subsystem)?,
        start: to_step(shock.start)?,
        end: to_step(shock.end)?,
        flow: shock.flow,
        capacity: shock.capacity,
    })
}
