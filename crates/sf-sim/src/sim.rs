//! Simulation runner.

use sf_coupling::CouplingMatrix;
use tracing::{debug, info};

use crate::contagion::ContagionModel;
use crate::error::{SimError, SimResult};
use crate::model::DiscreteModel;
use crate::options::SimOptions;
use crate::params::Parameters;
use crate::shocks::ShockSchedule;
use crate::state::{InitialCondition, SubsystemState, SystemCollection};
use crate::trajectory::Trajectory;

/// Progress report emitted after each completed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimProgress {
    /// Steps completed so far
    pub step: usize,
    /// Steps requested
    pub steps: usize,
}

impl SimProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.steps == 0 {
            1.0
        } else {
            self.step as f64 / self.steps as f64
        }
    }
}

/// Drive any [`DiscreteModel`] for `steps` steps, recording every state.
///
/// The returned record has `steps + 1` entries, the initial state first.
pub fn run_model<M: DiscreteModel>(
    model: &mut M,
    steps: usize,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<Vec<M::State>> {
    let mut record = Vec::with_capacity(steps + 1);
    record.push(model.initial_state());

    for t in 0..steps {
        let next = model.advance(t, &record[t])?;
        record.push(next);

        if let Some(cb) = progress.as_deref_mut() {
            cb(SimProgress { step: t + 1, steps });
        }
    }

    Ok(record)
}

/// Contagion simulator over a fixed coupling matrix and parameter set.
///
/// ```
/// use sf_coupling::CouplingMatrix;
/// use sf_sim::{InitialCondition, Parameters, Simulator};
///
/// let coupling = CouplingMatrix::from_rows(&[vec![0.0, 0.5], vec![0.0, 0.0]]).unwrap();
/// let params = Parameters::new(0.2, 0.1, 0.3, 0.1, 0.4, 1.0);
/// let initial = [
///     InitialCondition::new(1.3, 1.0, 0.1, 0.8),
///     InitialCondition::new(1.0, 1.0, 0.0, 0.8),
/// ];
///
/// let trajectory = Simulator::new(&coupling, &params).run(&initial, 10).unwrap();
/// assert_eq!(trajectory.len(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct Simulator<'a> {
    coupling: &'a CouplingMatrix,
    params: &'a Parameters,
    shocks: ShockSchedule,
    options: SimOptions,
}

impl<'a> Simulator<'a> {
    pub fn new(coupling: &'a CouplingMatrix, params: &'a Parameters) -> Self {
        Self {
            coupling,
            params,
            shocks: ShockSchedule::default(),
            options: SimOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SimOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_shocks(mut self, shocks: ShockSchedule) -> Self {
        self.shocks = shocks;
        self
    }

    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    /// Run `steps` steps from `initial`; the subsystem count is `initial.len()`.
    pub fn run(&self, initial: &[InitialCondition], steps: usize) -> SimResult<Trajectory> {
        self.run_with_progress(initial, steps, None)
    }

    pub fn run_with_progress(
        &self,
        initial: &[InitialCondition],
        steps: usize,
        progress: Option<&mut dyn FnMut(SimProgress)>,
    ) -> SimResult<Trajectory> {
        let initial = self.prepare(initial)?;
        let n = initial.len();

        info!(
            subsystems = n,
            steps,
            coupled = !self.coupling.is_zero(),
            shocks = self.shocks.pulses().len(),
            parallel = self.options.parallel,
            "starting contagion run"
        );

        let mut model = ContagionModel::new(
            initial,
            self.coupling,
            self.params,
            &self.shocks,
            &self.options,
        )?;
        let record = run_model(&mut model, steps, progress)?;

        debug!(recorded = record.len(), "contagion run complete");
        Ok(Trajectory::from_steps(record))
    }

    fn prepare(&self, initial: &[InitialCondition]) -> SimResult<SystemCollection> {
        let n = initial.len();
        if n == 0 {
            return Err(SimError::configuration(
                "at least one subsystem is required",
            ));
        }

        self.coupling.ensure_dimension(n)?;
        self.params.validate()?;
        self.options.validate()?;
        self.shocks.validate(n)?;

        let states = initial
            .iter()
            .enumerate()
            .map(|(i, ic)| ic.complete(i))
            .collect::<SimResult<Vec<_>>>()?;

        Ok(SystemCollection::from_states(states))
    }
}

/// Run `n` coupled subsystems for `steps` steps with default options.
pub fn run(
    n: usize,
    initial: &[InitialCondition],
    coupling: &CouplingMatrix,
    params: &Parameters,
    steps: usize,
) -> SimResult<Trajectory> {
    run_with_options(n, initial, coupling, params, steps, &SimOptions::default())
}

pub fn run_with_options(
    n: usize,
    initial: &[InitialCondition],
    coupling: &CouplingMatrix,
    params: &Parameters,
    steps: usize,
    options: &SimOptions,
) -> SimResult<Trajectory> {
    if n == 0 {
        return Err(SimError::configuration(
            "subsystem count must be positive",
        ));
    }
    if initial.len() != n {
        return Err(SimError::configuration(format!(
            "expected {n} initial conditions, got {}",
            initial.len()
        )));
    }

    Simulator::new(coupling, params)
        .with_options(options.clone())
        .run(initial, steps)
}

/// Single uncoupled subsystem: the N = 1 case with a 1×1 zero matrix.
pub fn run_isolated(
    initial: InitialCondition,
    params: &Parameters,
    steps: usize,
) -> SimResult<Vec<SubsystemState>> {
    let coupling = CouplingMatrix::zeros(1)?;
    let trajectory = Simulator::new(&coupling, params).run(&[initial], steps)?;
    Ok(trajectory.series(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::ErrorKind;

    struct Doubling {
        fail_at: Option<usize>,
    }

    impl DiscreteModel for Doubling {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn advance(&mut self, t: usize, x: &f64) -> SimResult<f64> {
            if self.fail_at == Some(t) {
                return Err(SimError::configuration("intentional failure"));
            }
            Ok(x * 2.0)
        }
    }

    fn params() -> Parameters {
        Parameters::new(0.2, 0.1, 0.3, 0.1, 0.4, 1.0)
    }

    #[test]
    fn run_model_records_initial_and_each_step() {
        let record = run_model(&mut Doubling { fail_at: None }, 3, None).unwrap();
        assert_eq!(record, vec![1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn run_model_stops_at_first_error() {
        let err = run_model(&mut Doubling { fail_at: Some(2) }, 5, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn progress_reported_per_step() {
        let mut seen = Vec::new();
        let mut cb = |p: SimProgress| seen.push(p.step);
        run_model(&mut Doubling { fail_at: None }, 4, Some(&mut cb)).unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn fraction_complete_handles_zero_steps() {
        assert_eq!(SimProgress { step: 0, steps: 0 }.fraction_complete(), 1.0);
        assert_eq!(SimProgress { step: 1, steps: 4 }.fraction_complete(), 0.25);
    }

    #[test]
    fn zero_subsystems_is_configuration_error() {
        let coupling = CouplingMatrix::zeros(1).unwrap();
        let err = run(0, &[], &coupling, &params(), 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn initial_count_mismatch_is_configuration_error() {
        let coupling = CouplingMatrix::zeros(2).unwrap();
        let initial = [InitialCondition::new(1.0, 1.0, 0.0, 1.0)];
        let err = run(2, &initial, &coupling, &params(), 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn coupling_dimension_mismatch_is_shape_error() {
        let coupling = CouplingMatrix::zeros(3).unwrap();
        let initial = [InitialCondition::new(1.0, 1.0, 0.0, 1.0); 2];
        let err = run(2, &initial, &coupling, &params(), 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn invalid_parameters_rejected_before_stepping() {
        let coupling = CouplingMatrix::zeros(1).unwrap();
        let mut p = params();
        p.drift_decay = 2.0;
        let err = run(1, &[InitialCondition::new(1.0, 1.0, 0.0, 1.0)], &coupling, &p, 5)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn shock_for_missing_subsystem_rejected() {
        let coupling = CouplingMatrix::zeros(1).unwrap();
        let p = params();
        let err = Simulator::new(&coupling, &p)
            .with_shocks(ShockSchedule::pulse(4, 2, 0.5))
            .run(&[InitialCondition::new(1.0, 1.0, 0.0, 1.0)], 3)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn isolated_run_length() {
        let series = run_isolated(InitialCondition::new(1.3, 1.0, 0.1, 0.8), &params(), 6).unwrap();
        assert_eq!(series.len(), 7);
    }
}
