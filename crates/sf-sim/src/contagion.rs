//! The N-subsystem contagion engine as a [`DiscreteModel`].

use sf_coupling::CouplingMatrix;

use crate::divergence;
use crate::error::SimResult;
use crate::model::DiscreteModel;
use crate::options::SimOptions;
use crate::params::Parameters;
use crate::rule;
use crate::shocks::ShockSchedule;
use crate::state::SystemCollection;

/// Coupled subsystems advanced by [`rule::step`] under a fixed configuration.
///
/// Inputs are borrowed for the duration of a run and never mutated.
pub struct ContagionModel<'a> {
    initial: SystemCollection,
    coupling: &'a CouplingMatrix,
    params: &'a Parameters,
    shocks: &'a ShockSchedule,
    options: &'a SimOptions,
    warned: bool,
}

impl<'a> ContagionModel<'a> {
    /// Assemble a model, checking the configuration against `initial.len()`.
    pub fn new(
        initial: SystemCollection,
        coupling: &'a CouplingMatrix,
        params: &'a Parameters,
        shocks: &'a ShockSchedule,
        options: &'a SimOptions,
    ) -> SimResult<Self> {
        let n = initial.len();
        coupling.ensure_dimension(n)?;
        params.validate()?;
        options.validate()?;
        shocks.validate(n)?;

        Ok(Self {
            initial,
            coupling,
            params,
            shocks,
            options,
            warned: false,
        })
    }
}

impl DiscreteModel for ContagionModel<'_> {
    type State = SystemCollection;

    fn initial_state(&self) -> Self::State {
        self.initial.clone()
    }

    fn advance(&mut self, t: usize, x: &Self::State) -> SimResult<Self::State> {
        let shocks = self.shocks.shocks_at(t, x.len());
        let next = rule::step(
            x,
            self.coupling,
            self.params,
            &shocks,
            self.options.trust_bounds,
            self.options.parallel,
        )?;
        divergence::resolve(t + 1, next, self.options.divergence, &mut self.warned)
    }
}
