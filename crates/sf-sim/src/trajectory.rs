//! Simulation output.

use sf_core::Real;

use crate::state::{SubsystemState, SystemCollection};

/// Ordered system collections, index 0 being the pressure-completed initial state.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    steps: Vec<SystemCollection>,
}

impl Trajectory {
    pub(crate) fn from_steps(steps: Vec<SystemCollection>) -> Self {
        Self { steps }
    }

    /// Number of recorded steps, including step 0.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn subsystem_count(&self) -> usize {
        self.steps.first().map_or(0, SystemCollection::len)
    }

    pub fn at(&self, step: usize) -> Option<&SystemCollection> {
        self.steps.get(step)
    }

    pub fn initial(&self) -> Option<&SystemCollection> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&SystemCollection> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SystemCollection> {
        self.steps.iter()
    }

    /// Every step of one subsystem.
    pub fn series(&self, subsystem: usize) -> Vec<SubsystemState> {
        self.steps
            .iter()
            .filter_map(|c| c.get(subsystem).copied())
            .collect()
    }

    /// Per-step, per-subsystem `(F, C, P, D, T)` tuples.
    pub fn to_tuples(&self) -> Vec<Vec<(Real, Real, Real, Real, Real)>> {
        self.steps
            .iter()
            .map(|c| c.iter().map(SubsystemState::as_tuple).collect())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a SystemCollection;
    type IntoIter = std::slice::Iter<'a, SystemCollection>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
