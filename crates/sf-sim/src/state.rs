//! Subsystem state and per-step system collections.

use std::ops::Index;

use sf_core::{PRESSURE_TOLERANCE, Real, ensure_finite, ensure_in_range};

use crate::error::{SimError, SimResult};

/// Five-variable state of one subsystem at one step.
///
/// Pressure is always derived as `flow - capacity`; there is no way to set it
/// independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubsystemState {
    flow: Real,
    capacity: Real,
    pressure: Real,
    drift: Real,
    trust: Real,
}

impl SubsystemState {
    pub fn new(flow: Real, capacity: Real, drift: Real, trust: Real) -> Self {
        Self {
            flow,
            capacity,
            pressure: flow - capacity,
            drift,
            trust,
        }
    }

    pub fn flow(&self) -> Real {
        self.flow
    }

    pub fn capacity(&self) -> Real {
        self.capacity
    }

    pub fn pressure(&self) -> Real {
        self.pressure
    }

    pub fn drift(&self) -> Real {
        self.drift
    }

    pub fn trust(&self) -> Real {
        self.trust
    }

    /// `(F, C, P, D, T)`
    pub fn as_tuple(&self) -> (Real, Real, Real, Real, Real) {
        (
            self.flow,
            self.capacity,
            self.pressure,
            self.drift,
            self.trust,
        )
    }

    /// First non-finite variable in `(F, C, P, D, T)` order.
    pub fn first_non_finite(&self) -> Option<(&'static str, Real)> {
        [
            ("flow", self.flow),
            ("capacity", self.capacity),
            ("pressure", self.pressure),
            ("drift", self.drift),
            ("trust", self.trust),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }

    /// Saturate F, C, D and T into `[-bound, bound]` and re-derive P.
    ///
    /// Infinities saturate; NaN stays NaN.
    pub fn saturated(&self, bound: Real) -> Self {
        Self::new(
            self.flow.clamp(-bound, bound),
            self.capacity.clamp(-bound, bound),
            self.drift.clamp(-bound, bound),
            self.trust.clamp(-bound, bound),
        )
    }
}

/// Caller-supplied starting values for one subsystem.
///
/// Pressure may be supplied; if it is, it must agree with `flow - capacity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialCondition {
    pub flow: Real,
    pub capacity: Real,
    pub drift: Real,
    pub trust: Real,
    pub pressure: Option<Real>,
}

impl InitialCondition {
    pub fn new(flow: Real, capacity: Real, drift: Real, trust: Real) -> Self {
        Self {
            flow,
            capacity,
            drift,
            trust,
            pressure: None,
        }
    }

    pub fn with_pressure(mut self, pressure: Real) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Validate and produce the pressure-completed state for subsystem `index`.
    pub fn complete(&self, index: usize) -> SimResult<SubsystemState> {
        let in_subsystem =
            |e: sf_core::CoreError| SimError::configuration(format!("subsystem {index}: {e}"));

        ensure_finite(self.flow, "initial flow").map_err(in_subsystem)?;
        ensure_finite(self.capacity, "initial capacity").map_err(in_subsystem)?;
        ensure_finite(self.drift, "initial drift").map_err(in_subsystem)?;
        ensure_in_range(self.trust, 0.0, 1.0, "initial trust", "[0, 1]").map_err(in_subsystem)?;

        let state = SubsystemState::new(self.flow, self.capacity, self.drift, self.trust);
        ensure_finite(state.pressure(), "initial pressure").map_err(in_subsystem)?;
        if let Some(supplied) = self.pressure
            && !agrees(supplied, state.pressure())
        {
            return Err(SimError::configuration(format!(
                "subsystem {index}: supplied pressure {supplied} disagrees with flow - capacity = {}",
                state.pressure()
            )));
        }
        Ok(state)
    }
}

fn agrees(supplied: Real, derived: Real) -> bool {
    (supplied - derived).abs() <= PRESSURE_TOLERANCE
}

/// One step across all N subsystems, indexed `0..N`.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemCollection {
    states: Vec<SubsystemState>,
}

impl SystemCollection {
    pub fn from_states(states: Vec<SubsystemState>) -> Self {
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SubsystemState> {
        self.states.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubsystemState> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[SubsystemState] {
        &self.states
    }

    /// Step pressures `P_i = F_i - C_i` in subsystem order.
    pub fn pressures(&self) -> Vec<Real> {
        self.states.iter().map(SubsystemState::pressure).collect()
    }

    /// First non-finite value as `(subsystem, variable, value)`.
    pub fn first_non_finite(&self) -> Option<(usize, &'static str, Real)> {
        self.states
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.first_non_finite().map(|(var, v)| (i, var, v)))
    }

    pub(crate) fn map(&self, f: impl Fn(&SubsystemState) -> SubsystemState) -> Self {
        Self {
            states: self.states.iter().map(f).collect(),
        }
    }
}

impl Index<usize> for SystemCollection {
    type Output = SubsystemState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.states[index]
    }
}

impl<'a> IntoIterator for &'a SystemCollection {
    type Item = &'a SubsystemState;
    type IntoIter = std::slice::Iter<'a, SubsystemState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
