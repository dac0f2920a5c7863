//! The per-step update rule.
//!
//! Every subsystem is advanced from the frozen step-t snapshot only, so the
//! result does not depend on the order in which subsystems are visited and the
//! per-subsystem work can run concurrently.
//!
//! For subsystem `i`:
//!
//! ```text
//! P_i      = F_i - C_i
//! K_i      = s · Σ_j w(j, i) · (P_j - P_i)
//! P_eff_i  = P_i + K_i
//! C_i'     = C_i + k · (F_i - C_i)                      (+ capacity shock)
//! D_i'     = (1 - δ) · D_i + α · P_eff_i
//! T_i'     = T_i - λ · max(0, D_i' - D_i) + ρ · (1 - T_i)
//! F_i'     = F_i - c · D_i'                             (+ flow shock)
//! P_i'     = F_i' - C_i'
//! ```

use rayon::prelude::*;
use sf_core::Real;
use sf_coupling::CouplingMatrix;

use crate::error::SimResult;
use crate::options::TrustBounds;
use crate::params::Parameters;
use crate::shocks::Shock;
use crate::state::{SubsystemState, SystemCollection};

/// Contagion term for `target`: diffusion of pressure along incoming couplings.
///
/// A subsystem with no incoming coupling gets exactly `0.0`.
pub fn contagion(
    target: usize,
    pressures: &[Real],
    coupling: &CouplingMatrix,
    strength: Real,
) -> Real {
    let own = pressures[target];
    let pull: Real = coupling
        .incoming(target)
        .map(|(source, w)| w * (pressures[source] - own))
        .sum();
    strength * pull
}

/// Advance one subsystem given its precomputed contagion term.
pub fn advance_subsystem(
    state: &SubsystemState,
    contagion: Real,
    params: &Parameters,
    shock: Shock,
    trust_bounds: TrustBounds,
) -> SubsystemState {
    let gap = state.flow() - state.capacity();
    let effective_pressure = gap + contagion;

    let capacity = state.capacity() + params.capacity_rate * gap + shock.capacity;
    let drift = (1.0 - params.drift_decay) * state.drift() + params.drift_gain * effective_pressure;

    let strain = (drift - state.drift()).max(0.0);
    let trust = state.trust() - params.trust_rate * strain
        + params.trust_recovery * (1.0 - state.trust());

    let flow = state.flow() - drift * params.correction_rate + shock.flow;

    SubsystemState::new(flow, capacity, drift, trust_bounds.apply(trust))
}

/// Produce step t+1 from step t.
///
/// `shocks` holds one entry per subsystem; missing entries count as no shock.
/// Fails with a shape error when `coupling` is not `current.len()` square.
pub fn step(
    current: &SystemCollection,
    coupling: &CouplingMatrix,
    params: &Parameters,
    shocks: &[Shock],
    trust_bounds: TrustBounds,
    parallel: bool,
) -> SimResult<SystemCollection> {
    coupling.ensure_dimension(current.len())?;
    let pressures = current.pressures();

    let update = |i: usize| {
        let k = contagion(i, &pressures, coupling, params.contagion_strength);
        let shock = shocks.get(i).copied().unwrap_or_default();
        advance_subsystem(&current[i], k, params, shock, trust_bounds)
    };

    let states: Vec<SubsystemState> = if parallel {
        (0..current.len()).into_par_iter().map(update).collect()
    } else {
        (0..current.len()).map(update).collect()
    };

    Ok(SystemCollection::from_states(states))
}
