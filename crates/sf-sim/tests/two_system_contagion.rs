//! Directional contagion between a fast and a slow subsystem.

use sf_coupling::CouplingMatrix;
use sf_sim::{InitialCondition, Parameters, ShockSchedule, Simulator, run, run_isolated};

fn params() -> Parameters {
    Parameters::new(0.2, 0.1, 0.3, 0.1, 0.4, 1.0)
}

fn initial() -> [InitialCondition; 2] {
    [
        InitialCondition::new(1.3, 1.0, 0.1, 0.8),
        InitialCondition::new(1.0, 1.0, 0.0, 0.8),
    ]
}

fn directional(w: f64) -> CouplingMatrix {
    CouplingMatrix::from_rows(&[vec![0.0, w], vec![0.0, 0.0]]).unwrap()
}

#[test]
fn source_subsystem_matches_isolated_update() {
    let trajectory = run(2, &initial(), &directional(0.5), &params(), 1).unwrap();
    let alone = run_isolated(initial()[0], &params(), 1).unwrap();

    assert_eq!(trajectory.at(1).unwrap()[0], alone[1]);
}

#[test]
fn contagion_raises_target_drift() {
    let coupled = run(2, &initial(), &directional(0.5), &params(), 1).unwrap();
    let uncoupled = run(2, &initial(), &directional(0.0), &params(), 1).unwrap();

    let coupled_drift = coupled.at(1).unwrap()[1].drift();
    let uncoupled_drift = uncoupled.at(1).unwrap()[1].drift();

    assert!(coupled_drift > uncoupled_drift);
    // P0 = 0.3, P1 = 0: contagion = 0.5 * 0.3, drift = 0.3 * 0.15
    assert!((coupled_drift - 0.045).abs() < 1e-12);
    assert_eq!(uncoupled_drift, 0.0);
}

#[test]
fn no_back_propagation_into_source() {
    let coupled = run(2, &initial(), &directional(0.5), &params(), 50).unwrap();
    let alone = run_isolated(initial()[0], &params(), 50).unwrap();
    assert_eq!(coupled.series(0), alone);
}

#[test]
fn bubble_in_source_strains_target_trust() {
    let p = params();
    let coupling = directional(0.8);
    let calm = Simulator::new(&coupling, &p).run(&initial(), 30).unwrap();
    let bubble = Simulator::new(&coupling, &p)
        .with_shocks(ShockSchedule::pulse(0, 10, 0.5))
        .run(&initial(), 30)
        .unwrap();

    let min_trust = |t: &sf_sim::Trajectory| {
        t.series(1)
            .iter()
            .map(|s| s.trust())
            .fold(f64::INFINITY, f64::min)
    };
    assert!(min_trust(&bubble) < min_trust(&calm));
}
