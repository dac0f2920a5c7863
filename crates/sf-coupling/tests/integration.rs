//! Integration tests for sf-coupling.

use proptest::prelude::*;
use sf_core::ErrorKind;
use sf_coupling::{CouplingBuilder, CouplingError, CouplingMatrix, topology};

#[test]
fn build_directional_pair() {
    // Fast subsystem 0 pushes into slow subsystem 1, nothing flows back.
    let mut builder = CouplingBuilder::new(2);
    builder.link(0, 1, 0.5);
    let coupling = builder.build().unwrap();

    assert_eq!(coupling.dimension(), 2);
    assert_eq!(coupling.coefficient(0, 1), 0.5);
    assert_eq!(coupling.coefficient(1, 0), 0.0);
    assert!(!coupling.has_incoming(0));
    assert!(coupling.has_incoming(1));
}

#[test]
fn builder_and_rows_agree() {
    let mut builder = CouplingBuilder::new(3);
    builder.link(0, 1, 0.5).link(2, 0, -0.2).link_both(1, 2, 1.5);
    let built = builder.build().unwrap();

    let from_rows = CouplingMatrix::from_rows(&[
        vec![0.0, 0.5, 0.0],
        vec![0.0, 0.0, 1.5],
        vec![-0.2, 1.5, 0.0],
    ])
    .unwrap();

    assert_eq!(built, from_rows);
    assert_eq!(built.to_rows(), from_rows.to_rows());
}

#[test]
fn error_kinds_match_failure_class() {
    let ragged = CouplingMatrix::from_rows(&[vec![0.0, 1.0], vec![0.0]]).unwrap_err();
    assert_eq!(ragged.kind(), ErrorKind::Shape);

    let diagonal = CouplingMatrix::from_rows(&[vec![0.1, 0.0], vec![0.0, 0.0]]).unwrap_err();
    assert_eq!(diagonal.kind(), ErrorKind::Structure);

    let square = CouplingMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    let mismatch = square.ensure_dimension(4).unwrap_err();
    assert_eq!(mismatch.kind(), ErrorKind::Shape);
}

#[test]
fn large_coefficients_are_valid_input() {
    let coupling = topology::all_to_all(3, 250.0).unwrap();
    assert_eq!(coupling.coefficient(2, 0), 250.0);
}

#[test]
fn infinite_coefficient_rejected() {
    let err =
        CouplingMatrix::from_rows(&[vec![0.0, f64::INFINITY], vec![0.0, 0.0]]).unwrap_err();
    assert!(matches!(err, CouplingError::NonFiniteCoefficient { .. }));
}

proptest! {
    #[test]
    fn zero_diagonal_square_rows_always_accepted(
        n in 1usize..6,
        values in prop::collection::vec(-10.0_f64..10.0, 36),
    ) {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { values[i * 6 + j] }).collect())
            .collect();
        let coupling = CouplingMatrix::from_rows(&rows).unwrap();
        prop_assert_eq!(coupling.dimension(), n);
        prop_assert_eq!(coupling.to_rows(), rows);
    }

    #[test]
    fn any_nonzero_diagonal_rejected(n in 1usize..6, index in 0usize..6, value in 0.01_f64..5.0) {
        let index = index % n;
        let mut rows = vec![vec![0.0; n]; n];
        rows[index][index] = value;
        let err = CouplingMatrix::from_rows(&rows).unwrap_err();
        prop_assert_eq!(err, CouplingError::SelfCoupling { index, value });
    }
}
