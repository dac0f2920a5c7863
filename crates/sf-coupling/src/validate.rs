//! Coupling validation logic.

use nalgebra::DMatrix;
use sf_core::Real;

use crate::error::{CouplingError, CouplingResult};

/// Check that `rows` describes a non-empty square matrix and return its dimension.
pub(crate) fn validate_shape(rows: &[Vec<Real>]) -> CouplingResult<usize> {
    let dimension = rows.len();
    if dimension == 0 {
        return Err(CouplingError::Empty);
    }

    for (row, entries) in rows.iter().enumerate() {
        if entries.len() != dimension {
            return Err(CouplingError::NotSquare {
                row,
                len: entries.len(),
                dimension,
            });
        }
    }

    Ok(dimension)
}

/// Check entries: every coefficient finite, every diagonal entry exactly zero.
///
/// Indexing is `(source, target)`.
pub(crate) fn validate_entries(weights: &DMatrix<Real>) -> CouplingResult<()> {
    let n = weights.nrows();

    for source in 0..n {
        for target in 0..n {
            let value = weights[(source, target)];
            if !value.is_finite() {
                return Err(CouplingError::NonFiniteCoefficient {
                    source_index: source,
                    target,
                    value,
                });
            }
        }
    }

    for index in 0..n {
        let value = weights[(index, index)];
        if value != 0.0 {
            return Err(CouplingError::SelfCoupling { index, value });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_empty_rows() {
        let rows: Vec<Vec<Real>> = vec![];
        assert_eq!(validate_shape(&rows), Err(CouplingError::Empty));
    }

    #[test]
    fn validate_ragged_rows() {
        let rows = vec![vec![0.0, 1.0], vec![0.0]];
        assert_eq!(
            validate_shape(&rows),
            Err(CouplingError::NotSquare {
                row: 1,
                len: 1,
                dimension: 2
            })
        );
    }

    #[test]
    fn validate_wide_rows() {
        let rows = vec![vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]];
        assert!(matches!(
            validate_shape(&rows),
            Err(CouplingError::NotSquare { row: 0, .. })
        ));
    }

    #[test]
    fn validate_diagonal() {
        let weights = DMatrix::from_row_slice(2, 2, &[0.0, 0.4, 0.2, 0.3]);
        assert_eq!(
            validate_entries(&weights),
            Err(CouplingError::SelfCoupling {
                index: 1,
                value: 0.3
            })
        );
    }

    #[test]
    fn non_finite_reported_before_diagonal() {
        let weights = DMatrix::from_row_slice(2, 2, &[1.0, Real::NAN, 0.0, 0.0]);
        assert!(matches!(
            validate_entries(&weights),
            Err(CouplingError::NonFiniteCoefficient {
                source_index: 0,
                target: 1,
                ..
            })
        ));
    }

    #[test]
    fn negative_and_large_entries_are_allowed() {
        let weights = DMatrix::from_row_slice(2, 2, &[0.0, -3.0, 1e6, 0.0]);
        assert!(validate_entries(&weights).is_ok());
    }
}
