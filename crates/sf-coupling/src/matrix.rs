//! Dense coupling matrix.

use nalgebra::DMatrix;
use sf_core::{Real, Tolerances, nearly_equal};

use crate::error::{CouplingError, CouplingResult};
use crate::validate;

/// Directional pressure coupling between N subsystems.
///
/// Entry `(source, target)` is how strongly pressure in `source` propagates
/// into `target`. The matrix is square, has a zero diagonal and only finite
/// entries. It may be asymmetric and is not bounded to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix {
    weights: DMatrix<Real>,
}

impl CouplingMatrix {
    /// Build from row-major nested vectors where `rows[source][target]`.
    pub fn from_rows(rows: &[Vec<Real>]) -> CouplingResult<Self> {
        let n = validate::validate_shape(rows)?;
        let weights = DMatrix::from_fn(n, n, |source, target| rows[source][target]);
        Self::from_matrix(weights)
    }

    /// Build from rows and require the dimension to equal `expected`.
    pub fn with_dimension(rows: &[Vec<Real>], expected: usize) -> CouplingResult<Self> {
        let coupling = Self::from_rows(rows)?;
        coupling.ensure_dimension(expected)?;
        Ok(coupling)
    }

    /// Wrap an existing dense matrix indexed `(source, target)`.
    pub fn from_matrix(weights: DMatrix<Real>) -> CouplingResult<Self> {
        if weights.nrows() == 0 {
            return Err(CouplingError::Empty);
        }
        if weights.nrows() != weights.ncols() {
            return Err(CouplingError::NotSquare {
                row: 0,
                len: weights.ncols(),
                dimension: weights.nrows(),
            });
        }
        validate::validate_entries(&weights)?;
        Ok(Self { weights })
    }

    /// Matrix with no coupling at all: every subsystem evolves in isolation.
    pub fn zeros(n: usize) -> CouplingResult<Self> {
        if n == 0 {
            return Err(CouplingError::Empty);
        }
        Ok(Self {
            weights: DMatrix::zeros(n, n),
        })
    }

    pub fn dimension(&self) -> usize {
        self.weights.nrows()
    }

    /// Coupling coefficient from `source` into `target`.
    ///
    /// # Panics
    /// If either index is `>= dimension()`. Use [`CouplingMatrix::get`] for a checked lookup.
    pub fn coefficient(&self, source: usize, target: usize) -> Real {
        self.weights[(source, target)]
    }

    /// Checked variant of [`CouplingMatrix::coefficient`].
    pub fn get(&self, source: usize, target: usize) -> Option<Real> {
        self.weights.get((source, target)).copied()
    }

    pub fn ensure_dimension(&self, expected: usize) -> CouplingResult<()> {
        if self.dimension() != expected {
            return Err(CouplingError::DimensionMismatch {
                expected,
                actual: self.dimension(),
            });
        }
        Ok(())
    }

    /// Non-zero couplings flowing into `target`, as `(source, coefficient)`.
    pub fn incoming(&self, target: usize) -> impl Iterator<Item = (usize, Real)> + '_ {
        (0..self.dimension())
            .map(move |source| (source, self.weights[(source, target)]))
            .filter(|&(_, w)| w != 0.0)
    }

    pub fn has_incoming(&self, target: usize) -> bool {
        self.weights.column(target).iter().any(|&w| w != 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.weights.iter().all(|&w| w == 0.0)
    }

    pub fn is_symmetric(&self, tol: Tolerances) -> bool {
        let n = self.dimension();
        (0..n).all(|i| {
            (i + 1..n).all(|j| nearly_equal(self.weights[(i, j)], self.weights[(j, i)], tol))
        })
    }

    /// Copy out as `rows[source][target]`.
    pub fn to_rows(&self) -> Vec<Vec<Real>> {
        (0..self.dimension())
            .map(|source| self.weights.row(source).iter().copied().collect())
            .collect()
    }
}
