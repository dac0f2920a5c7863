//! Incremental coupling builder.

use nalgebra::DMatrix;
use sf_core::Real;

use crate::error::{CouplingError, CouplingResult};
use crate::matrix::CouplingMatrix;

/// Builder for constructing a coupling matrix from individual links.
///
/// Use `link` and `link_both` to describe the couplings, then call `build()`
/// to validate and freeze them into an immutable `CouplingMatrix`.
/// A later link between the same pair replaces the earlier one.
#[derive(Debug, Clone)]
pub struct CouplingBuilder {
    dimension: usize,
    links: Vec<(usize, usize, Real)>,
}

impl CouplingBuilder {
    /// Create a builder for `dimension` subsystems with no links.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            links: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Add a directional link: pressure in `source` propagates into `target`.
    pub fn link(&mut self, source: usize, target: usize, coefficient: Real) -> &mut Self {
        self.links.push((source, target, coefficient));
        self
    }

    /// Add the same coefficient in both directions.
    pub fn link_both(&mut self, a: usize, b: usize, coefficient: Real) -> &mut Self {
        self.link(a, b, coefficient).link(b, a, coefficient)
    }

    /// Build and validate the coupling matrix.
    pub fn build(&self) -> CouplingResult<CouplingMatrix> {
        if self.dimension == 0 {
            return Err(CouplingError::Empty);
        }

        let mut weights = DMatrix::zeros(self.dimension, self.dimension);
        for &(source, target, coefficient) in &self.links {
            if source >= self.dimension || target >= self.dimension {
                return Err(CouplingError::LinkOutOfRange {
                    source_index: source,
                    target,
                    dimension: self.dimension,
                });
            }
            weights[(source, target)] = coefficient;
        }

        CouplingMatrix::from_matrix(weights)
    }
}
