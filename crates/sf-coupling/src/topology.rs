//! Preset coupling topologies.

use sf_core::Real;

use crate::builder::CouplingBuilder;
use crate::error::CouplingResult;
use crate::matrix::CouplingMatrix;

/// Every subsystem couples into every other with the same coefficient.
pub fn all_to_all(n: usize, coefficient: Real) -> CouplingResult<CouplingMatrix> {
    let mut builder = CouplingBuilder::new(n);
    for source in 0..n {
        for target in (0..n).filter(|&t| t != source) {
            builder.link(source, target, coefficient);
        }
    }
    builder.build()
}

/// Each subsystem couples both ways with its two ring neighbours.
pub fn ring(n: usize, coefficient: Real) -> CouplingResult<CouplingMatrix> {
    let mut builder = CouplingBuilder::new(n);
    if n > 1 {
        for i in 0..n {
            builder.link_both(i, (i + 1) % n, coefficient);
        }
    }
    builder.build()
}

/// Directional cascade `0 -> 1 -> ... -> n-1`.
pub fn chain(n: usize, coefficient: Real) -> CouplingResult<CouplingMatrix> {
    let mut builder = CouplingBuilder::new(n);
    for i in 1..n {
        builder.link(i - 1, i, coefficient);
    }
    builder.build()
}

/// `hub` couples outward into every other subsystem; nothing flows back.
pub fn star(n: usize, hub: usize, coefficient: Real) -> CouplingResult<CouplingMatrix> {
    let mut builder = CouplingBuilder::new(n);
    for target in (0..n).filter(|&t| t != hub) {
        builder.link(hub, target, coefficient);
    }
    builder.build()
}
