//! sf-coupling: pairwise coupling structure between subsystems.
//!
//! Provides:
//! - Dense N×N coupling matrix with shape and structure validation
//! - Incremental builder for sparse link lists
//! - Preset topologies (all-to-all, ring, chain, star)
//!
//! # Example
//!
//! ```
//! use sf_coupling::CouplingBuilder;
//!
//! let mut builder = CouplingBuilder::new(3);
//! builder.link(0, 1, 0.5).link(1, 2, 0.25);
//! let coupling = builder.build().unwrap();
//!
//! assert_eq!(coupling.dimension(), 3);
//! assert_eq!(coupling.coefficient(0, 1), 0.5);
//! assert_eq!(coupling.coefficient(1, 0), 0.0);
//! ```

pub mod builder;
pub mod error;
pub mod matrix;
pub mod topology;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::CouplingBuilder;
pub use error::{CouplingError, CouplingResult};
pub use matrix::CouplingMatrix;
