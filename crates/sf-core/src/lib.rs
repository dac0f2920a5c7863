//! sf-core: stable foundation for strainflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{CoreError, CoreResult, ErrorKind};
pub use numeric::*;
