//! utmatrix: bounds-checked containers for upper-triangular square matrices.
//!
//! `TVector` is a fixed-length vector whose logical indices may start at an
//! offset, and `TMatrix` stores row `i` as a `TVector` starting at column `i`,
//! so only the upper triangle occupies memory. Every size and index is taken
//! as a signed value and validated before use; failures come back as
//! [`Error`] rather than panics.
pub mod config;
pub mod error;
pub mod math;

pub use config::{Limits, MAX_SIZE};
pub use error::{Error, Result};
pub use math::{TMatrix, TVector};
