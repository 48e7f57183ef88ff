//! Vector and upper-triangular matrix containers.
//!
//! `TMatrix` is built from `TVector` rows; both validate sizes and indices
//! up front and report failures through [`crate::Error`].
pub mod matrix;
pub mod vector;

pub use matrix::TMatrix;
pub use vector::TVector;
