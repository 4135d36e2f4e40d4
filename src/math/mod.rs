//! Mathematical core: the least squares solver.

pub mod ols;

pub use ols::*;
