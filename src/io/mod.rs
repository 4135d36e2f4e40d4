//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - coefficient output (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
