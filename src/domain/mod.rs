//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the solve strategy selector (`Strategy`)
//! - output formatting configuration (`OutputFormat`)
//! - the resolved run configuration (`RunConfig`, `InputSource`)
//! - the validated problem dimensions (`Shape`)

pub mod types;

pub use types::*;
