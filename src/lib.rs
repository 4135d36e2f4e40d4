//! `estols` library crate.
//!
//! The binary (`estols`) is a thin wrapper around this library so that the
//! load → validate → solve pipeline is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
