//! Tally command-line host.
//!
//! The `tally` binary is a thin argument dispatcher over [`commands`]; the
//! pieces live in this library so they can be driven from tests with a
//! buffered print handler and an in-memory diagnostic emitter.

pub mod commands;
pub mod options;
mod tracing_setup;

pub use options::{CliOptions, OptionsError};
pub use tracing_setup::init_tracing;
