//! Command-line interface.
//!
//! - [`args`] - clap definition of the `rulefuse` command
//! - [`entrypoint`] - config resolution and the dry-run / combine branches

pub mod args;
pub mod entrypoint;

pub use args::Cli;
pub use entrypoint::{init_tracing, run};
