//! Command-line interface components
//!
//! This module contains CLI-specific code for the ABIDE Fetcher application:
//! argument parsing and the command handlers.

pub mod args;
pub mod commands;

pub use args::{CatalogArgs, Cli, Commands, FetchArgs, GlobalArgs};
pub use commands::{handle_catalog, handle_fetch};
