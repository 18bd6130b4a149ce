#![forbid(unsafe_code)]

//! The `lsys` command: list, inspect and draw catalog fractals.

pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod inspect;
pub mod logging;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
