//! Command-line interface module
//!
//! Provides argument parsing and the execution controller.

pub mod args;
pub mod commands;

pub use args::{Args, InvocationRequest, parse_args, try_parse_from};
pub use commands::{Controller, Exit, report_failure};
