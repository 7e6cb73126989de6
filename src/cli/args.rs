//! Command-line option schema and argument parsing
//!
//! [`Args`] is the declarative schema; [`InvocationRequest`] is what the rest
//! of the program sees once parsing succeeded. `--help` and `--version` win
//! over everything else on the command line, including input that would
//! otherwise be a usage error.

use crate::create::example::DEFAULT_EXAMPLE;
use clap::{error::ErrorKind, ArgAction, Parser};
use std::ffi::OsString;

const BIN_NAME: &str = "create-turbo";

/// Create a new Turborepo
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
#[command(override_usage = "create-turbo <project-directory> <package-manager> [options]")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Directory to create the project in
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Package manager to use (npm, pnpm, yarn or bun)
    #[arg(value_name = "package-manager")]
    pub package_manager: Option<String>,

    /// Do not run a package manager install after creating the project
    #[arg(
        long,
        value_name = "ignored",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = flag_present
    )]
    pub skip_install: Option<bool>,

    /// Do not run any code transformation after creating the project
    #[arg(
        long,
        value_name = "ignored",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = flag_present
    )]
    pub skip_transforms: Option<bool>,

    /// Use a specific version of turbo (default: latest)
    #[arg(long, value_name = "version")]
    pub turbo_version: Option<String>,

    /// An example to bootstrap the app with. You can use an example name
    /// from the official Turborepo repo or a GitHub URL. The URL can use
    /// any branch and/or subdirectory
    #[arg(
        short = 'e',
        long,
        value_name = "name|github-url",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EXAMPLE
    )]
    pub example: Option<String>,

    /// In a rare case, your GitHub URL might contain a branch name with
    /// a slash (e.g. bug/fix-1) and the path to the example (e.g. foo/bar).
    /// In this case, you must specify the path to the example separately:
    /// --example-path foo/bar
    #[arg(short = 'p', long, value_name = "path-to-example")]
    pub example_path: Option<String>,

    /// Output the current version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Display help for command
    #[arg(short = 'h', long, action = ArgAction::Help)]
    help: Option<bool>,
}

/// Validated result of argument parsing
///
/// The execution controller only ever borrows a request; nothing downstream
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRequest {
    pub project_directory: Option<String>,
    pub package_manager: Option<String>,
    pub skip_install: bool,
    pub skip_transforms: bool,
    pub turbo_version: Option<String>,
    pub example: Option<String>,
    pub example_path: Option<String>,
}

impl From<Args> for InvocationRequest {
    fn from(args: Args) -> Self {
        Self {
            project_directory: args.project_directory,
            package_manager: args.package_manager,
            skip_install: args.skip_install.is_some(),
            skip_transforms: args.skip_transforms.is_some(),
            turbo_version: args.turbo_version,
            example: args.example,
            example_path: args.example_path,
        }
    }
}

/// Boolean flags accept and ignore an attached value (`--skip-install=false`)
fn flag_present(_value: &str) -> Result<bool, String> {
    Ok(true)
}

/// Parse the process arguments
///
/// Usage errors, `--help` and `--version` are printed by clap and terminate
/// the process here.
pub fn parse_args() -> InvocationRequest {
    try_parse_from(std::env::args_os().skip(1)).unwrap_or_else(|err| err.exit())
}

/// Parse an argument vector that excludes the program name
pub fn try_parse_from<I, T>(args: I) -> Result<InvocationRequest, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let argv = std::iter::once(OsString::from(BIN_NAME)).chain(args.iter().cloned());

    Args::try_parse_from(argv)
        .map(InvocationRequest::from)
        .map_err(|err| match informational_flag(&args) {
            Some(flag) if !is_informational(&err) => {
                match Args::try_parse_from([OsString::from(BIN_NAME), flag.clone()]) {
                    Err(informational) => informational,
                    Ok(_) => err,
                }
            }
            _ => err,
        })
}

/// First `--help`/`--version` spelling before a `--` separator
fn informational_flag(args: &[OsString]) -> Option<&OsString> {
    args.iter()
        .take_while(|arg| arg.to_str() != Some("--"))
        .find(|arg| matches!(arg.to_str(), Some("-h" | "--help" | "-v" | "--version")))
}

fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}
