//! Execution controller
//!
//! Runs one lifecycle per process: invoke the scaffolding action, report a
//! failure if there was one, await the update notifier, then hand back the
//! exit status. The notifier is awaited exactly once on every path, and only
//! after any failure message has been written.

use crate::{cli::InvocationRequest, create::Scaffold, error::OutcomeError, notify::UpdateNotifier};
use colored::Colorize;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, instrument};

/// Terminal status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl Exit {
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        Self::from(exit.code())
    }
}

/// Owns the scaffolding action and the update notifier for a single run
#[derive(Debug)]
pub struct Controller<S, N> {
    scaffold: S,
    notifier: N,
}

impl<S: Scaffold, N: UpdateNotifier> Controller<S, N> {
    pub const fn new(scaffold: S, notifier: N) -> Self {
        Self { scaffold, notifier }
    }

    /// Run the lifecycle, writing any failure report to `out`
    #[instrument(skip(self, out))]
    pub async fn run<W: Write>(&self, request: &InvocationRequest, out: &mut W) -> Exit {
        match self.scaffold.create(request).await {
            Ok(()) => {
                debug!("Scaffolding action succeeded");
                self.notifier.notify().await;
                Exit::Success
            }
            Err(outcome) => {
                debug!("Scaffolding action failed: {:?}", outcome);
                self.fail(outcome, out).await
            }
        }
    }

    /// Finish a run that failed before the scaffolding action could start
    pub async fn fail<W: Write>(&self, outcome: OutcomeError, out: &mut W) -> Exit {
        if let Err(e) = report_failure(&outcome, out) {
            debug!("Could not write failure report: {}", e);
        }
        self.notifier.notify().await;
        Exit::Failure
    }
}

/// Write the failure block for an outcome
pub fn report_failure<W: Write>(outcome: &OutcomeError, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    match outcome {
        OutcomeError::CommandFailure { command } => {
            writeln!(out, "{} {} has failed.", ">>>".red(), command.bold())?;
        }
        OutcomeError::UnexpectedFailure { detail } => {
            writeln!(
                out,
                "{} Unexpected error. Please report it as a bug:",
                ">>>".red()
            )?;
            writeln!(out, "{detail}")?;
        }
    }
    writeln!(out)?;
    out.flush()
}
