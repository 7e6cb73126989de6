//! # create-turbo
//!
//! Command-line entry point that creates a new Turborepo.
//!
//! The binary parses its arguments into an [`cli::InvocationRequest`], hands
//! the request to the scaffolding action ([`create::Create`]), reports a
//! failure if there was one, and always lets the update notifier
//! ([`notify::RegistryNotifier`]) finish before the process exits.
//!
//! ## Example
//!
//! ```no_run
//! use create_turbo::{cli::{self, Controller}, config::Config, create::Create, notify::RegistryNotifier};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let request = cli::try_parse_from(["my-turborepo", "pnpm", "--skip-install"])?;
//! let config = Config::from_env()?;
//! let controller = Controller::new(Create::new(&config), RegistryNotifier::new(&config));
//! let exit = controller.run(&request, &mut std::io::stderr()).await;
//! println!("exit code {}", exit.code());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod create;
pub mod error;
pub mod notify;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
