use anyhow::Result;
use create_turbo::{
    cli::{self, Controller},
    config::Config,
    create::Create,
    error::OutcomeError,
    notify::RegistryNotifier,
    setup_logging,
};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // --help, --version and usage errors exit inside the parser
    let request = cli::parse_args();

    let (config, config_error) = match Config::from_env() {
        Ok(config) => (config, None),
        Err(err) => (Config::base_from_env(), Some(err)),
    };

    setup_logging(config.debug)?;

    let controller = Controller::new(Create::new(&config), RegistryNotifier::new(&config));
    let mut stderr = std::io::stderr();

    let exit = match config_error {
        None => controller.run(&request, &mut stderr).await,
        Some(err) => controller.fail(OutcomeError::from(err), &mut stderr).await,
    };

    Ok(exit.into())
}
