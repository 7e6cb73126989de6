//! Scaffolding action
//!
//! The execution controller only knows the [`Scaffold`] seam. [`Create`] is
//! the implementation shipped with the binary: it resolves the request into a
//! [`CreatePlan`], prepares the project directory, applies the `package.json`
//! transforms and runs the package manager install.

pub mod example;
pub mod package_manager;
pub mod transforms;

pub use example::{ExampleSource, RepoInfo};
pub use package_manager::PackageManager;

use crate::{
    cli::InvocationRequest,
    config::Config,
    error::{CreateError, OutcomeError, Result},
    utils::{FileSystemUtils, ProcessRunner},
};
use colored::Colorize;
use regex::Regex;
use serde_json::Value;
use std::{
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};
use tracing::{debug, info, instrument, warn};

/// Directory used when none is given on the command line
pub const DEFAULT_DIRECTORY: &str = "my-turborepo";

const MAX_PACKAGE_NAME_LENGTH: usize = 214;

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9~-][a-z0-9._~-]*$").expect("package name pattern is valid")
});

/// The scaffolding action invoked once per run
#[allow(async_fn_in_trait)]
pub trait Scaffold {
    /// Materialize a new repository for the request
    async fn create(&self, request: &InvocationRequest) -> std::result::Result<(), OutcomeError>;
}

/// Everything the scaffolding steps need, resolved from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub directory: PathBuf,
    pub project_name: String,
    pub package_manager: PackageManager,
    pub example: ExampleSource,
    pub turbo_version: Option<String>,
    pub skip_install: bool,
    pub skip_transforms: bool,
}

impl CreatePlan {
    /// Resolve a request relative to `base`
    ///
    /// `user_agent` is consulted only when no package manager was given.
    pub fn resolve(
        request: &InvocationRequest,
        base: &Path,
        user_agent: Option<&str>,
    ) -> Result<Self> {
        let relative = request
            .project_directory
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .unwrap_or(DEFAULT_DIRECTORY);
        let directory = normalize(&base.join(relative));

        let project_name = directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CreateError::validation(format!("Could not determine a project name from {relative}"))
            })?;
        validate_project_name(&project_name)?;

        let package_manager = match request.package_manager.as_deref() {
            Some(name) => name.parse()?,
            None => PackageManager::from_user_agent(user_agent),
        };

        let example = ExampleSource::resolve(
            request.example.as_deref(),
            request.example_path.as_deref(),
        )?;

        Ok(Self {
            directory,
            project_name,
            package_manager,
            example,
            turbo_version: request.turbo_version.clone(),
            skip_install: request.skip_install,
            skip_transforms: request.skip_transforms,
        })
    }
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// npm package name rules for the new repository's root package
fn validate_project_name(name: &str) -> Result<()> {
    let problem = if name.len() > MAX_PACKAGE_NAME_LENGTH {
        Some("name can no longer contain more than 214 characters")
    } else if name.starts_with('.') || name.starts_with('_') {
        Some("name cannot start with a period or an underscore")
    } else if name.chars().any(char::is_uppercase) {
        Some("name can no longer contain capital letters")
    } else if !PACKAGE_NAME.is_match(name) {
        Some("name can only contain URL-friendly characters")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(CreateError::validation(format!(
            "Could not create a project called \"{name}\" because of npm naming restrictions: {problem}"
        ))),
        None => Ok(()),
    }
}

/// Scaffolding action backed by the local file system and package manager
#[derive(Debug, Clone)]
pub struct Create {
    runner: ProcessRunner,
    fs_utils: FileSystemUtils,
    user_agent: Option<String>,
}

impl Create {
    pub fn new(config: &Config) -> Self {
        Self {
            runner: ProcessRunner::new(config.debug),
            fs_utils: FileSystemUtils::new(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Resolve and execute a request, returning the finished plan
    #[instrument(skip(self))]
    pub async fn run(&self, request: &InvocationRequest) -> Result<CreatePlan> {
        let base = std::env::current_dir()
            .map_err(|e| CreateError::file_system("read current directory", ".", e))?;
        let plan = CreatePlan::resolve(request, &base, self.user_agent.as_deref())?;

        info!(
            "Creating a new Turborepo in {} with {}",
            plan.directory.display(),
            plan.package_manager
        );
        debug!("Resolved plan: {:?}", plan);

        match &plan.example {
            ExampleSource::Official(name) if request.example_path.is_some() => {
                warn!("--example-path only applies to GitHub URLs, ignoring it for example {name}");
            }
            source => info!("Using example: {}", source),
        }

        self.fs_utils.create_dir_all(&plan.directory)?;

        let package_json = plan.directory.join("package.json");
        let has_package_json = self.fs_utils.is_file(&package_json);

        if plan.skip_transforms {
            if plan.turbo_version.is_some() {
                warn!("--turbo-version has no effect together with --skip-transforms");
            }
        } else if has_package_json {
            self.transform(&plan, &package_json).await?;
        } else {
            debug!("No package.json in {}, skipping transforms", plan.directory.display());
        }

        if plan.skip_install {
            info!("Skipping install");
        } else if has_package_json {
            self.install(&plan).await?;
        } else {
            warn!(
                "No package.json in {}, skipping install",
                plan.directory.display()
            );
        }

        Ok(plan)
    }

    #[instrument(skip(self, plan))]
    async fn transform(&self, plan: &CreatePlan, package_json: &Path) -> Result<()> {
        let pm = plan.package_manager;
        let version = match self
            .runner
            .run_command_with_output(pm.command(), &["--version"], Some(&plan.directory))
            .await
        {
            Ok(output) => Some(output.stdout),
            Err(e) => {
                warn!("Could not determine the {} version: {}", pm, e);
                None
            }
        };

        let mut document: Value = self.fs_utils.read_json(package_json)?;
        let applied = transforms::apply(
            &mut document,
            transforms::TransformOptions {
                package_manager: pm,
                package_manager_version: version.as_deref(),
                turbo_version: plan.turbo_version.as_deref(),
            },
        )?;

        if applied.is_empty() {
            debug!("package.json already up to date");
            return Ok(());
        }

        for transform in &applied {
            info!("Applied transform: {}", transform);
        }
        self.fs_utils.write_json(package_json, &document)
    }

    #[instrument(skip(self, plan))]
    async fn install(&self, plan: &CreatePlan) -> Result<()> {
        info!("Installing dependencies with {}", plan.package_manager);
        self.runner
            .run_command(plan.package_manager.command(), &["install"], Some(&plan.directory))
            .await
    }
}

impl Scaffold for Create {
    async fn create(&self, request: &InvocationRequest) -> std::result::Result<(), OutcomeError> {
        let plan = self.run(request).await?;

        println!();
        println!(
            "{} Created {} at {}",
            "Success!".green().bold(),
            plan.project_name,
            plan.directory.display()
        );
        println!();
        Ok(())
    }
}
