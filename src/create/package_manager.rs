//! Supported package managers

use crate::error::CreateError;
use std::{fmt, str::FromStr};

/// The closed set of package managers a new repository can be set up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [Self; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    /// Executable name
    pub const fn command(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Infer the package manager from an `npm_config_user_agent` value
    ///
    /// The user agent starts with `<name>/<version>`; anything unrecognised
    /// falls back to npm.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        user_agent
            .and_then(|agent| agent.split('/').next())
            .and_then(|name| name.trim().parse().ok())
            .unwrap_or(Self::Npm)
    }

    /// Command that installs this tool globally
    pub const fn global_install_hint(self, package: &str) -> GlobalInstall<'_> {
        GlobalInstall {
            manager: self,
            package,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for PackageManager {
    type Err = CreateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.command() == s)
            .ok_or_else(|| {
                CreateError::validation(format!(
                    "Invalid package manager: {s}. Use one of: npm, pnpm, yarn, bun"
                ))
            })
    }
}

/// Renders the global install command for a package
#[derive(Debug, Clone, Copy)]
pub struct GlobalInstall<'a> {
    manager: PackageManager,
    package: &'a str,
}

impl fmt::Display for GlobalInstall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.manager {
            PackageManager::Yarn => write!(f, "yarn global add {}", self.package),
            PackageManager::Pnpm => write!(f, "pnpm add -g {}", self.package),
            PackageManager::Bun => write!(f, "bun add -g {}", self.package),
            PackageManager::Npm => write!(f, "npm i -g {}", self.package),
        }
    }
}
