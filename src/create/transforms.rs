//! `package.json` transforms applied after the project directory is ready

use crate::create::package_manager::PackageManager;
use crate::error::{CreateError, Result};
use serde_json::{Map, Value};
use std::fmt;

/// A single change made to `package.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// `packageManager` set to `<name>@<version>`
    PackageManager(String),
    /// `devDependencies.turbo` pinned to a version
    TurboVersion(String),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageManager(value) => write!(f, "packageManager -> {value}"),
            Self::TurboVersion(version) => write!(f, "devDependencies.turbo -> {version}"),
        }
    }
}

/// Inputs for the transforms
#[derive(Debug, Clone, Copy)]
pub struct TransformOptions<'a> {
    pub package_manager: PackageManager,
    /// Reported by `<pm> --version`; the field is left alone when unknown
    pub package_manager_version: Option<&'a str>,
    pub turbo_version: Option<&'a str>,
}

/// Apply every applicable transform to a parsed `package.json`
///
/// Returns the transforms that changed the document.
pub fn apply(package_json: &mut Value, options: TransformOptions<'_>) -> Result<Vec<Transform>> {
    let root = package_json
        .as_object_mut()
        .ok_or_else(|| CreateError::validation("package.json must contain a JSON object"))?;

    let mut applied = Vec::new();

    if let Some(version) = options.package_manager_version.map(str::trim).filter(|v| !v.is_empty()) {
        let value = format!("{}@{}", options.package_manager, version);
        if root.get("packageManager").and_then(Value::as_str) != Some(value.as_str()) {
            root.insert("packageManager".to_string(), Value::String(value.clone()));
            applied.push(Transform::PackageManager(value));
        }
    }

    if let Some(version) = options.turbo_version.map(str::trim).filter(|v| !v.is_empty()) {
        let dev_dependencies = root
            .entry("devDependencies")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| CreateError::validation("devDependencies in package.json must be an object"))?;

        if dev_dependencies.get("turbo").and_then(Value::as_str) != Some(version) {
            dev_dependencies.insert("turbo".to_string(), Value::String(version.to_string()));
            applied.push(Transform::TurboVersion(version.to_string()));
        }
    }

    Ok(applied)
}
