//! Example source resolution
//!
//! An example is either the name of an official Turborepo example or a
//! GitHub URL pointing at a repository, optionally narrowed to a branch and
//! subdirectory. Branch names may themselves contain `/`, in which case the
//! subdirectory has to be given separately via `--example-path`.

use crate::error::{CreateError, Result};
use regex::Regex;
use reqwest::Url;
use std::{fmt, sync::LazyLock};

/// Example used when none is requested
pub const DEFAULT_EXAMPLE: &str = "basic";

static EXAMPLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("example name pattern is valid")
});

/// Where the new repository's contents come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleSource {
    /// An example from the official Turborepo repository
    Official(String),
    /// A GitHub repository, branch and subdirectory
    Repository(RepoInfo),
}

/// Coordinates of an example hosted on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
    /// `None` means the repository's default branch
    pub branch: Option<String>,
    /// Subdirectory inside the branch, empty for the repository root
    pub file_path: String,
}

impl ExampleSource {
    /// Resolve the `--example` / `--example-path` pair
    pub fn resolve(example: Option<&str>, example_path: Option<&str>) -> Result<Self> {
        let example_path = example_path.map(str::trim).filter(|p| !p.is_empty());

        let Some(example) = example.map(str::trim).filter(|e| !e.is_empty()) else {
            return Ok(Self::Official(DEFAULT_EXAMPLE.to_string()));
        };

        if example.starts_with("http://") || example.starts_with("https://") {
            let url = Url::parse(example)
                .map_err(|e| CreateError::validation(format!("Invalid URL {example}: {e}")))?;
            return RepoInfo::from_url(&url, example_path).map(Self::Repository);
        }

        if !EXAMPLE_NAME.is_match(example) {
            return Err(CreateError::validation(format!(
                "Invalid example name: {example}"
            )));
        }

        Ok(Self::Official(example.to_string()))
    }

    /// Whether this is the default starter
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Official(name) if name == DEFAULT_EXAMPLE)
    }
}

impl RepoInfo {
    /// Split a GitHub URL of the form
    /// `https://github.com/<owner>/<repo>[/tree/<branch>[/<path>]]`
    pub fn from_url(url: &Url, example_path: Option<&str>) -> Result<Self> {
        if url.host_str() != Some("github.com") {
            return Err(CreateError::validation(format!(
                "Invalid URL: {url}. Only GitHub repositories are supported"
            )));
        }

        let mut segments = url.path().split('/').skip(1);
        let owner = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        let tree = segments.next();
        let source_branch = segments.next();
        let file: Vec<&str> = segments.collect();

        if owner.is_empty() || name.is_empty() {
            return Err(CreateError::validation(format!(
                "Invalid URL: {url}. Expected https://github.com/<owner>/<repo>"
            )));
        }

        let file_path = match example_path {
            Some(path) => path.trim_start_matches('/').to_string(),
            None => file.join("/"),
        };

        // Repository root, with or without a trailing slash
        if tree.is_none() || (tree == Some("") && source_branch.is_none()) {
            return Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
                branch: None,
                file_path,
            });
        }

        let branch = match (example_path, source_branch) {
            (Some(_), Some(first)) => {
                let full = std::iter::once(first)
                    .chain(file.iter().copied())
                    .collect::<Vec<_>>()
                    .join("/");
                strip_example_path(&full, &file_path)
            }
            (None, Some(branch)) => branch.to_string(),
            (_, None) => String::new(),
        };

        if tree != Some("tree") || branch.is_empty() {
            return Err(CreateError::validation(format!(
                "Invalid URL: {url}. Expected https://github.com/<owner>/<repo>/tree/<branch>"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            branch: Some(branch),
            file_path,
        })
    }
}

/// Remove the first `/<path>` occurrence from a branch-and-path string, or a
/// trailing slash when the path does not occur
fn strip_example_path(full: &str, file_path: &str) -> String {
    let needle = format!("/{file_path}");
    if !file_path.is_empty() {
        if let Some(index) = full.find(&needle) {
            let mut branch = String::with_capacity(full.len());
            branch.push_str(&full[..index]);
            branch.push_str(&full[index + needle.len()..]);
            return branch;
        }
    }
    full.strip_suffix('/').unwrap_or(full).to_string()
}

impl fmt::Display for ExampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Official(name) => write!(f, "{name}"),
            Self::Repository(repo) => write!(f, "{repo}"),
        }
    }
}

impl fmt::Display for RepoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)?;
        if let Some(branch) = &self.branch {
            write!(f, "#{branch}")?;
        }
        if !self.file_path.is_empty() {
            write!(f, " ({})", self.file_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(example: &str, example_path: Option<&str>) -> RepoInfo {
        match ExampleSource::resolve(Some(example), example_path).unwrap() {
            ExampleSource::Repository(info) => info,
            other => panic!("Expected repository, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_example_uses_default() {
        let source = ExampleSource::resolve(None, None).unwrap();
        assert!(source.is_default());
        assert_eq!(source.to_string(), "basic");
    }

    #[test]
    fn test_official_example_name() {
        let source = ExampleSource::resolve(Some("with-tailwind"), None).unwrap();
        assert_eq!(source, ExampleSource::Official("with-tailwind".to_string()));
        assert!(!source.is_default());
    }

    #[test]
    fn test_example_path_with_official_name_is_ignored() {
        let source = ExampleSource::resolve(Some("kitchen-sink"), Some("foo/bar")).unwrap();
        assert_eq!(source, ExampleSource::Official("kitchen-sink".to_string()));
    }

    #[test]
    fn test_invalid_example_name() {
        assert!(ExampleSource::resolve(Some("../etc"), None).is_err());
        assert!(ExampleSource::resolve(Some("With Spaces"), None).is_err());
    }

    #[test]
    fn test_repository_root() {
        let info = repo("https://github.com/vercel/turbo", None);
        assert_eq!(info.owner, "vercel");
        assert_eq!(info.name, "turbo");
        assert_eq!(info.branch, None);
        assert_eq!(info.file_path, "");

        let info = repo("https://github.com/vercel/turbo/", None);
        assert_eq!(info.branch, None);
    }

    #[test]
    fn test_branch_and_subdirectory() {
        let info = repo("https://github.com/vercel/turbo/tree/main/examples/basic", None);
        assert_eq!(info.branch.as_deref(), Some("main"));
        assert_eq!(info.file_path, "examples/basic");
        assert_eq!(info.to_string(), "vercel/turbo#main (examples/basic)");
    }

    #[test]
    fn test_branch_with_slash_needs_example_path() {
        let info = repo(
            "https://github.com/vercel/turbo/tree/bug/fix-1/foo/bar",
            Some("foo/bar"),
        );
        assert_eq!(info.branch.as_deref(), Some("bug/fix-1"));
        assert_eq!(info.file_path, "foo/bar");

        let info = repo(
            "https://github.com/vercel/turbo/tree/bug/fix-1/foo/bar",
            Some("/foo/bar"),
        );
        assert_eq!(info.branch.as_deref(), Some("bug/fix-1"));
        assert_eq!(info.file_path, "foo/bar");
    }

    #[test]
    fn test_example_path_not_in_url_strips_trailing_slash() {
        let info = repo("https://github.com/vercel/turbo/tree/bug/fix-1/", Some("examples/basic"));
        assert_eq!(info.branch.as_deref(), Some("bug/fix-1"));
        assert_eq!(info.file_path, "examples/basic");
    }

    #[test]
    fn test_non_github_urls_are_rejected() {
        let err = ExampleSource::resolve(Some("https://gitlab.com/vercel/turbo"), None).unwrap_err();
        assert!(err.to_string().contains("Only GitHub repositories are supported"));
    }

    #[test]
    fn test_malformed_github_urls_are_rejected() {
        assert!(ExampleSource::resolve(Some("https://github.com/vercel"), None).is_err());
        assert!(ExampleSource::resolve(Some("https://github.com/vercel/turbo/blob/main"), None).is_err());
        assert!(ExampleSource::resolve(Some("https://github.com/vercel/turbo/tree"), None).is_err());
    }
}
