//! File system utility functions
//!
//! Provides the small set of file operations the scaffolding action and the
//! update-check cache need, mapped onto [`CreateError`].

use crate::error::{CreateError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Utility struct for file system operations
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub const fn new() -> Self {
        Self
    }

    /// Create directories recursively
    #[instrument(skip(self))]
    pub fn create_dir_all<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path)
            .map_err(|e| CreateError::file_system("create directory", path, e))
    }

    /// Check if a path exists and is a file
    pub fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Write content to a file, creating parent directories if needed
    #[instrument(skip(self, contents))]
    pub fn write_file<P: AsRef<Path> + std::fmt::Debug, C: AsRef<[u8]>>(
        &self,
        path: P,
        contents: C,
    ) -> Result<()> {
        let path = path.as_ref();

        debug!("Writing file: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }

        fs::write(path, contents).map_err(|e| CreateError::file_system("write", path, e))
    }

    /// Read file contents as string
    #[instrument(skip(self))]
    pub fn read_file_to_string<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read_to_string(path).map_err(|e| CreateError::file_system("read", path, e))
    }

    /// Read and deserialize a JSON document
    pub fn read_json<T, P>(&self, path: P) -> Result<T>
    where
        T: DeserializeOwned,
        P: AsRef<Path> + std::fmt::Debug,
    {
        let path = path.as_ref();
        let content = self.read_file_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| CreateError::json(path, e))
    }

    /// Serialize a value as pretty JSON with a trailing newline
    pub fn write_json<T, P>(&self, path: P, value: &T) -> Result<()>
    where
        T: Serialize,
        P: AsRef<Path> + std::fmt::Debug,
    {
        let path = path.as_ref();
        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| CreateError::json(path, e))?;
        content.push('\n');
        self.write_file(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();
        let path = temp_dir.path().join("nested/dir/file.txt");

        fs_utils.write_file(&path, "hello").unwrap();

        assert!(fs_utils.is_file(&path));
        assert_eq!(fs_utils.read_file_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_json_round_trip_keeps_key_order() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();
        let path = temp_dir.path().join("package.json");

        fs::write(&path, r#"{"name":"docs","private":true,"dependencies":{}}"#).unwrap();
        let value: Value = fs_utils.read_json(&path).unwrap();
        fs_utils.write_json(&path, &value).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let name = written.find("\"name\"").unwrap();
        let private = written.find("\"private\"").unwrap();
        let deps = written.find("\"dependencies\"").unwrap();
        assert!(name < private && private < deps);
        assert!(written.ends_with('\n'));
        assert_eq!(value, json!({"name": "docs", "private": true, "dependencies": {}}));
    }

    #[test]
    fn test_read_json_reports_path_on_invalid_content() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Value> = fs_utils.read_json(&path);
        match result {
            Err(CreateError::Json { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected JSON error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let fs_utils = FileSystemUtils::new();
        let result = fs_utils.read_file_to_string("/nonexistent/create-turbo/file.txt");
        assert!(matches!(result, Err(CreateError::FileSystem { .. })));
    }
}
