//! Path resolution for ultifocus configuration and data files.
//!
//! All ultifocus data is stored in `~/.ultifocus/`:
//! - `config.yaml` - Main configuration file
//! - `ultifocus.log` - Log output (the TUI owns the terminal)

use std::path::PathBuf;

use crate::error::FocusError;

/// Paths to ultifocus configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.ultifocus/`
    pub root: PathBuf,
    /// Config file: `~/.ultifocus/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.ultifocus/ultifocus.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// `ULTIFOCUS_HOME` overrides the root directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FocusError> {
        if let Ok(root) = std::env::var("ULTIFOCUS_HOME") {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| FocusError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".ultifocus")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("ultifocus.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocusError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-ultifocus");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.log_file, root.join("ultifocus.log"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
    }
}
