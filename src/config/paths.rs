//! Path management for Kinsenas
//!
//! ## Path Resolution Order
//!
//! 1. `KINSENAS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/kinsenas` on Linux, `~/Library/Application Support/kinsenas`
//!    on macOS, `%APPDATA%\kinsenas\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::KinsenasError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "KINSENAS_DATA_DIR";

/// Manages all paths used by Kinsenas
#[derive(Debug, Clone)]
pub struct KinsenasPaths {
    base_dir: PathBuf,
}

impl KinsenasPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, KinsenasError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "kinsenas")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    KinsenasError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create KinsenasPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per persisted key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), KinsenasError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KinsenasError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| KinsenasError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
