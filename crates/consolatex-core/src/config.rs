//! Loading and saving [`RenderOptions`] as TOML.
//!
//! ```toml
//! tag_blocks = true
//! tag_leaves = false
//! ```
//!
//! Missing keys take their default values.

use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::render::RenderOptions;

/// Failure to read or write a render options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file at {}: {source}", .path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file was read but is not valid options TOML.
    #[error("failed to parse config file at {}: {source}", .path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The options could not be encoded as TOML.
    #[error("failed to serialize config: {source}")]
    Serialize {
        /// Underlying TOML error.
        source: toml::ser::Error,
    },

    /// The file or one of its parent directories could not be written.
    #[error("failed to write config file at {}: {source}", .path.display())]
    Write {
        /// Path that was written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl RenderOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load options from a file, or `None` if it does not exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no render config at {}", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let options = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("loaded render config from {}: {:?}", path.display(), options);
        Ok(Some(options))
    }

    /// Write options to a file, creating parent directories as needed.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })?;
        std::fs::write(path, content).map_err(write_err)?;
        Ok(())
    }
}
