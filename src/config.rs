//! Dialect configuration persistence
//!
//! Stores lexer and bracket-search preferences in `~/.config/pgedit/config.yaml`

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lexer::{Keywords, LexerOptions};

/// Errors reading or writing a config file
#[derive(Debug)]
pub enum ConfigError {
    /// No config directory could be determined for this platform
    NoConfigDir,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    Serialize(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "No config directory available"),
            ConfigError::Io { path, source } => {
                write!(f, "Failed to access {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path.display(), source)
            }
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

/// Dialect settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Words lexed as keywords on top of the PostgreSQL table
    #[serde(default)]
    pub extra_keywords: Vec<String>,

    /// Keep comment tokens in the token stream
    #[serde(default = "default_true")]
    pub emit_comments: bool,

    /// Keep line-break tokens in the token stream
    #[serde(default)]
    pub emit_newlines: bool,

    /// How many lines before and after the origin a bracket search may scan
    #[serde(default = "default_bracket_search_lines")]
    pub bracket_search_lines: usize,
}

fn default_true() -> bool {
    true
}

fn default_bracket_search_lines() -> usize {
    1000
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            extra_keywords: Vec::new(),
            emit_comments: default_true(),
            emit_newlines: false,
            bracket_search_lines: default_bracket_search_lines(),
        }
    }
}

impl DialectConfig {
    /// Load config from disk, or return defaults if not found or unreadable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Lexer options for this dialect
    pub fn lexer_options(&self) -> LexerOptions {
        let mut keywords = Keywords::postgres();
        keywords.extend(self.extra_keywords.iter().map(String::as_str));
        LexerOptions {
            keywords,
            emit_newlines: self.emit_newlines,
            emit_comments: self.emit_comments,
        }
    }
}
