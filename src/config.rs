//! Configuration for Millia
//!
//! Settings come from, in order of precedence:
//! - CLI arguments
//! - the config file (`--config`, or `~/.config/millia/config.json`)
//! - built-in defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::session::SessionOptions;

/// CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "millia")]
#[command(version)]
#[command(about = "A minimal terminal text editor", long_about = None)]
pub struct CliArgs {
    /// File to open; starts an empty unnamed buffer when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Ctrl-Q presses needed to quit with unsaved changes
    #[arg(long, value_name = "N")]
    pub quit_times: Option<u32>,
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Consecutive Ctrl-Q presses needed to quit with unsaved changes
    #[serde(default = "default_quit_times")]
    pub quit_times: u32,

    /// Seconds a status message stays visible
    #[serde(default = "default_message_timeout_secs")]
    pub message_timeout_secs: u64,

    /// Log file; logging is off when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_quit_times() -> u32 {
    3
}
fn default_message_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quit_times: default_quit_times(),
            message_timeout_secs: default_message_timeout_secs(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration and apply CLI overrides
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => Self::default(),
            }
        };

        config.apply_cli_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `$HOME/.config/millia/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("millia")
                .join("config.json")
        })
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(n) = args.quit_times {
            self.quit_times = n;
        }
        if let Some(log) = &args.log {
            self.log_file = Some(log.clone());
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.quit_times == 0 {
            return Err(ConfigError::Invalid(
                "quit_times must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            quit_times: self.quit_times,
            message_timeout: Duration::from_secs(self.message_timeout_secs),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.quit_times, 3);
        assert_eq!(config.message_timeout_secs, 5);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "quit_times": 1 }"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.quit_times, 1);
        assert_eq!(config.message_timeout_secs, 5);
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "quit_times": 1, "log_file": "a.log" }"#).unwrap();

        let args = CliArgs {
            config: Some(path),
            quit_times: Some(4),
            log: Some(PathBuf::from("b.log")),
            ..Default::default()
        };
        let config = Config::load_with_args(&args).unwrap();
        assert_eq!(config.quit_times, 4);
        assert_eq!(config.log_file, Some(PathBuf::from("b.log")));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/millia.json")),
            ..Default::default()
        };
        assert!(matches!(
            Config::load_with_args(&args),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_bad_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ quit_times = 2 }").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_zero_quit_times_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "quit_times": 0 }"#).unwrap();
        let args = CliArgs {
            config: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            Config::load_with_args(&args),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_cli_parses_positional_file() {
        let args = CliArgs::parse_from(["millia", "--quit-times", "2", "notes.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.quit_times, Some(2));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_session_options() {
        let options = Config::default().session_options();
        assert_eq!(options.quit_times, 3);
        assert_eq!(options.message_timeout, Duration::from_secs(5));
    }
}
