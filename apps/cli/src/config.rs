//! # Settings
//!
//! Layered settings for the `cartsplit` binary.
//!
//! ## Precedence (lowest to highest)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Compiled defaults                                                   │
//! │  2. TOML file: `--config PATH`, or `./cartsplit.toml` when present      │
//! │  3. Environment: `CARTSPLIT_EPSILON`, `CARTSPLIT_OUTPUT`, ...           │
//! │  4. Command-line flags                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! epsilon = 1e-9
//! output = "split.json"
//! error_output = "error.json"
//! print = false
//! log_filter = "warn,cartsplit=debug"
//! ```

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use cartsplit_core::Tolerance;
use serde::Deserialize;
use thiserror::Error;

/// Settings file picked up from the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "cartsplit.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CARTSPLIT";

/// Log filter used when neither settings nor `RUST_LOG` give one.
pub const DEFAULT_LOG_FILTER: &str = "warn,cartsplit=info";

/// Settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("Cannot load settings: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value parsed but is out of range.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Relative tolerance for validation and reconciliation
    pub epsilon: f64,

    /// Where to write the split snapshot
    pub output: Option<PathBuf>,

    /// Where to write an error report on failure
    pub error_output: Option<PathBuf>,

    /// Print roommates and cart to stdout after a split
    pub print: bool,

    /// `tracing` filter directives
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            epsilon: f64::EPSILON,
            output: None,
            error_output: None,
            print: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Values taken from command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub epsilon: Option<f64>,
    pub output: Option<PathBuf>,
    pub error_output: Option<PathBuf>,
    pub quiet: bool,
}

impl Settings {
    /// Loads defaults, the settings file and `CARTSPLIT_*` variables.
    ///
    /// An explicit `config_path` must exist. Without one, `cartsplit.toml`
    /// in the working directory is used if it is there.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validated()
    }

    /// Applies command-line flags on top of loaded settings.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(epsilon) = overrides.epsilon {
            self.epsilon = epsilon;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        if overrides.error_output.is_some() {
            self.error_output = overrides.error_output;
        }
        if overrides.quiet {
            self.print = false;
        }

        self.validated()
    }

    /// Tolerance handed to the validator and the engine.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::relative(self.epsilon)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        // Also rejects NaN
        if !(self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "epsilon",
                value: self.epsilon.to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.epsilon, f64::EPSILON);
        assert!(settings.print);
        assert_eq!(settings.log_filter, "warn,cartsplit=info");
        assert_eq!(settings.tolerance(), Tolerance::MACHINE);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "epsilon = 1e-9\nprint = false\noutput = \"split.json\"\n",
        );

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.epsilon, 1e-9);
        assert!(!settings.print);
        assert_eq!(settings.output.as_deref(), Some(Path::new("split.json")));
        assert_eq!(settings.error_output, None);
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_out_of_range_epsilon_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "epsilon = 0.0\n");
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "epsilon", .. }));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default()
            .apply(Overrides {
                epsilon: Some(1e-6),
                output: Some(PathBuf::from("out.json")),
                error_output: None,
                quiet: true,
            })
            .unwrap();

        assert_eq!(settings.epsilon, 1e-6);
        assert_eq!(settings.output.as_deref(), Some(Path::new("out.json")));
        assert!(!settings.print);
    }

    #[test]
    fn test_empty_overrides_keep_settings() {
        let base = Settings {
            output: Some(PathBuf::from("keep.json")),
            ..Settings::default()
        };
        let settings = base.clone().apply(Overrides::default()).unwrap();
        assert_eq!(settings, base);
    }

    #[test]
    fn test_invalid_epsilon_overrides() {
        for epsilon in [0.0, -1e-9, 1.0, f64::NAN] {
            let err = Settings::default()
                .apply(Overrides {
                    epsilon: Some(epsilon),
                    ..Overrides::default()
                })
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "epsilon", .. }));
        }
    }
}
