//! Application configuration loaded from TOML with environment overrides.
//!
//! Resolution order: built-in defaults, then the TOML file (a missing file
//! is not an error), then `TASKLANE_*` environment variables. The result is
//! validated before use.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "tasklane.toml";

const ENV_DATABASE_URL: &str = "TASKLANE_DATABASE_URL";
const ENV_POOL_SIZE: &str = "TASKLANE_POOL_SIZE";
const ENV_LOG_FILTER: &str = "TASKLANE_LOG_FILTER";
const ENV_MODEL_ENABLED: &str = "TASKLANE_MODEL_ENABLED";
const ENV_MODEL_COMMAND: &str = "TASKLANE_MODEL_COMMAND";
const ENV_MODEL_TIMEOUT_SECS: &str = "TASKLANE_MODEL_TIMEOUT_SECS";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`AppConfig`].
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidOverride {
        /// Environment variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The merged configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,

    /// Maximum number of pooled database connections.
    pub pool_size: u32,

    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// External language-model settings.
    pub language_model: LanguageModelConfig,
}

/// Settings for the external language-model command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LanguageModelConfig {
    /// Whether commands are sent to the model before the fallback parser.
    pub enabled: bool,

    /// Program and arguments; the prompt is written to its stdin.
    pub command: Vec<String>,

    /// Seconds to wait for a reply before using the fallback parser.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/tasklane".to_owned(),
            pool_size: 8,
            log_filter: "tasklane=info,warn".to_owned(),
            language_model: LanguageModelConfig::default(),
        }
    }
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: Vec::new(),
            timeout_secs: 10,
        }
    }
}

impl LanguageModelConfig {
    /// Returns the reply timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Loads configuration from `path` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, an
    /// override is malformed or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Applies `TASKLANE_*` overrides from `vars`; other keys are ignored.
    ///
    /// `TASKLANE_MODEL_COMMAND` is split on whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for unparseable numbers or
    /// booleans.
    pub fn apply_overrides(
        &mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), ConfigError> {
        for (key, value) in vars {
            match key.as_str() {
                ENV_DATABASE_URL => self.database_url = value,
                ENV_POOL_SIZE => self.pool_size = parse_override(ENV_POOL_SIZE, value)?,
                ENV_LOG_FILTER => self.log_filter = value,
                ENV_MODEL_ENABLED => {
                    self.language_model.enabled = parse_override(ENV_MODEL_ENABLED, value)?;
                }
                ENV_MODEL_COMMAND => {
                    self.language_model.command =
                        value.split_whitespace().map(str::to_owned).collect();
                }
                ENV_MODEL_TIMEOUT_SECS => {
                    self.language_model.timeout_secs =
                        parse_override(ENV_MODEL_TIMEOUT_SECS, value)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must not be empty"));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::Invalid("pool_size must be > 0"));
        }
        if self.language_model.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "language_model.timeout_secs must be > 0",
            ));
        }
        let has_program = self
            .language_model
            .command
            .first()
            .is_some_and(|program| !program.trim().is_empty());
        if self.language_model.enabled && !has_program {
            return Err(ConfigError::Invalid(
                "language_model.command must name a program when enabled",
            ));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(
    key: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { key, value })
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, LanguageModelConfig};
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn temp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[rstest]
    fn missing_file_yields_defaults(temp: TempDir) {
        let config = AppConfig::from_file(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
        config.validate().expect("defaults are valid");
    }

    #[rstest]
    fn partial_file_keeps_other_defaults(temp: TempDir) {
        let path = temp.path().join("tasklane.toml");
        fs::write(
            &path,
            "database_url = \"postgres://db/tasks\"\n\n[language_model]\nenabled = true\ncommand = [\"llm\", \"--json\"]\n",
        )
        .expect("write config");

        let config = AppConfig::from_file(&path).expect("load");

        assert_eq!(config.database_url, "postgres://db/tasks");
        assert_eq!(config.pool_size, AppConfig::default().pool_size);
        assert_eq!(
            config.language_model,
            LanguageModelConfig {
                enabled: true,
                command: vec!["llm".to_owned(), "--json".to_owned()],
                timeout_secs: 10,
            }
        );
    }

    #[rstest]
    fn malformed_file_is_a_parse_error(temp: TempDir) {
        let path = temp.path().join("tasklane.toml");
        fs::write(&path, "pool_size = \"many\"").expect("write config");

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[rstest]
    fn environment_overrides_win() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(vars(&[
                ("TASKLANE_DATABASE_URL", "postgres://override/db"),
                ("TASKLANE_POOL_SIZE", "3"),
                ("TASKLANE_MODEL_ENABLED", "true"),
                ("TASKLANE_MODEL_COMMAND", "ollama run llama3"),
                ("TASKLANE_MODEL_TIMEOUT_SECS", "4"),
                ("UNRELATED", "ignored"),
            ]))
            .expect("overrides apply");

        assert_eq!(config.database_url, "postgres://override/db");
        assert_eq!(config.pool_size, 3);
        assert!(config.language_model.enabled);
        assert_eq!(config.language_model.command, vec!["ollama", "run", "llama3"]);
        assert_eq!(config.language_model.timeout().as_secs(), 4);
    }

    #[rstest]
    #[case("TASKLANE_POOL_SIZE", "lots")]
    #[case("TASKLANE_MODEL_ENABLED", "yes please")]
    fn malformed_overrides_are_rejected(#[case] key: &str, #[case] value: &str) {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(vars(&[(key, value)]));

        assert!(matches!(result, Err(ConfigError::InvalidOverride { .. })));
    }

    #[rstest]
    fn enabled_model_requires_a_command() {
        let mut config = AppConfig::default();
        config.language_model.enabled = true;

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[rstest]
    fn zero_pool_size_is_invalid() {
        let config = AppConfig {
            pool_size: 0,
            ..AppConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
