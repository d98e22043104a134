//! # configs
//!
//! Typed runtime settings. Sources, lowest precedence first: built-in
//! defaults, then `MOVIE_BOARD_*` environment variables (a `.env` file in the
//! working directory is loaded into the environment first).

use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "MOVIE_BOARD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory holding `Data1000Movies.csv`, `users.csv` and `comments.csv`.
    pub data_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info,storage_adapters=debug`.
    pub log_filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl Settings {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("data_path", "./data")?
            .set_default("log_filter", "info")?
            .set_default("log_json", false)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_environment(env(&[])).unwrap();
        assert_eq!(settings.data_path, PathBuf::from("./data"));
        assert_eq!(settings.log_filter, "info");
        assert!(!settings.log_json);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let settings = Settings::from_environment(env(&[
            ("MOVIE_BOARD_DATA_PATH", "/srv/movies"),
            ("MOVIE_BOARD_LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(settings.data_path, PathBuf::from("/srv/movies"));
        assert!(settings.log_json);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_bad_boolean_is_rejected() {
        let err = Settings::from_environment(env(&[("MOVIE_BOARD_LOG_JSON", "maybe")]));
        assert!(err.is_err());
    }
}
