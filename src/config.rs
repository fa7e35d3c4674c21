//! Configuration management with validation and defaults
//!
//! Values come from, in increasing priority: built-in defaults, a TOML file,
//! `GRIDIRON_*` environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::{env, net::IpAddr, path::Path, time::Duration};

/// Top-level service configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridironConfig {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
}

/// HTTP server settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

/// Simulation defaults applied when a request does not say otherwise
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed seed for every game; entropy when unset
    pub seed: Option<u64>,
    /// Return the play-by-play log with every response
    pub include_play_log: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl GridironConfig {
    /// Load from an optional TOML file, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| env::var(key).ok())
    }

    /// Same as [`GridironConfig::load`] with variables read through `lookup`
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GRIDIRON_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GRIDIRON_PORT") {
            self.server.port = parse_env("GRIDIRON_PORT", port, "invalid port number")?;
        }
        if let Some(seed) = lookup("GRIDIRON_SEED") {
            self.simulation.seed = Some(parse_env("GRIDIRON_SEED", seed, "expected an unsigned integer")?);
        }
        if let Some(flag) = lookup("GRIDIRON_INCLUDE_LOG") {
            self.simulation.include_play_log =
                parse_env("GRIDIRON_INCLUDE_LOG", flag, "expected true or false")?;
        }
        Ok(())
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(invalid("server.host", &self.server.host, "not an IP address"));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port", "0", "must be > 0"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "0", "must be > 0"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(field: &str, value: String, reason: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(field, &value, reason))
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GridironConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = GridironConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = GridironConfig::default();
        config.server.host = "not-a-host".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = GridironConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[simulation]\nseed = 7\ninclude_play_log = true"
        )
        .unwrap();

        let config = GridironConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.simulation.seed, Some(7));
        assert!(config.simulation.include_play_log);
    }

    #[test]
    fn test_bad_toml_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(
            GridironConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GridironConfig::from_file(Path::new("/nonexistent/gridiron.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gridiron.toml"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9090\n\n[simulation]\nseed = 7").unwrap();

        let config = GridironConfig::load_with_env(
            Some(file.path()),
            vars(&[
                ("GRIDIRON_HOST", "127.0.0.1"),
                ("GRIDIRON_PORT", "7000"),
                ("GRIDIRON_SEED", " 42 "),
                ("GRIDIRON_INCLUDE_LOG", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.simulation.seed, Some(42));
        assert!(config.simulation.include_play_log);
    }

    #[test]
    fn test_load_without_env_keeps_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9090").unwrap();

        let config = GridironConfig::load_with_env(Some(file.path()), vars(&[])).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_bad_env_values_rejected() {
        let err = GridironConfig::load_with_env(None, vars(&[("GRIDIRON_PORT", "http")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "GRIDIRON_PORT");
                assert_eq!(value, "http");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            GridironConfig::load_with_env(None, vars(&[("GRIDIRON_SEED", "-3")])),
            Err(ConfigError::InvalidValue { field, .. }) if field == "GRIDIRON_SEED"
        ));

        // an override that parses can still fail validation
        assert!(matches!(
            GridironConfig::load_with_env(None, vars(&[("GRIDIRON_PORT", "0")])),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_load_reads_process_env() {
        // the only test in this crate that touches the process environment
        std::env::set_var("GRIDIRON_SEED", "99");
        let config = GridironConfig::load(None);
        std::env::remove_var("GRIDIRON_SEED");
        assert_eq!(config.unwrap().simulation.seed, Some(99));
    }
}
