use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application configuration loaded from the file named by `CONFIG_FILE`
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Largest accepted width or height of a source image, in pixels
    pub max_dimension: u32,

    /// Largest accepted request body, in bytes
    pub max_request_bytes: usize,

    /// Directory with a static web UI served at `/`
    pub static_dir: Option<PathBuf>,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_DIMENSION: u32 = 4096;
const DEFAULT_MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            static_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `CONFIG_FILE` (if set) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_file(Path::new(&path)),
            Err(_) => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing or malformed file is not fatal: it is logged and the
    /// defaults are used instead.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_or_default(&content),
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    fn parse_or_default(content: &str) -> Self {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Self::default();
        }
        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::info!(
                    bind_addr = %config.bind_addr,
                    max_dimension = config.max_dimension,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `BIND_ADDR`, `MAX_DIMENSION` and `STATIC_DIR` overrides.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(value) = lookup("MAX_DIMENSION") {
            self.max_dimension = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: "MAX_DIMENSION",
                    value,
                })?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dimension == 0 {
            return Err(ConfigError::ZeroMaxDimension);
        }
        if self.max_request_bytes == 0 {
            return Err(ConfigError::ZeroRequestLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.max_dimension, 4096);
        assert_eq!(config.max_request_bytes, 32 * 1024 * 1024);
        assert!(config.static_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::parse_or_default("max_dimension: 512\n");

        assert_eq!(config.max_dimension, 512);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
bind_addr: "127.0.0.1:9000"
max_dimension: 1024
max_request_bytes: 1048576
static_dir: ./web
"#;
        let config = AppConfig::parse_or_default(yaml);

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.max_dimension, 1024);
        assert_eq!(config.max_request_bytes, 1_048_576);
        assert_eq!(config.static_dir, Some(PathBuf::from("./web")));
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_defaults() {
        let config = AppConfig::parse_or_default("max_dimension: [not, a, number]");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::parse_or_default("  \n"), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr: \"127.0.0.1:7000\"").unwrap();

        let config = AppConfig::load_from_file(file.path());
        assert_eq!(config.bind_addr, "127.0.0.1:7000");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_file(&dir.path().join("missing.yaml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("BIND_ADDR", "127.0.0.1:1234"),
                ("MAX_DIMENSION", " 640 "),
                ("STATIC_DIR", "/srv/ui"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:1234");
        assert_eq!(config.max_dimension, 640);
        assert_eq!(config.static_dir, Some(PathBuf::from("/srv/ui")));
    }

    #[test]
    fn test_env_invalid_max_dimension() {
        let mut config = AppConfig::default();
        let result = config.apply_env(env(&[("MAX_DIMENSION", "huge")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv {
                name: "MAX_DIMENSION",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_max_dimension() {
        let config = AppConfig {
            max_dimension: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroMaxDimension)
        ));
    }
}
