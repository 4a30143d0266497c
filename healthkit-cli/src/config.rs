use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CliConfig {
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DefaultsConfig {
    pub days: u32,
    pub sample_limit: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            days: 7,
            sample_limit: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default location if present. Missing keys fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let (config_path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (get_config_path(), false),
        };

        let builder = Config::builder()
            .add_source(
                File::from(config_path.clone())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .build()?;

        let config: CliConfig = builder.try_deserialize()?;
        Ok((config, config_path))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("healthkit").join("cli.toml")
    } else {
        PathBuf::from("cli.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(&path, "[defaults]\ndays = 30\n").unwrap();

        let (config, loaded_from) = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded_from, path);
        assert_eq!(config.defaults.days, 30);
        assert_eq!(config.defaults.sample_limit, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(&path, "[defaults]\ndays = \"a week\"\n").unwrap();

        assert!(CliConfig::load(Some(&path)).is_err());
    }
}
