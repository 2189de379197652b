use context_consolidator_engine::ReanchorSettings;
use context_consolidator_engine::fuzzy::MAX_BITS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid setting `{name}` in {config_path}: {reason}")]
    InvalidSetting {
        config_path: PathBuf,
        name: &'static str,
        reason: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reanchor: ReanchorSettings,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .validate()
            .map_err(|(name, reason)| ConfigError::InvalidSetting {
                config_path: config_path.to_path_buf(),
                name,
                reason,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/context-consolidator");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Check the tuning values are usable. On failure returns the offending
    /// field and why.
    fn validate(&self) -> Result<(), (&'static str, String)> {
        let settings = &self.reanchor;

        let ratios = [
            ("min_similarity", settings.min_similarity),
            ("min_match_ratio", settings.min_match_ratio),
        ];
        for (name, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err((name, format!("must be in (0, 1], got {value}")));
            }
        }

        if !(1..=MAX_BITS).contains(&settings.max_pattern_len) {
            return Err((
                "max_pattern_len",
                format!("must be in 1..={MAX_BITS}, got {}", settings.max_pattern_len),
            ));
        }

        if settings.match_distance == 0 {
            return Err(("match_distance", "must be greater than 0".to_string()));
        }

        Ok(())
    }
}
