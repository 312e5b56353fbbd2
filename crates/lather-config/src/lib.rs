//! # lather-config
//!
//! Layered configuration loading for Lather using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LATHER_*` prefix, `__` as separator)
//! 2. Project-level `.lather/config.toml`
//! 3. User-level `~/.config/lather/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LATHER_VISION__API_KEY` -> `vision.api_key`,
//! `LATHER_CALENDAR__GRID_WEEKS` -> `calendar.grid_weeks`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lather_config::LatherConfig;
//!
//! let config = LatherConfig::load_with_dotenv().expect("config");
//! if config.vision.is_configured() {
//!     println!("model: {}", config.vision.model);
//! }
//! ```

mod calendar;
mod error;
mod image;
mod storage;
mod vision;

pub use calendar::CalendarConfig;
pub use error::ConfigError;
pub use image::ImageConfig;
pub use storage::{StorageConfig, STORE_FILE_NAME};
pub use vision::{VisionConfig, DEFAULT_PROMPT};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LatherConfig {
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl LatherConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lather/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("LATHER_").split("__"));

        figment
    }

    /// Reject values that extract fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar.options()?;

        let image = &self.image;
        if image.max_dimension == 0 {
            return Err(ConfigError::invalid("image.max_dimension", "must be at least 1"));
        }
        if image.max_bytes == 0 {
            return Err(ConfigError::invalid("image.max_bytes", "must be at least 1"));
        }
        if !(1..=100).contains(&image.initial_quality) {
            return Err(ConfigError::invalid("image.initial_quality", "must be within 1..=100"));
        }
        if image.min_quality == 0 || image.min_quality > image.initial_quality {
            return Err(ConfigError::invalid(
                "image.min_quality",
                "must be within 1..=initial_quality",
            ));
        }
        if image.quality_step == 0 {
            return Err(ConfigError::invalid("image.quality_step", "must be at least 1"));
        }

        if self.vision.max_output_tokens == 0 {
            return Err(ConfigError::invalid("vision.max_output_tokens", "must be at least 1"));
        }
        if self.vision.endpoint.is_empty() {
            return Err(ConfigError::invalid("vision.endpoint", "must not be empty"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lather").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LatherConfig::default();
        assert!(!config.vision.is_configured());
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = LatherConfig::figment();
        let config: LatherConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.image.max_dimension, 1024);
        assert_eq!(config.calendar.grid_weeks, 6);
    }

    #[test]
    fn min_quality_above_initial_is_rejected() {
        let mut config = LatherConfig::default();
        config.image.min_quality = 90;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "image.min_quality"));
    }

    #[test]
    fn zero_token_budget_is_rejected() {
        let mut config = LatherConfig::default();
        config.vision.max_output_tokens = 0;
        assert!(config.validate().is_err());
    }
}
