//! Configuration file support for fitquiz.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitquiz/config.toml`.

use crate::validation::MeasurementRange;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub reference: ReferenceConfig,
}

/// Delays used by the quiz state machine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause between hiding one step and showing the next
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// How long the calculating screen is held before results
    #[serde(default = "default_calculating_ms")]
    pub calculating_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            calculating_ms: default_calculating_ms(),
        }
    }
}

impl TimingConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn calculating(&self) -> Duration {
        Duration::from_millis(self.calculating_ms)
    }

    /// Timing with every delay collapsed to zero
    pub fn immediate() -> Self {
        Self {
            transition_ms: 0,
            calculating_ms: 0,
        }
    }
}

/// Accepted ranges for the numeric steps
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_height_range")]
    pub height: MeasurementRange,

    #[serde(default = "default_weight_range")]
    pub weight: MeasurementRange,

    #[serde(default = "default_age_range")]
    pub age: MeasurementRange,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            height: default_height_range(),
            weight: default_weight_range(),
            age: default_age_range(),
        }
    }
}

/// Values a fresh quiz session starts from
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_weight")]
    pub weight: f64,

    #[serde(default = "default_age")]
    pub age: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            weight: default_weight(),
            age: default_age(),
        }
    }
}

/// Optional override for the built-in reference tables
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ReferenceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_transition_ms() -> u64 {
    350
}

fn default_calculating_ms() -> u64 {
    2000
}

fn default_height_range() -> MeasurementRange {
    MeasurementRange::new(150.0, 200.0)
}

fn default_weight_range() -> MeasurementRange {
    MeasurementRange::new(40.0, 150.0)
}

fn default_age_range() -> MeasurementRange {
    MeasurementRange::new(16.0, 100.0)
}

fn default_height() -> f64 {
    crate::types::DEFAULT_HEIGHT_CM
}

fn default_weight() -> f64 {
    crate::types::DEFAULT_WEIGHT_KG
}

fn default_age() -> f64 {
    crate::types::DEFAULT_AGE_YEARS
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("fitquiz").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check ranges are well formed and defaults fall inside them
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("height", &self.validation.height, self.defaults.height),
            ("weight", &self.validation.weight, self.defaults.weight),
            ("age", &self.validation.age, self.defaults.age),
        ];

        for (name, range, default) in fields {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
                return Err(Error::Config(format!(
                    "{} range [{}, {}] is not a valid range",
                    name, range.min, range.max
                )));
            }
            if !range.contains(default) {
                return Err(Error::Config(format!(
                    "default {} {} lies outside [{}, {}]",
                    name, default, range.min, range.max
                )));
            }
        }

        Ok(())
    }
}
