//! Configuration loading and typed config structures for the Harvest simulation.
//!
//! The canonical configuration lives in `harvest-config.yaml` at the project
//! root. Every field has a default, so a partial or empty file is valid and
//! the defaults reproduce the reference soil model exactly.

use std::path::{Path, PathBuf};

use harvest_soil::SoilDynamics;
use serde::Deserialize;

/// Lowest accepted scheduled-update interval, in host ticks.
pub const MIN_UPDATE_INTERVAL_TICKS: u64 = 5;

/// Highest accepted scheduled-update interval, in host ticks.
pub const MAX_UPDATE_INTERVAL_TICKS: u64 = 400;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `harvest-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HarvestConfig {
    /// Soil update timing and coefficients.
    #[serde(default)]
    pub soil: SoilConfig,

    /// Irrigation scan radii and bonuses.
    #[serde(default)]
    pub irrigation: IrrigationConfig,

    /// Where profile data lives.
    #[serde(default)]
    pub data: DataConfig,

    /// Parameters for the standalone simulation driver.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarvestConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Soil update configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoilConfig {
    /// Host ticks between scheduled soil updates. Clamped to `5..=400`.
    #[serde(default = "default_update_interval_ticks")]
    pub update_interval_ticks: u64,

    /// Base evaporation per scheduled update.
    #[serde(default = "default_evaporation_base")]
    pub evaporation_base: f64,

    /// Base rainfall moisture gain per scheduled update.
    #[serde(default = "default_rainfall_moisture_gain")]
    pub rainfall_moisture_gain: f64,

    /// Scale applied to every fertilizer decay rate.
    #[serde(default = "default_fertilizer_decay_multiplier")]
    pub fertilizer_decay_multiplier: f64,
}

impl SoilConfig {
    /// The update interval, clamped into its accepted range.
    pub const fn effective_interval(&self) -> u64 {
        if self.update_interval_ticks < MIN_UPDATE_INTERVAL_TICKS {
            MIN_UPDATE_INTERVAL_TICKS
        } else if self.update_interval_ticks > MAX_UPDATE_INTERVAL_TICKS {
            MAX_UPDATE_INTERVAL_TICKS
        } else {
            self.update_interval_ticks
        }
    }

    /// The coefficients the soil record's scheduled update consumes.
    pub const fn dynamics(&self) -> SoilDynamics {
        SoilDynamics {
            evaporation_base: self.evaporation_base,
            rainfall_moisture_gain: self.rainfall_moisture_gain,
            fertilizer_decay_multiplier: self.fertilizer_decay_multiplier,
        }
    }
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            update_interval_ticks: default_update_interval_ticks(),
            evaporation_base: default_evaporation_base(),
            rainfall_moisture_gain: default_rainfall_moisture_gain(),
            fertilizer_decay_multiplier: default_fertilizer_decay_multiplier(),
        }
    }
}

/// Irrigation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IrrigationConfig {
    /// Horizontal scan radius for water emitters.
    #[serde(default = "default_emitter_radius")]
    pub emitter_radius: i32,

    /// Moisture added per update near an emitter.
    #[serde(default = "default_emitter_bonus")]
    pub emitter_bonus: f64,

    /// Horizontal scan radius for irrigation channels.
    #[serde(default = "default_channel_radius")]
    pub channel_radius: i32,

    /// Moisture added per update near a channel.
    #[serde(default = "default_channel_bonus")]
    pub channel_bonus: f64,
}

impl Default for IrrigationConfig {
    fn default() -> Self {
        Self {
            emitter_radius: default_emitter_radius(),
            emitter_bonus: default_emitter_bonus(),
            channel_radius: default_channel_radius(),
            channel_bonus: default_channel_bonus(),
        }
    }
}

/// Profile data locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Directory of crop profile JSON files.
    #[serde(default = "default_crops_dir")]
    pub crops_dir: PathBuf,

    /// Directory of fertilizer profile JSON files.
    #[serde(default = "default_fertilizers_dir")]
    pub fertilizers_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            crops_dir: default_crops_dir(),
            fertilizers_dir: default_fertilizers_dir(),
        }
    }
}

/// Standalone driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Host ticks to simulate before stopping.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Where the driver loads and saves its region.
    #[serde(default = "default_region_file")]
    pub region_file: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_ticks: default_max_ticks(),
            region_file: default_region_file(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_update_interval_ticks() -> u64 {
    40
}

const fn default_evaporation_base() -> f64 {
    harvest_soil::dynamics::DEFAULT_EVAPORATION_BASE
}

const fn default_rainfall_moisture_gain() -> f64 {
    harvest_soil::dynamics::DEFAULT_RAINFALL_MOISTURE_GAIN
}

const fn default_fertilizer_decay_multiplier() -> f64 {
    harvest_soil::dynamics::DEFAULT_FERTILIZER_DECAY_MULTIPLIER
}

const fn default_emitter_radius() -> i32 {
    4
}

const fn default_emitter_bonus() -> f64 {
    0.004
}

const fn default_channel_radius() -> i32 {
    3
}

const fn default_channel_bonus() -> f64 {
    0.002
}

fn default_crops_dir() -> PathBuf {
    PathBuf::from("data/crops")
}

fn default_fertilizers_dir() -> PathBuf {
    PathBuf::from("data/fertilizers")
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_ticks() -> u64 {
    2400
}

fn default_region_file() -> PathBuf {
    PathBuf::from("harvest-region.json")
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_values() {
        let config = HarvestConfig::default();
        assert_eq!(config.soil.update_interval_ticks, 40);
        assert_eq!(config.soil.dynamics(), SoilDynamics::default());
        assert_eq!(config.irrigation.emitter_radius, 4);
        assert_eq!(config.irrigation.channel_radius, 3);
        assert_eq!(config.data.crops_dir, PathBuf::from("data/crops"));
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
soil:
  update_interval_ticks: 20
  evaporation_base: 0.001
  rainfall_moisture_gain: 0.005
  fertilizer_decay_multiplier: 2.0

irrigation:
  emitter_radius: 5
  emitter_bonus: 0.006
  channel_radius: 2
  channel_bonus: 0.001

data:
  crops_dir: "assets/crops"
  fertilizers_dir: "assets/fertilizers"

simulation:
  seed: 7
  max_ticks: 100
  region_file: "out/region.json"

logging:
  level: "debug"
"#;
        let config = HarvestConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.soil.update_interval_ticks, 20);
        assert!((config.soil.fertilizer_decay_multiplier - 2.0).abs() < 1e-12);
        assert_eq!(config.irrigation.emitter_radius, 5);
        assert_eq!(config.data.fertilizers_dir, PathBuf::from("assets/fertilizers"));
        assert_eq!(config.simulation.max_ticks, 100);
        assert_eq!(config.simulation.region_file, PathBuf::from("out/region.json"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = HarvestConfig::parse("simulation:\n  seed: 9\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.simulation.seed, 9);
        assert_eq!(config.simulation.max_ticks, 2400);
        assert_eq!(config.soil, SoilConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(HarvestConfig::parse("").ok(), Some(HarvestConfig::default()));
    }

    #[test]
    fn parse_invalid_yaml_is_an_error() {
        let result = HarvestConfig::parse("soil: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn update_interval_is_clamped() {
        let mut soil = SoilConfig {
            update_interval_ticks: 1,
            ..SoilConfig::default()
        };
        assert_eq!(soil.effective_interval(), 5);
        soil.update_interval_ticks = 10_000;
        assert_eq!(soil.effective_interval(), 400);
        soil.update_interval_ticks = 60;
        assert_eq!(soil.effective_interval(), 60);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("harvest-config.yaml");
        if path.exists() {
            let config = HarvestConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
