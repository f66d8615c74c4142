//! Configuration loading and typed config structures for the Blaze dispatch
//! simulation.
//!
//! The canonical configuration lives in `dispatch-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::Path;

use blaze_graph::RegionGraph;
use blaze_ledger::{Capacities, FireTable, fire_table::LEVEL_COUNT};
use serde::Deserialize;

use crate::error::SimulationError;
use crate::fires::FireMap;

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

    /// A value parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dispatch configuration.
///
/// Mirrors the structure of `dispatch-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DispatchConfig {
    /// Tank sizes and suppression consumption of the unit.
    #[serde(default)]
    pub unit: UnitConfig,

    /// Fire table and initial fire intensities.
    #[serde(default)]
    pub fires: FireConfig,

    /// Engine binary settings (files, tick cadence).
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DispatchConfig {
    /// Load configuration from the YAML file at `path`, or start from the
    /// defaults when it does not exist.
    ///
    /// Environment variables override engine settings either way:
    /// - `BLAZE_GRAPH_PATH` overrides `engine.graph_path`
    /// - `BLAZE_REPORT_PATH` overrides `engine.report_path`
    /// - `BLAZE_TICK_INTERVAL_MS` overrides `engine.tick_interval_ms`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if an existing file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        Self::load_or_default_with(path, env_var)
    }

    fn from_file(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.engine.apply_overrides(lookup);
        Ok(config)
    }

    fn load_or_default_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path, lookup);
        }
        let mut config = Self::default();
        config.engine.apply_overrides(lookup);
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot drive a simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fires.time_per_level.len() != LEVEL_COUNT {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "fires.time_per_level must have {LEVEL_COUNT} entries, got {}",
                    self.fires.time_per_level.len()
                ),
            });
        }
        if self.unit.fuel_capacity == 0 || self.unit.water_capacity == 0 {
            return Err(ConfigError::Invalid {
                reason: "unit capacities must be at least 1".to_owned(),
            });
        }
        if self.unit.water_per_level == 0 {
            return Err(ConfigError::Invalid {
                reason: "unit.water_per_level must be at least 1".to_owned(),
            });
        }
        if self.engine.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "engine.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Tank sizes of the unit.
    pub const fn capacities(&self) -> Capacities {
        Capacities {
            fuel: self.unit.fuel_capacity,
            water: self.unit.water_capacity,
        }
    }

    /// Build the suppression cost table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `time_per_level` does not have
    /// exactly five entries.
    pub fn fire_table(&self) -> Result<FireTable, ConfigError> {
        let times = <[u64; LEVEL_COUNT]>::try_from(self.fires.time_per_level.as_slice())
            .map_err(|e| ConfigError::Invalid {
                reason: format!(
                    "fires.time_per_level must have {LEVEL_COUNT} entries, got {} ({e})",
                    self.fires.time_per_level.len()
                ),
            })?;
        Ok(FireTable::new(
            times,
            self.unit.fuel_per_time_unit,
            self.unit.water_per_level,
        ))
    }

    /// Build the initial fire map for `graph`.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`FireMap::from_raw`].
    pub fn initial_fires(&self, graph: &RegionGraph) -> Result<FireMap, SimulationError> {
        FireMap::from_raw(&self.fires.initial_intensity, graph.region_count())
    }
}

/// Tank sizes and consumption of the firefighting unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitConfig {
    /// Maximum fuel on board.
    #[serde(default = "default_fuel_capacity")]
    pub fuel_capacity: u64,

    /// Maximum water on board.
    #[serde(default = "default_water_capacity")]
    pub water_capacity: u64,

    /// Water used per one-level fire reduction.
    #[serde(default = "default_water_per_level")]
    pub water_per_level: u64,

    /// Fuel burned per unit of suppression time.
    #[serde(default = "default_fuel_per_time_unit")]
    pub fuel_per_time_unit: u64,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            fuel_capacity: default_fuel_capacity(),
            water_capacity: default_water_capacity(),
            water_per_level: default_water_per_level(),
            fuel_per_time_unit: default_fuel_per_time_unit(),
        }
    }
}

/// Fire table and starting fires.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FireConfig {
    /// Suppression time for levels 1 through 5.
    #[serde(default = "default_time_per_level")]
    pub time_per_level: Vec<u64>,

    /// Starting intensity of every region, indexed like the matrix rows.
    #[serde(default = "default_initial_intensity")]
    pub initial_intensity: Vec<u8>,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            time_per_level: default_time_per_level(),
            initial_intensity: default_initial_intensity(),
        }
    }
}

/// Settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Path of the adjacency matrix text file.
    #[serde(default = "default_graph_path")]
    pub graph_path: String,

    /// Path the final report is written to.
    #[serde(default = "default_report_path")]
    pub report_path: String,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Upper bound on ticks before the run is abandoned.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            graph_path: default_graph_path(),
            report_path: default_report_path(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl EngineConfig {
    /// Apply `BLAZE_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("BLAZE_GRAPH_PATH") {
            self.graph_path = path;
        }
        if let Some(path) = lookup("BLAZE_REPORT_PATH") {
            self.report_path = path;
        }
        if let Some(ms) = lookup("BLAZE_TICK_INTERVAL_MS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
        {
            self.tick_interval_ms = ms;
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_fuel_capacity() -> u64 {
    5000
}

const fn default_water_capacity() -> u64 {
    20_000
}

const fn default_water_per_level() -> u64 {
    1000
}

const fn default_fuel_per_time_unit() -> u64 {
    10
}

fn default_time_per_level() -> Vec<u64> {
    vec![10, 20, 30, 40, 50]
}

fn default_initial_intensity() -> Vec<u8> {
    vec![0, 1, 3, 2, 5, 4, 5, 2, 1, 4, 3, 5, 2, 1]
}

fn default_graph_path() -> String {
    "forest.txt".to_owned()
}

fn default_report_path() -> String {
    "report.txt".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_max_ticks() -> u64 {
    100_000
}

fn default_log_level() -> String {
    "info".to_owned()
}
