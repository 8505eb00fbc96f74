//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Battery plant parameters.
    #[serde(default)]
    pub battery: BatterySection,
    /// Price-market selection.
    #[serde(default)]
    pub market: MarketSection,
    /// Frequency-source selection.
    #[serde(default)]
    pub frequency: FrequencySection,
    /// Simulation horizon and resolution.
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// Battery plant parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatterySection {
    /// Contracted power (MW).
    pub power_mw: f64,
    /// Energy capacity (MWh).
    pub capacity_mwh: f64,
    /// Round-trip efficiency (0–1).
    pub efficiency: f64,
    /// Lower SOC bound (fraction).
    pub soc_min: f64,
    /// Upper SOC bound (fraction).
    pub soc_max: f64,
    /// SOC at the start of the horizon (fraction).
    pub initial_soc: f64,
}

impl Default for BatterySection {
    fn default() -> Self {
        Self {
            power_mw: 1.0,
            capacity_mwh: 2.0,
            efficiency: 0.90,
            soc_min: 0.20,
            soc_max: 0.80,
            initial_soc: 0.5,
        }
    }
}

/// Price-market selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketSection {
    /// Delivery year of the price data.
    pub year: i32,
    /// Market area code (e.g. `"NO1"`).
    pub area: String,
    /// Directory holding the yearly price CSV dumps.
    pub data_dir: PathBuf,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            year: 2024,
            area: "NO1".to_string(),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Frequency-source selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrequencySection {
    /// Source mode: `"flat"`, `"simulated"`, or `"file"`.
    pub mode: String,
    /// Flat availability share for `"flat"` mode (%).
    pub flat_availability_pct: f64,
    /// Season pattern for `"simulated"` mode: `"winter"` or `"summer"`.
    pub season: String,
    /// RNG seed for `"simulated"` mode; omit for a non-reproducible run.
    pub seed: Option<u64>,
    /// Frequency CSV path for `"file"` mode.
    pub data_file: Option<PathBuf>,
}

impl Default for FrequencySection {
    fn default() -> Self {
        Self {
            mode: "simulated".to_string(),
            flat_availability_pct: 100.0,
            season: "winter".to_string(),
            seed: Some(42),
            data_file: None,
        }
    }
}

/// Simulation horizon and resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    /// Horizon preset: `"day"`, `"week"`, `"month"`, `"quarter"`, `"year"`.
    pub duration: String,
    /// Sample spacing of the synthesized series (seconds).
    pub resolution_seconds: u32,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            duration: "month".to_string(),
            resolution_seconds: 1,
        }
    }
}

/// Recognized duration presets with their hour counts.
const DURATION_PRESETS: &[(&str, u64)] = &[
    ("day", 24),
    ("week", 168),
    ("month", 720),
    ("quarter", 2160),
    ("year", 8760),
];

impl SimulationSection {
    /// Horizon length in hours; unknown presets fall back to one month.
    pub fn duration_hours(&self) -> u64 {
        DURATION_PRESETS
            .iter()
            .find(|(name, _)| *name == self.duration)
            .map(|(_, hours)| *hours)
            .unwrap_or(720)
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.soc_min"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: 1 MW / 2 MWh battery, one simulated
    /// winter month, seed 42.
    pub fn baseline() -> Self {
        Self {
            battery: BatterySection::default(),
            market: MarketSection::default(),
            frequency: FrequencySection::default(),
            simulation: SimulationSection::default(),
        }
    }

    /// Returns the flat preset: no SOC simulation, uniform availability.
    pub fn flat() -> Self {
        Self {
            frequency: FrequencySection {
                mode: "flat".to_string(),
                ..FrequencySection::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the full-year preset: a summer-pattern year at 1-second
    /// resolution with a larger battery.
    pub fn full_year() -> Self {
        Self {
            battery: BatterySection {
                power_mw: 5.0,
                capacity_mwh: 10.0,
                ..BatterySection::default()
            },
            frequency: FrequencySection {
                season: "summer".to_string(),
                ..FrequencySection::default()
            },
            simulation: SimulationSection {
                duration: "year".to_string(),
                ..SimulationSection::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "flat", "full_year"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "flat" => Ok(Self::flat()),
            "full_year" => Ok(Self::full_year()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let b = &self.battery;
        if b.power_mw <= 0.0 {
            errors.push(ConfigError {
                field: "battery.power_mw".into(),
                message: "must be > 0".into(),
            });
        }
        if b.capacity_mwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_mwh".into(),
                message: "must be > 0".into(),
            });
        }
        if b.efficiency <= 0.0 || b.efficiency > 1.0 {
            errors.push(ConfigError {
                field: "battery.efficiency".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(0.0..=1.0).contains(&b.soc_min) || !(0.0..=1.0).contains(&b.soc_max) {
            errors.push(ConfigError {
                field: "battery.soc_min".into(),
                message: "SOC bounds must be in [0.0, 1.0]".into(),
            });
        } else if b.soc_min >= b.soc_max {
            errors.push(ConfigError {
                field: "battery.soc_min".into(),
                message: "must be < battery.soc_max".into(),
            });
        }
        if !(0.0..=1.0).contains(&b.initial_soc) {
            errors.push(ConfigError {
                field: "battery.initial_soc".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        let f = &self.frequency;
        if !["flat", "simulated", "file"].contains(&f.mode.as_str()) {
            errors.push(ConfigError {
                field: "frequency.mode".into(),
                message: format!(
                    "must be \"flat\", \"simulated\", or \"file\", got \"{}\"",
                    f.mode
                ),
            });
        }
        if !(0.0..=100.0).contains(&f.flat_availability_pct) {
            errors.push(ConfigError {
                field: "frequency.flat_availability_pct".into(),
                message: "must be in [0.0, 100.0]".into(),
            });
        }
        if f.season != "winter" && f.season != "summer" {
            errors.push(ConfigError {
                field: "frequency.season".into(),
                message: format!("must be \"winter\" or \"summer\", got \"{}\"", f.season),
            });
        }
        if f.mode == "file" && f.data_file.is_none() {
            errors.push(ConfigError {
                field: "frequency.data_file".into(),
                message: "required when frequency.mode is \"file\"".into(),
            });
        }

        let s = &self.simulation;
        if !DURATION_PRESETS.iter().any(|(name, _)| *name == s.duration) {
            errors.push(ConfigError {
                field: "simulation.duration".into(),
                message: format!(
                    "must be one of day, week, month, quarter, year; got \"{}\"",
                    s.duration
                ),
            });
        }
        if s.resolution_seconds == 0 {
            errors.push(ConfigError {
                field: "simulation.resolution_seconds".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
