//! TOML-based scenario configuration and preset definitions.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::grid::{Load, Source};

/// Top-level scenario configuration parsed from TOML.
///
/// Describes the simulation parameters and the grid to register: a list of
/// sources and a list of loads, in registration order. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use a built-in preset.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Generation sources, in registration order.
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
    /// Consuming loads, in registration order.
    #[serde(default, rename = "load")]
    pub loads: Vec<LoadConfig>,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of balancing cycles to run (must be > 0).
    pub cycles: usize,
    /// Master random seed for variable sources.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { cycles: 10, seed: 42 }
    }
}

/// One generation source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Unique source name.
    pub name: String,
    /// Output model: `"fixed"` or `"variable"`.
    pub model: String,
    /// Constant output for the fixed model (kW).
    pub output_kw: f32,
    /// Lower output bound for the variable model (kW, inclusive).
    pub min_kw: f32,
    /// Upper output bound for the variable model (kW, exclusive).
    pub max_kw: f32,
    /// Whether the source is a renewable.
    pub renewable: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: "fixed".to_string(),
            output_kw: 0.0,
            min_kw: 20.0,
            max_kw: 50.0,
            renewable: false,
        }
    }
}

impl SourceConfig {
    /// Builds the source described by a validated configuration entry.
    pub fn build(&self) -> Source {
        match self.model.as_str() {
            "variable" => Source::variable(&self.name, self.min_kw, self.max_kw, self.renewable),
            _ => Source::fixed(&self.name, self.output_kw, self.renewable),
        }
    }
}

/// One consuming load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Unique load name.
    pub name: String,
    /// Demand (kW).
    pub demand_kw: f32,
    /// Priority value; lower = more important.
    pub priority: i32,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            demand_kw: 0.0,
            priority: 5,
        }
    }
}

impl LoadConfig {
    /// Builds the load described by a validated configuration entry.
    pub fn build(&self) -> Load {
        Load::new(&self.name, self.demand_kw, self.priority)
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.cycles"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the baseline scenario: the classic two-source, three-load grid.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            sources: vec![
                SourceConfig {
                    name: "SolarFarm-A".to_string(),
                    model: "variable".to_string(),
                    min_kw: 20.0,
                    max_kw: 50.0,
                    renewable: true,
                    ..SourceConfig::default()
                },
                SourceConfig {
                    name: "HydroStation".to_string(),
                    model: "fixed".to_string(),
                    output_kw: 60.0,
                    ..SourceConfig::default()
                },
            ],
            loads: vec![
                LoadConfig {
                    name: "Factory-A".to_string(),
                    demand_kw: 30.0,
                    priority: 2,
                },
                LoadConfig {
                    name: "House-B".to_string(),
                    demand_kw: 15.0,
                    priority: 1,
                },
                LoadConfig {
                    name: "Shop-C".to_string(),
                    demand_kw: 10.0,
                    priority: 3,
                },
            ],
        }
    }

    /// Returns the deficit-stress preset: a single weak variable source
    /// against the baseline loads, forcing shedding on most cycles.
    pub fn deficit_stress() -> Self {
        let baseline = Self::baseline();
        Self {
            simulation: SimulationConfig::default(),
            sources: vec![SourceConfig {
                name: "SolarFarm-A".to_string(),
                model: "variable".to_string(),
                min_kw: 5.0,
                max_kw: 25.0,
                renewable: true,
                ..SourceConfig::default()
            }],
            loads: baseline.loads,
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "deficit_stress"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "deficit_stress" => Ok(Self::deficit_stress()),
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

        if self.simulation.cycles == 0 {
            errors.push(ConfigError {
                field: "simulation.cycles".into(),
                message: "must be > 0".into(),
            });
        }

        let mut source_names = BTreeSet::new();
        for (i, s) in self.sources.iter().enumerate() {
            if s.name.is_empty() {
                errors.push(ConfigError {
                    field: format!("source[{i}].name"),
                    message: "must not be empty".into(),
                });
            } else if !source_names.insert(s.name.as_str()) {
                errors.push(ConfigError {
                    field: format!("source[{i}].name"),
                    message: format!("duplicate source name \"{}\"", s.name),
                });
            }
            if s.model != "fixed" && s.model != "variable" {
                errors.push(ConfigError {
                    field: format!("source[{i}].model"),
                    message: format!("must be \"fixed\" or \"variable\", got \"{}\"", s.model),
                });
            }
            if s.model == "fixed" && s.output_kw < 0.0 {
                errors.push(ConfigError {
                    field: format!("source[{i}].output_kw"),
                    message: "must be >= 0".into(),
                });
            }
            if s.model == "variable" {
                if s.min_kw < 0.0 {
                    errors.push(ConfigError {
                        field: format!("source[{i}].min_kw"),
                        message: "must be >= 0".into(),
                    });
                }
                if s.min_kw >= s.max_kw {
                    errors.push(ConfigError {
                        field: format!("source[{i}].min_kw"),
                        message: "must be < max_kw".into(),
                    });
                }
            }
        }

        let mut load_names = BTreeSet::new();
        for (i, l) in self.loads.iter().enumerate() {
            if l.name.is_empty() {
                errors.push(ConfigError {
                    field: format!("load[{i}].name"),
                    message: "must not be empty".into(),
                });
            } else if !load_names.insert(l.name.as_str()) {
                errors.push(ConfigError {
                    field: format!("load[{i}].name"),
                    message: format!("duplicate load name \"{}\"", l.name),
                });
            }
            if l.demand_kw < 0.0 {
                errors.push(ConfigError {
                    field: format!("load[{i}].demand_kw"),
                    message: "must be >= 0".into(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
cycles = 5
seed = 99

[[source]]
name = "HydroStation"
model = "fixed"
output_kw = 60.0

[[source]]
name = "SolarFarm-A"
model = "variable"
min_kw = 20.0
max_kw = 50.0
renewable = true

[[load]]
name = "Factory-A"
demand_kw = 30.0
priority = 2
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.cycles), Some(5));
        assert_eq!(cfg.as_ref().map(|c| c.sources.len()), Some(2));
        assert_eq!(cfg.as_ref().map(|c| c.loads.len()), Some(1));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[simulation]
cycles = 5
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ScenarioConfig::from_toml_str("[simulation]\nseed = 7\n");
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(7));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.cycles), Some(10));
    }

    #[test]
    fn validation_catches_zero_cycles() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.cycles = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.cycles"));
    }

    #[test]
    fn validation_catches_bad_source_model() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sources[0].model = "solar".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "source[0].model"));
    }

    #[test]
    fn validation_catches_inverted_variable_bounds() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sources[0].min_kw = 80.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "source[0].min_kw"));
    }

    #[test]
    fn validation_catches_duplicate_load_names() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.loads[2].name = cfg.loads[0].name.clone();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "load[2].name"));
    }

    #[test]
    fn validation_catches_negative_demand() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.loads[0].demand_kw = -5.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "load[0].demand_kw"));
    }

    #[test]
    fn source_config_builds_matching_source() {
        use crate::grid::SourceModel;

        let cfg = ScenarioConfig::baseline();
        let solar = cfg.sources[0].build();
        assert_eq!(solar.name(), "SolarFarm-A");
        assert_eq!(
            solar.model(),
            SourceModel::Variable {
                min_kw: 20.0,
                max_kw: 50.0,
            }
        );
        let hydro = cfg.sources[1].build();
        assert_eq!(hydro.output_kw(), 60.0);
        assert_eq!(hydro.model(), SourceModel::Fixed);
    }

    #[test]
    fn deficit_stress_undersupplies_baseline_loads() {
        let cfg = ScenarioConfig::deficit_stress();
        let max_supply: f32 = cfg.sources.iter().map(|s| s.max_kw).sum();
        let demand: f32 = cfg.loads.iter().map(|l| l.demand_kw).sum();
        assert!(max_supply < demand);
    }
}
