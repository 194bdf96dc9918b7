use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub simulation: SimulationParams,
}

/// Locations of the two input sources and the output log. Relative paths are
/// resolved against the data directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_plants_path")]
    pub plants: PathBuf,
    #[serde(default = "default_reference_path")]
    pub reference: PathBuf,
    #[serde(default = "default_log_path")]
    pub log: PathBuf,
}

fn default_plants_path() -> PathBuf {
    PathBuf::from("data/Plantas.csv")
}

fn default_reference_path() -> PathBuf {
    PathBuf::from("data/TemperaturaHumedadPromedio.csv")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("simulation/simulaciones.csv")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            plants: default_plants_path(),
            reference: default_reference_path(),
            log: default_log_path(),
        }
    }
}

impl PathsConfig {
    /// Resolve relative paths against `base`. Absolute paths are left alone.
    pub fn resolved(&self, base: &Path) -> Self {
        let resolve = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        Self {
            plants: resolve(&self.plants),
            reference: resolve(&self.reference),
            log: resolve(&self.log),
        }
    }
}

/// Numeric bounds shared by the weather generator and the recommendation
/// engine. Temperatures in °C, humidity in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Half-width of the uniform jitter band around the reference temperature.
    pub temp_variation: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    /// Reference temperature for slots absent from the reference table.
    pub default_reference_temp: f64,
    /// Strictly above this temperature the sun clause is added.
    pub sun_threshold: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            temp_variation: 2.0,
            temp_min: 19.0,
            temp_max: 30.5,
            humidity_min: 60.0,
            humidity_max: 95.0,
            default_reference_temp: 25.0,
            sun_threshold: 25.0,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("temp_variation", self.temp_variation),
            ("temp_min", self.temp_min),
            ("temp_max", self.temp_max),
            ("humidity_min", self.humidity_min),
            ("humidity_max", self.humidity_max),
            ("default_reference_temp", self.default_reference_temp),
            ("sun_threshold", self.sun_threshold),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::Config(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }
        if self.temp_variation < 0.0 {
            return Err(SimError::Config(format!(
                "temp_variation must be non-negative, got {}",
                self.temp_variation
            )));
        }
        if self.temp_max <= self.temp_min {
            return Err(SimError::Config(format!(
                "temp_max ({}) must be greater than temp_min ({})",
                self.temp_max, self.temp_min
            )));
        }
        if self.humidity_max <= self.humidity_min {
            return Err(SimError::Config(format!(
                "humidity_max ({}) must be greater than humidity_min ({})",
                self.humidity_max, self.humidity_min
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load config from `config_override` or the standard locations. A missing
    /// file is not an error: defaults are used.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(SimError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SimError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::info!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| SimError::Config(format!("Failed to parse config: {}", e)))?;
        config.simulation.validate()?;
        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        dirs::config_dir()
            .map(|dir| dir.join("plantsim").join("config.yaml"))
            .filter(|p| p.exists())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .expect("env var pattern is a valid regex");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Base directory for relative source and log paths. CLI override first,
    /// then `PLANTSIM_DATA_DIR`, then the working directory.
    pub fn data_dir(data_dir_override: Option<&Path>) -> PathBuf {
        if let Some(dir) = data_dir_override {
            return dir.to_path_buf();
        }

        if let Ok(dir) = std::env::var("PLANTSIM_DATA_DIR") {
            return PathBuf::from(dir);
        }

        PathBuf::from(".")
    }

    pub fn resolved_paths(&self, data_dir_override: Option<&Path>) -> PathsConfig {
        self.paths.resolved(&Self::data_dir(data_dir_override))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.simulation, SimulationParams::default());
        assert_eq!(config.paths.log, PathBuf::from("simulation/simulaciones.csv"));
    }

    #[test]
    fn partial_simulation_section_keeps_other_defaults() {
        let yaml = "simulation:\n  temp_variation: 0.5\n  sun_threshold: 27.0\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.simulation.temp_variation, 0.5);
        assert_eq!(config.simulation.sun_threshold, 27.0);
        assert_eq!(config.simulation.humidity_max, 95.0);
        assert_eq!(config.simulation.temp_min, 19.0);
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("PLANTSIM_TEST_LOG_PATH", "/tmp/plantsim-test/log.csv");
        let yaml = "paths:\n  log: ${PLANTSIM_TEST_LOG_PATH}\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.paths.log, PathBuf::from("/tmp/plantsim-test/log.csv"));
        assert_eq!(config.paths.plants, PathBuf::from("data/Plantas.csv"));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let yaml = "simulation:\n  humidity_min: 95.0\n  humidity_max: 60.0\n";
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(SimError::Config(_))
        ));

        let yaml = "simulation:\n  temp_variation: -1.0\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        for yaml in [
            "simulation:\n  temp_max: .nan\n",
            "simulation:\n  humidity_min: .nan\n",
            "simulation:\n  temp_variation: .inf\n",
            "simulation:\n  sun_threshold: -.inf\n",
        ] {
            assert!(
                matches!(Config::from_yaml(yaml), Err(SimError::Config(_))),
                "accepted {:?}",
                yaml
            );
        }
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let paths = PathsConfig {
            plants: PathBuf::from("data/p.csv"),
            reference: PathBuf::from("/abs/ref.csv"),
            log: PathBuf::from("out/log.csv"),
        };
        let resolved = paths.resolved(Path::new("/srv/garden"));
        assert_eq!(resolved.plants, PathBuf::from("/srv/garden/data/p.csv"));
        assert_eq!(resolved.reference, PathBuf::from("/abs/ref.csv"));
        assert_eq!(resolved.log, PathBuf::from("/srv/garden/out/log.csv"));
    }
}
