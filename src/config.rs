//! daycal configuration at ~/.config/daycal/config.toml

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use daycal_core::{Category, DayCalError, DayCalResult};
use serde::{Deserialize, Serialize};

static DEFAULT_DATA_DIR: &str = "~/.local/share/daycal";

/// File holding the event store inside the data directory.
pub const EVENTS_FILE: &str = "events.json";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Settings read from the config file, overridable with `DAYCAL_*`
/// environment variables (e.g. `DAYCAL_DATA_DIR`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DaycalConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Category given to new events when none is chosen
    #[serde(default)]
    pub default_category: Category,
}

impl Default for DaycalConfig {
    fn default() -> Self {
        DaycalConfig {
            data_dir: default_data_dir(),
            default_category: Category::default(),
        }
    }
}

impl DaycalConfig {
    pub fn config_path() -> DayCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DayCalError::Config("Could not determine config directory".into()))?
            .join("daycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> DayCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DayCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DAYCAL"))
            .build()
            .map_err(|e| DayCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DayCalError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_path().join(EVENTS_FILE)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DayCalResult<()> {
        let contents = format!(
            "\
# daycal configuration

# Where your events are stored:
# data_dir = \"{}\"

# Category for new events (General, Work, Personal, Meeting, Holiday, Study, Health):
# default_category = \"General\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DayCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DayCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The effective settings as TOML, for `daycal config`.
    pub fn to_toml(&self) -> DayCalResult<String> {
        let shown = DaycalConfig {
            data_dir: self.data_path(),
            ..self.clone()
        };
        toml::to_string_pretty(&shown).map_err(|e| DayCalError::Serialization(e.to_string()))
    }
}
