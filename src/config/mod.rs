use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::{CurrencyCode, LocaleConfig, WholeCurrencyFormatter},
    errors::PlannerError,
    storage::DEFAULT_STORAGE_KEY,
    utils::paths::{app_data_dir, config_file_in, data_dir_in, ensure_dir, write_atomic},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn formatter(&self) -> WholeCurrencyFormatter {
        WholeCurrencyFormatter::new(
            CurrencyCode::new(&self.currency),
            LocaleConfig::from_tag(&self.locale),
        )
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the application directory (`$DEBT_PLANNER_HOME` or `~/.debt_planner`).
    pub fn new() -> Result<Self, PlannerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, PlannerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, PlannerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            PlannerError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), PlannerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, json.as_bytes())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory ledger snapshots live in: the configured one, else `<base>/data`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| data_dir_in(&self.base))
    }
}
