use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::currency::MoneyFormat;
use crate::errors::{LedgerError, Result};
use crate::report::GroupBy;
use crate::storage::json_backend::DEFAULT_RETENTION;
use crate::utils::{fs::write_atomic, paths};

/// User preferences for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub default_group_by: GroupBy,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default = "Config::default_color_enabled")]
    pub color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "id-ID".into(),
            currency: "IDR".into(),
            default_group_by: GroupBy::default(),
            backup_retention: Self::default_backup_retention(),
            color_enabled: Self::default_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_backup_retention() -> usize {
        DEFAULT_RETENTION
    }

    pub fn default_color_enabled() -> bool {
        true
    }

    /// Keys accepted by [`Config::set`].
    pub const KEYS: [&'static str; 5] = [
        "locale",
        "currency",
        "group-by",
        "backup-retention",
        "color",
    ];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_ascii_uppercase(),
            "group-by" => self.default_group_by = value.parse()?,
            "backup-retention" => {
                let retention: usize = value.trim().parse().map_err(|_| {
                    LedgerError::Config(format!("`{value}` is not a valid retention count"))
                })?;
                if retention == 0 {
                    return Err(LedgerError::Config(
                        "backup-retention must be at least 1".into(),
                    ));
                }
                self.backup_retention = retention;
            }
            "color" => self.color_enabled = parse_flag(value)?,
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Amount formatting for the configured locale and currency.
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::new(&self.locale, &self.currency)
    }

    pub fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            ("group-by", self.default_group_by.to_string()),
            ("backup-retention", self.backup_retention.to_string()),
            ("color", if self.color_enabled { "on" } else { "off" }.to_string()),
        ]
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LedgerError::Config(format!("{key} cannot be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(LedgerError::Config(format!(
            "`{other}` is not a valid on/off value"
        ))),
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(root: &Path) -> Self {
        Self::new(paths::config_file_in(root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}
