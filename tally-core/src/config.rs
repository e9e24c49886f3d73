//! Configuration management
//!
//! Settings live in `settings.json` inside the tally directory:
//! ```json
//! {
//!   "output": { "precision": 2, "echoDefinitions": false },
//!   "logLevel": "warn"
//! }
//! ```
//! Unknown keys are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::services::logging::DEFAULT_LOG_LEVEL;

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_PRECISION: u32 = 2;
const MAX_PRECISION: u32 = 10;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    output: OutputSettings,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputSettings {
    #[serde(default)]
    precision: Option<u32>,
    #[serde(default)]
    echo_definitions: bool,
}

/// Tally configuration (resolved view of settings plus env overrides)
#[derive(Debug, Clone)]
pub struct Config {
    /// Decimal places when rendering amounts
    pub precision: u32,
    /// Print definitions as they are processed
    pub echo_definitions: bool,
    pub log_level: String,
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            echo_definitions: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "TRUE" | "YES" => Some(true),
        "false" | "0" | "no" | "FALSE" | "NO" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load config from the tally directory
    ///
    /// A missing settings file yields defaults; a malformed one is an error.
    /// `TALLY_PRECISION`, `TALLY_ECHO` and `TALLY_LOG` override the file.
    pub fn load(tally_dir: &Path) -> Result<Self> {
        let settings_path = tally_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).map_err(|e| {
                Error::config(format!("{}: {}", settings_path.display(), e))
            })?
        } else {
            SettingsFile::default()
        };

        let mut config = Self {
            precision: raw.output.precision.unwrap_or(DEFAULT_PRECISION),
            echo_definitions: raw.output.echo_definitions,
            log_level: raw
                .log_level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            _raw_settings: raw,
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TALLY_PRECISION") {
            self.precision = value
                .parse()
                .map_err(|_| Error::config(format!("TALLY_PRECISION is not a number: {}", value)))?;
        }
        if let Some(flag) = lookup("TALLY_ECHO").as_deref().and_then(parse_flag) {
            self.echo_definitions = flag;
        }
        if let Some(level) = lookup("TALLY_LOG") {
            self.log_level = level;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(Error::config(format!(
                "precision {} exceeds maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }
        Ok(())
    }

    /// Save config to the tally directory
    /// Preserves other settings that tally doesn't manage
    pub fn save(&self, tally_dir: &Path) -> Result<()> {
        let mut settings = self._raw_settings.clone();
        settings.output.precision = Some(self.precision);
        settings.output.echo_definitions = self.echo_definitions;
        settings.log_level = Some(self.log_level.clone());

        std::fs::create_dir_all(tally_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(tally_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }
}
