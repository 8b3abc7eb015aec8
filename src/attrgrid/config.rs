use crate::error::{AttrgridError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolver and codec settings, stored in `<dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Fields probed on an association target for a displayable value,
    /// in priority order. The foreign-key column is always tried last.
    #[serde(default = "default_display_fields")]
    pub display_fields: Vec<String>,

    /// strftime pattern for zoned date/time values read through the codec
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

fn default_display_fields() -> Vec<String> {
    vec!["name".to_string(), "title".to_string(), "label".to_string()]
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            display_fields: default_display_fields(),
            datetime_format: default_datetime_format(),
        }
    }
}

impl ResolverConfig {
    /// Load config from the given directory, or return defaults if not found.
    ///
    /// A `datetime_format` that is not a valid strftime pattern is rejected
    /// here rather than when the first value is rendered.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AttrgridError::Io)?;
        let config: ResolverConfig =
            serde_json::from_str(&content).map_err(AttrgridError::Serialization)?;
        check_datetime_format(&config.datetime_format)?;
        Ok(config)
    }

    /// Write `config.json` into `config_dir`, creating the directory if needed
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Current value of a setting, rendered as the `config` command shows it
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "display-fields" => Some(self.display_fields.join(",")),
            "datetime-format" => Some(self.datetime_format.clone()),
            _ => None,
        }
    }

    /// Change a setting from its command-line form
    ///
    /// `display-fields` takes a comma-separated list; blank entries are
    /// dropped and at least one field must remain.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "display-fields" => {
                let fields: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect();
                if fields.is_empty() {
                    return Err(AttrgridError::Config(
                        "display-fields needs at least one field".to_string(),
                    ));
                }
                self.display_fields = fields;
            }
            "datetime-format" => {
                check_datetime_format(value)?;
                self.datetime_format = value.to_string();
            }
            _ => return Err(AttrgridError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["display-fields", "datetime-format"]
    }
}

/// Reject strftime patterns chrono cannot render.
pub fn check_datetime_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(AttrgridError::Config(format!(
            "invalid datetime format '{}'",
            format
        )));
    }
    Ok(())
}
