//! Settings file loading
//!
//! The settings file supplies defaults for the global options. Values given on
//! the command line or through `MONITORSTACK_*` environment variables win over
//! anything read here.

use crate::core::error_handling::ContextualError;
use crate::core::logging::LOG_FORMATS;
use std::path::{Path, PathBuf};

pub const SETTINGS_DIR: &str = "Monitorstack";
pub const SETTINGS_FILE: &str = "monitorstack.toml";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("The specified settings file does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Error reading settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}' in settings file: expected {expected}")]
    InvalidValue { key: String, expected: String },
}

impl ContextualError for SettingsError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, SettingsError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            SettingsError::NotFound { .. } => Some("Settings file not found"),
            SettingsError::Parse { .. } => Some("Settings file is not valid TOML"),
            SettingsError::InvalidValue { .. } => Some("Settings file contains an invalid value"),
            SettingsError::Read { .. } => None,
        }
    }
}

/// Values read from the settings file; `None` means not set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub format: Option<String>,
    pub verbose: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
    pub cache_dir: Option<PathBuf>,
    /// Cache entry lifetime in seconds
    pub cache_ttl: Option<u64>,
}

fn invalid(key: &str, expected: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        expected: expected.to_string(),
    }
}

fn string_value(config: &toml::Table, key: &str) -> Result<Option<String>, SettingsError> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(key, "a string")),
    }
}

fn bool_value(config: &toml::Table, key: &str) -> Result<Option<bool>, SettingsError> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(key, "true or false")),
    }
}

fn one_of(key: &str, value: Option<String>, valid: &[&str]) -> Result<Option<String>, SettingsError> {
    match value {
        Some(v) if !valid.contains(&v.to_lowercase().as_str()) => {
            Err(invalid(key, &format!("one of {}", valid.join(", "))))
        }
        other => Ok(other.map(|v| v.to_lowercase())),
    }
}

impl Settings {
    /// Apply the top level keys of a settings table
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), SettingsError> {
        if let Some(format) = string_value(config, "format")? {
            self.format = Some(format);
        }
        if let Some(verbose) = bool_value(config, "verbose")? {
            self.verbose = Some(verbose);
        }
        if let Some(level) = one_of("log-level", string_value(config, "log-level")?, &LOG_LEVELS)? {
            self.log_level = Some(level);
        }
        if let Some(format) = one_of("log-format", string_value(config, "log-format")?, &LOG_FORMATS)? {
            self.log_format = Some(format);
        }
        if let Some(log_file) = string_value(config, "log-file")? {
            // "none" and "-" switch file logging off
            if log_file.eq_ignore_ascii_case("none") || log_file == "-" {
                self.log_file = None;
            } else {
                self.log_file = Some(PathBuf::from(log_file));
            }
        }
        if let Some(color) = bool_value(config, "color")? {
            self.color = Some(color);
        }
        if let Some(no_color) = bool_value(config, "no-color")? {
            self.color = Some(!no_color);
        }
        if let Some(dir) = string_value(config, "cache-dir")? {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        match config.get("cache-ttl") {
            None => {}
            Some(toml::Value::Integer(secs)) if *secs >= 0 => self.cache_ttl = Some(*secs as u64),
            Some(_) => return Err(invalid("cache-ttl", "a non-negative number of seconds")),
        }

        for key in config.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("Ignoring unknown settings key '{}'", key);
            }
        }
        Ok(())
    }
}

const KNOWN_KEYS: [&str; 10] = [
    "format",
    "verbose",
    "log-level",
    "log-format",
    "log-file",
    "color",
    "no-color",
    "cache-dir",
    "cache-ttl",
    "settings",
];

/// `<config_dir>/Monitorstack/monitorstack.toml`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Parse settings text read from `path`
pub fn parse_settings(path: &Path, contents: &str) -> Result<Settings, SettingsError> {
    let config = toml::from_str::<toml::Table>(contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut settings = Settings::default();
    settings.apply_toml_values(&config)?;
    Ok(settings)
}

/// Load the settings file.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_settings_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Settings::default()),
        },
    };

    log::debug!("Loading settings from {}", path.display());
    let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
        path: path.clone(),
        source,
    })?;
    parse_settings(&path, &contents)
}
