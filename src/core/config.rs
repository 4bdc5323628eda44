//! Service configuration files
//!
//! Checks that talk to a remote service read their connection details from a
//! TOML file holding an optional `[DEFAULT]` table and one table per service:
//!
//! ```toml
//! [DEFAULT]
//! insecure = false
//! auth_url = "https://keystone:5000/v3"
//!
//! [nova]
//! username = "admin"
//! password = "secrete"
//! ```
//!
//! Every section starts from its own copy of `[DEFAULT]` and then applies its
//! own keys on top. Values are stored as written; numeric text is only
//! coerced when a caller asks for a number.

use crate::core::error_handling::ContextualError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file {path} was not found")]
    NotFound { path: PathBuf },

    #[error("Cannot read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Section [{section}] in {path} is not a table")]
    InvalidSection { path: PathBuf, section: String },

    #[error("Config section [{0}] was not found")]
    MissingSection(String),
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { .. } => Some("Service config file not found"),
            ConfigError::Parse { .. } => Some("Service config file is not valid TOML"),
            ConfigError::InvalidSection { .. } => Some("Service config section must be a table"),
            ConfigError::MissingSection(_) => Some("Service config section is missing"),
            ConfigError::Read { .. } => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Coerce configuration text: integer text becomes an integer, float text a
/// float, anything else is returned unchanged
pub fn is_int(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                toml::Value::Integer(i)
            } else if let Ok(f) = trimmed.parse::<f64>() {
                toml::Value::Float(f)
            } else {
                toml::Value::String(text)
            }
        }
        other => other,
    }
}

/// Key/value settings of one service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceConfig {
    values: BTreeMap<String, toml::Value>,
}

impl ServiceConfig {
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    /// String form of a value; numbers and booleans are rendered as text
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.values.get(key).map(value_to_string)
    }

    /// Remove a key, returning its string form
    pub fn take_str(&mut self, key: &str) -> Option<String> {
        self.values.remove(key).map(|v| value_to_string(&v))
    }

    /// Integer value; integer text such as `"30"` is accepted too
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match is_int(self.values.get(key)?.clone()) {
            toml::Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            toml::Value::Boolean(b) => Some(*b),
            toml::Value::Integer(i) => Some(*i != 0),
            toml::Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "on" => Some(true),
                "false" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: toml::Value) {
        self.values.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// All service sections of a config file
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigFile {
    path: PathBuf,
    sections: BTreeMap<String, ServiceConfig>,
}

impl ServiceConfigFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A copy of one section; callers may mutate it freely
    pub fn section(&self, name: &str) -> ConfigResult<ServiceConfig> {
        self.sections
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::MissingSection(name.to_string()))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

/// Read a service config file
pub fn read_config(path: &Path) -> ConfigResult<ServiceConfigFile> {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if !absolute.is_file() {
        return Err(ConfigError::NotFound { path: absolute });
    }

    let contents = std::fs::read_to_string(&absolute).map_err(|source| ConfigError::Read {
        path: absolute.clone(),
        source,
    })?;
    parse_config(&absolute, &contents)
}

/// Parse service config text; `path` is only used in error messages
pub fn parse_config(path: &Path, contents: &str) -> ConfigResult<ServiceConfigFile> {
    let mut table: toml::Table = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let defaults = match table.remove(DEFAULT_SECTION) {
        Some(toml::Value::Table(defaults)) => defaults,
        Some(_) => {
            return Err(ConfigError::InvalidSection {
                path: path.to_path_buf(),
                section: DEFAULT_SECTION.to_string(),
            })
        }
        None => toml::Table::new(),
    };

    let mut sections = BTreeMap::new();
    for (name, value) in table {
        let toml::Value::Table(own) = value else {
            return Err(ConfigError::InvalidSection {
                path: path.to_path_buf(),
                section: name,
            });
        };

        let mut section = ServiceConfig::default();
        for (key, value) in defaults.iter() {
            section.insert(key.clone(), value.clone());
        }
        for (key, value) in own {
            section.insert(key, value);
        }
        sections.insert(name, section);
    }

    log::debug!("Loaded {} config sections from {}", sections.len(), path.display());
    Ok(ServiceConfigFile {
        path: path.to_path_buf(),
        sections,
    })
}
