//! Check result record
//!
//! A [`CheckResult`] is the single record handed from a check to an output
//! formatter. Checks build one per invocation; formatters only ever read it.

use crate::output::value::MetricValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tags/dimensions of a measurement
pub type Meta = BTreeMap<String, MetricValue>;

/// Measured facts of a measurement
pub type Variables = BTreeMap<String, MetricValue>;

/// Top level field names that may never be used as a meta key
pub const RESERVED_KEYS: [&str; 4] = ["exit_code", "message", "measurement_name", "variables"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub exit_code: i32,
    pub message: String,
    pub measurement_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_units: Option<String>,
}

impl CheckResult {
    /// Successful, empty result for `measurement_name` with an empty meta set
    pub fn new(measurement_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
            measurement_name: measurement_name.into(),
            meta: Some(Meta::new()),
            variables: Variables::new(),
            measurement_type: None,
            measurement_units: None,
        }
    }

    /// Drop the meta set entirely
    pub fn without_meta(mut self) -> Self {
        self.meta = None;
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert_meta(key, value);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert_variable(key, value);
        self
    }

    pub fn with_measurement_type(mut self, measurement_type: impl Into<String>) -> Self {
        self.measurement_type = Some(measurement_type.into());
        self
    }

    pub fn with_measurement_units(mut self, units: impl Into<String>) -> Self {
        self.measurement_units = Some(units.into());
        self
    }

    /// Add a tag. Reserved top level names are refused.
    pub fn insert_meta(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            log::warn!("Ignoring reserved meta key '{}' on {}", key, self.measurement_name);
            return;
        }
        self.meta
            .get_or_insert_with(Meta::new)
            .insert(key, value.into());
    }

    pub fn insert_variable(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Mark the result as failed
    pub fn fail(&mut self, exit_code: i32, message: impl Into<String>) {
        self.exit_code = exit_code;
        self.message = message.into();
    }

    pub fn is_ok(&self) -> bool {
        self.exit_code == 0
    }

    /// Whether a non-empty meta set is present
    pub fn has_meta(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| !m.is_empty())
    }
}
