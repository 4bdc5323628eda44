//! Check Error Types

use crate::core::cache::CacheError;
use crate::core::config::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::openstack::error::OpenStackError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Cannot read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected {what}: '{value}'")]
    Parse { what: String, value: String },

    #[error("Cannot run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {code}: {stderr}")]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("Cannot connect to {address}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    OpenStack(#[from] OpenStackError),
}

impl CheckError {
    pub fn parse(what: impl Into<String>, value: impl Into<String>) -> Self {
        CheckError::Parse {
            what: what.into(),
            value: value.into(),
        }
    }
}

impl ContextualError for CheckError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CheckError::Config(e) => e.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CheckError::Config(e) => e.user_message(),
            _ => None,
        }
    }
}

pub type CheckOutcome<T> = Result<T, CheckError>;
