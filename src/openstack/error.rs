//! OpenStack Error Types

use crate::core::cache::CacheError;
use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum OpenStackError {
    #[error("Missing required setting '{0}'")]
    MissingSetting(&'static str),

    #[error("Request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Authentication response carried no X-Subject-Token header")]
    MissingToken,

    #[error("No {interface} endpoint for service type '{service_type}'{}", region_suffix(.region))]
    EndpointNotFound {
        service_type: String,
        interface: String,
        region: Option<String>,
    },

    #[error("Cannot decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cannot build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ContextualError for OpenStackError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, OpenStackError::MissingSetting(_))
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            OpenStackError::MissingSetting(_) => Some("OpenStack credentials are incomplete"),
            _ => None,
        }
    }
}

fn region_suffix(region: &Option<String>) -> String {
    region
        .as_ref()
        .map(|r| format!(" in region {}", r))
        .unwrap_or_default()
}

pub type OpenStackResult<T> = Result<T, OpenStackError>;
