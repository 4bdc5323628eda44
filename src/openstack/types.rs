//! Wire types of the Keystone, Nova, Cinder and Neutron APIs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: Token,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub url: String,
}

impl Endpoint {
    pub fn in_region(&self, region: Option<&str>) -> bool {
        match region {
            None => true,
            Some(r) => self.region.as_deref() == Some(r) || self.region_id.as_deref() == Some(r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSetResponse {
    pub quota_set: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerFlavor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "project_id")]
    pub tenant_id: String,
    pub flavor: ServerFlavor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServersResponse {
    pub servers: Vec<Server>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Flavor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vcpus: i64,
    #[serde(default)]
    pub ram: i64,
    #[serde(default)]
    pub disk: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorsResponse {
    pub flavors: Vec<Flavor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolCapabilities {
    #[serde(default)]
    pub pool_name: Option<String>,
    #[serde(default)]
    pub total_capacity_gb: Option<serde_json::Value>,
    #[serde(default)]
    pub free_capacity_gb: Option<serde_json::Value>,
}

/// Capacities are numbers, numeric strings, or words such as `infinite`;
/// anything that is not a number counts as zero
fn capacity(value: &Option<serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl PoolCapabilities {
    pub fn total_capacity_gb(&self) -> f64 {
        capacity(&self.total_capacity_gb)
    }

    pub fn free_capacity_gb(&self) -> f64 {
        capacity(&self.free_capacity_gb)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pool {
    pub name: String,
    pub capabilities: PoolCapabilities,
}

impl Pool {
    /// Pool name as reported in the capabilities, falling back to the pool id
    pub fn pool_name(&self) -> &str {
        self.capabilities.pool_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolsResponse {
    pub pools: Vec<Pool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkAgent {
    pub binary: String,
    pub alive: bool,
    #[serde(default)]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentsResponse {
    pub agents: Vec<NetworkAgent>,
}
