//! Minimal blocking OpenStack API client
//!
//! Authenticates against Keystone v3 with a password, resolves service
//! endpoints from the returned catalog and issues the handful of read-only
//! requests the OpenStack checks need.

use crate::core::cache::LocalCache;
use crate::core::config::ServiceConfig;
use crate::openstack::error::{OpenStackError, OpenStackResult};
use crate::openstack::types::{
    AgentsResponse, CatalogEntry, Flavor, FlavorsResponse, NetworkAgent, Pool, PoolsResponse,
    Project, ProjectResponse, ProjectsResponse, QuotaSetResponse, Server, ServersResponse,
    TokenResponse,
};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::time::Duration;

/// Page size used when listing servers
pub const SERVER_PAGE_LIMIT: usize = 512;

const DEFAULT_DOMAIN: &str = "Default";
const DEFAULT_INTERFACE: &str = "internal";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Keystone password credentials
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSettings {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub project_name: String,
    pub user_domain_name: String,
    pub project_domain_name: String,
    pub region_name: Option<String>,
    pub interface: String,
    pub insecure: bool,
    /// Per request timeout, from the `timeout` key in seconds
    pub timeout: Duration,
}

impl AuthSettings {
    /// Read credentials from a service section. `interface` is removed from
    /// the section since it selects endpoints rather than authenticating.
    pub fn from_config(mut config: ServiceConfig) -> OpenStackResult<Self> {
        let required = |config: &ServiceConfig, key: &'static str| {
            config
                .get_str(key)
                .ok_or(OpenStackError::MissingSetting(key))
        };

        let interface = config
            .take_str("interface")
            .unwrap_or_else(|| DEFAULT_INTERFACE.to_string());

        Ok(Self {
            auth_url: required(&config, "auth_url")?,
            username: required(&config, "username")?,
            password: required(&config, "password")?,
            project_name: required(&config, "project_name")?,
            user_domain_name: config
                .get_str("user_domain_name")
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            project_domain_name: config
                .get_str("project_domain_name")
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            region_name: config.get_str("region_name"),
            interface,
            insecure: config.get_bool("insecure").unwrap_or(false),
            timeout: config
                .get_int("timeout")
                .filter(|secs| *secs > 0)
                .map(|secs| Duration::from_secs(secs as u64))
                .unwrap_or(REQUEST_TIMEOUT),
        })
    }
}

/// Join `path` onto an API base, inserting `version` unless the base already
/// ends with it
fn versioned_url(base: &str, version: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with(version) {
        format!("{}/{}", base, path)
    } else {
        format!("{}/{}/{}", base, version, path)
    }
}

#[derive(Debug, Clone)]
struct Session {
    token: String,
    catalog: Vec<CatalogEntry>,
}

pub struct OpenStack {
    settings: AuthSettings,
    http: Client,
    cache: Option<LocalCache>,
    session: OnceCell<Session>,
}

impl OpenStack {
    pub fn new(config: ServiceConfig) -> OpenStackResult<Self> {
        Self::with_settings(AuthSettings::from_config(config)?)
    }

    pub fn with_settings(settings: AuthSettings) -> OpenStackResult<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.insecure)
            .build()
            .map_err(OpenStackError::Client)?;

        Ok(Self {
            settings,
            http,
            cache: None,
            session: OnceCell::new(),
        })
    }

    /// Memoize project names in `cache`
    pub fn with_cache(mut self, cache: LocalCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn session(&self) -> OpenStackResult<&Session> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }
        let session = self.authenticate()?;
        Ok(self.session.get_or_init(|| session))
    }

    fn authenticate(&self) -> OpenStackResult<Session> {
        let url = versioned_url(&self.settings.auth_url, "v3", "auth/tokens");
        let body = json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "name": self.settings.username,
                            "domain": {"name": self.settings.user_domain_name},
                            "password": self.settings.password,
                        }
                    }
                },
                "scope": {
                    "project": {
                        "name": self.settings.project_name,
                        "domain": {"name": self.settings.project_domain_name},
                    }
                }
            }
        });

        log::debug!("Authenticating {} against {}", self.settings.username, url);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .map_err(|source| OpenStackError::Http {
                url: url.clone(),
                source,
            })?;
        let response = Self::check_status(&url, response)?;

        let token = response
            .headers()
            .get("X-Subject-Token")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or(OpenStackError::MissingToken)?;
        let body: TokenResponse = Self::decode(&url, response)?;

        Ok(Session {
            token,
            catalog: body.token.catalog,
        })
    }

    fn check_status(url: &str, response: Response) -> OpenStackResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(OpenStackError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }

    fn decode<T: DeserializeOwned>(url: &str, response: Response) -> OpenStackResult<T> {
        response.json().map_err(|source| OpenStackError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Endpoint URL of the first matching service type
    pub fn endpoint(&self, service_types: &[&str]) -> OpenStackResult<String> {
        let session = self.session()?;
        let region = self.settings.region_name.as_deref();

        service_types
            .iter()
            .find_map(|service_type| {
                session
                    .catalog
                    .iter()
                    .filter(|entry| entry.service_type == *service_type)
                    .flat_map(|entry| entry.endpoints.iter())
                    .find(|ep| ep.interface == self.settings.interface && ep.in_region(region))
                    .map(|ep| ep.url.trim_end_matches('/').to_string())
            })
            .ok_or_else(|| OpenStackError::EndpointNotFound {
                service_type: service_types.join("|"),
                interface: self.settings.interface.clone(),
                region: self.settings.region_name.clone(),
            })
    }

    fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> OpenStackResult<T> {
        let session = self.session()?;
        log::debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(url)
            .header("X-Auth-Token", &session.token)
            .query(query)
            .send()
            .map_err(|source| OpenStackError::Http {
                url: url.to_string(),
                source,
            })?;
        Self::decode(url, Self::check_status(url, response)?)
    }

    fn identity_url(&self, path: &str) -> OpenStackResult<String> {
        Ok(versioned_url(&self.endpoint(&["identity"])?, "v3", path))
    }

    /// All projects; every `id -> name` pair is written to the cache
    pub fn projects(&self) -> OpenStackResult<Vec<Project>> {
        let url = self.identity_url("projects")?;
        let projects = self.get::<ProjectsResponse>(&url, &[])?.projects;

        if let Some(cache) = &self.cache {
            let mut handle = cache.open()?;
            for project in &projects {
                handle.set(&project.id, &project.name)?;
            }
            handle.close()?;
        }
        Ok(projects)
    }

    /// Name of a project, read through the cache
    pub fn project_name(&self, project_id: &str) -> OpenStackResult<String> {
        let mut handle = match &self.cache {
            Some(cache) => Some(cache.open()?),
            None => None,
        };
        if let Some(name) = handle.as_ref().and_then(|h| h.get::<String>(project_id)) {
            return Ok(name);
        }

        let url = self.identity_url(&format!("projects/{}", project_id))?;
        let project = self.get::<ProjectResponse>(&url, &[])?.project;
        if let Some(handle) = handle.as_mut() {
            handle.set(&project.id, &project.name)?;
        }
        Ok(project.name)
    }

    /// Compute quota set of a project
    pub fn compute_limits(
        &self,
        project_id: &str,
    ) -> OpenStackResult<BTreeMap<String, serde_json::Value>> {
        let url = format!("{}/os-quota-sets/{}", self.endpoint(&["compute"])?, project_id);
        Ok(self.get::<QuotaSetResponse>(&url, &[])?.quota_set)
    }

    /// Every server across all projects, fetched page by page
    pub fn servers(&self) -> OpenStackResult<Vec<Server>> {
        let url = format!("{}/servers/detail", self.endpoint(&["compute"])?);
        let mut servers: Vec<Server> = Vec::new();

        loop {
            let mut query = vec![
                ("all_tenants", "True".to_string()),
                ("limit", SERVER_PAGE_LIMIT.to_string()),
            ];
            if let Some(last) = servers.last() {
                query.push(("marker", last.id.clone()));
            }

            let page = self.get::<ServersResponse>(&url, &query)?.servers;
            let full_page = page.len() == SERVER_PAGE_LIMIT;
            servers.extend(page);
            if !full_page {
                return Ok(servers);
            }
        }
    }

    /// All flavors, public and private, keyed by id
    pub fn flavors(&self) -> OpenStackResult<BTreeMap<String, Flavor>> {
        let url = format!("{}/flavors/detail", self.endpoint(&["compute"])?);
        let flavors = self
            .get::<FlavorsResponse>(&url, &[("is_public", "None".to_string())])?
            .flavors;
        Ok(flavors.into_iter().map(|f| (f.id.clone(), f)).collect())
    }

    /// Scheduler statistics of every block storage pool
    pub fn volume_pool_stats(&self) -> OpenStackResult<Vec<Pool>> {
        let base = self.endpoint(&["block-storage", "volumev3", "volumev2"])?;
        let url = format!("{}/scheduler-stats/get_pools", base);
        Ok(self
            .get::<PoolsResponse>(&url, &[("detail", "True".to_string())])?
            .pools)
    }

    pub fn network_agents(&self) -> OpenStackResult<Vec<NetworkAgent>> {
        let url = versioned_url(&self.endpoint(&["network"])?, "v2.0", "agents");
        Ok(self.get::<AgentsResponse>(&url, &[])?.agents)
    }
}
