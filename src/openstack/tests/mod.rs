//! Mock cloud used by the client and `os_*` check tests


use crate::core::config::{parse_config, ServiceConfig};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use std::path::Path;

/// A mockito server answering Keystone authentication with a catalog that
/// points every service back at itself
pub(crate) struct MockCloud {
    pub server: ServerGuard,
    pub auth: Mock,
}

impl MockCloud {
    pub fn new() -> Self {
        let mut server = mockito::Server::new();
        let url = server.url();
        let endpoint = |path: &str| {
            json!([{"interface": "internal", "region_id": "RegionOne", "region": "RegionOne",
                    "url": format!("{}{}", url, path)}])
        };
        let token = json!({
            "token": {
                "catalog": [
                    {"type": "identity", "name": "keystone", "endpoints": endpoint("/identity/v3")},
                    {"type": "compute", "name": "nova", "endpoints": endpoint("/compute/v2.1")},
                    {"type": "volumev3", "name": "cinderv3", "endpoints": endpoint("/volume/v3/p1")},
                    {"type": "network", "name": "neutron", "endpoints": endpoint("/network")}
                ]
            }
        });

        let auth = server
            .mock("POST", "/v3/auth/tokens")
            .match_body(Matcher::PartialJson(json!({
                "auth": {"identity": {"password": {"user": {"name": "admin"}}}}
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_header("X-Subject-Token", "test-token")
            .with_body(token.to_string())
            .create();

        Self { server, auth }
    }

    /// Service section pointing at this cloud
    pub fn config(&self) -> ServiceConfig {
        let text = format!(
            r#"
[DEFAULT]
auth_url = "{}"
username = "admin"
password = "secrete"
project_name = "admin"
region_name = "RegionOne"

[nova]
interface = "internal"

[cinder]

[neutron]
"#,
            self.server.url()
        );
        parse_config(Path::new("openstack.toml"), &text)
            .unwrap()
            .section("nova")
            .unwrap()
    }

    /// Write the service config to `dir` and return its path
    pub fn write_config(&self, dir: &Path) -> std::path::PathBuf {
        let path = dir.join("openstack.toml");
        let text = format!(
            "[DEFAULT]\nauth_url = \"{}\"\nusername = \"admin\"\npassword = \"secrete\"\n\
             project_name = \"admin\"\n\n[nova]\ninterface = \"internal\"\n\n[cinder]\n\n[neutron]\n",
            self.server.url()
        );
        std::fs::write(&path, text).unwrap();
        path
    }

    pub fn get(&mut self, path: &str, body: serde_json::Value) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .match_header("X-Auth-Token", "test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create()
    }

    pub fn projects(&mut self) -> Mock {
        self.get(
            "/identity/v3/projects",
            json!({"projects": [
                {"id": "p1", "name": "admin"},
                {"id": "p2", "name": "demo"}
            ]}),
        )
    }

    pub fn flavors(&mut self) -> Mock {
        self.get(
            "/compute/v2.1/flavors/detail",
            json!({"flavors": [
                {"id": "f1", "name": "m1.small", "vcpus": 1, "ram": 2048, "disk": 20},
                {"id": "f2", "name": "m1.large", "vcpus": 4, "ram": 8192, "disk": 80}
            ]}),
        )
    }

    pub fn servers(&mut self) -> Mock {
        self.get(
            "/compute/v2.1/servers/detail",
            json!({"servers": [
                {"id": "s1", "name": "web-1", "tenant_id": "p1", "flavor": {"id": "f1"}},
                {"id": "s2", "name": "web-2", "tenant_id": "p1", "flavor": {"id": "f2"}},
                {"id": "s3", "name": "db-1", "tenant_id": "p2", "flavor": {"id": "f2"}}
            ]}),
        )
    }

    pub fn pools(&mut self) -> Mock {
        self.get(
            "/volume/v3/p1/scheduler-stats/get_pools",
            json!({"pools": [
                {"name": "c1@lvm#lvm", "capabilities": {"pool_name": "lvm", "total_capacity_gb": 100.0, "free_capacity_gb": 25.0}},
                {"name": "c1@ceph#ceph", "capabilities": {"pool_name": "ceph", "total_capacity_gb": "300", "free_capacity_gb": "75"}}
            ]}),
        )
    }
}
