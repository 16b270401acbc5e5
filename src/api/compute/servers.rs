//
//  titan-cli
//  api/compute/servers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server API types and endpoint methods.
//!
//! Servers are the one resource reachable through both API generations: the
//! legacy endpoints address them by UUID, the current ones by OID. Every
//! method here takes a [`ResourceId`] and lets it pick the path family.
//!
//! # Example
//!
//! ```rust,no_run
//! use titan_cli::api::client::{ClientConfig, TitanClient};
//! use titan_cli::api::common::ResourceId;
//! use titan_cli::api::compute::ServerAction;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = TitanClient::new(ClientConfig::new("https://api.example.com", "token"))?;
//! let id = ResourceId::from_flags(Some("srv-123"), None)?;
//! client.server_action(&id, ServerAction::Reboot).await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError, ApiGeneration, FlexTimestamp, ResourceId, Size};

/// A virtual server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Current-generation identifier.
    #[serde(default)]
    pub oid: Option<String>,

    /// Legacy identifier.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Sent by both generations; a body without it is not a server.
    pub name: String,

    /// Power state, e.g. `started`, `stopped`, `installing`.
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub plan: Option<String>,

    /// Operating system template the server was installed from.
    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub cpu: Option<u32>,

    #[serde(default)]
    pub ram: Option<Size>,

    #[serde(default)]
    pub disk: Option<Size>,

    #[serde(default)]
    pub ips: Vec<ServerIp>,

    #[serde(default)]
    pub reverse: Option<String>,

    #[serde(default)]
    pub company_oid: Option<String>,

    /// Whether the server is covered by a disaster recovery plan.
    #[serde(default)]
    pub drp: bool,

    #[serde(default)]
    pub created_at: FlexTimestamp,
}

impl Server {
    /// OID when present, UUID otherwise.
    pub fn id(&self) -> &str {
        self.oid
            .as_deref()
            .or(self.uuid.as_deref())
            .unwrap_or("-")
    }
}

/// An address attached to a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerIp {
    pub ip: String,

    #[serde(default)]
    pub version: Option<u8>,
}

/// Power state transitions accepted by `PUT {server}/action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServerAction {
    Start,
    Stop,
    Hardstop,
    Reboot,
    Hardreboot,
}

impl ServerAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ServerAction::Start => "start",
            ServerAction::Stop => "stop",
            ServerAction::Hardstop => "hardstop",
            ServerAction::Reboot => "reboot",
            ServerAction::Hardreboot => "hardreboot",
        }
    }
}

#[derive(Debug, Serialize)]
struct ActionRequest {
    action: ServerAction,
}

#[derive(Debug, Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct ReverseRequest<'a> {
    reverse: &'a str,
}

/// Body for mounting an ISO image on a server.
#[derive(Debug, Clone, Serialize)]
pub struct LoadIsoRequest {
    /// `http`, `https` or `cifs`.
    pub protocol: String,
    pub url: String,
}

impl TitanClient {
    /// Lists every server visible to the token (current API).
    pub async fn list_servers(&self) -> Result<Vec<Server>, ApiError> {
        self.get(ApiGeneration::Current.servers_root()).await
    }

    /// Fetches one server by OID or UUID.
    pub async fn get_server(&self, id: &ResourceId) -> Result<Server, ApiError> {
        self.get(&id.server_path()).await
    }

    /// Requests a power state transition.
    pub async fn server_action(
        &self,
        id: &ResourceId,
        action: ServerAction,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/action", id.server_path());
        self.put(&path, &ActionRequest { action }).await
    }

    pub async fn rename_server(&self, id: &ResourceId, name: &str) -> Result<ActionResult, ApiError> {
        let path = format!("{}/name", id.server_path());
        self.put(&path, &NameRequest { name }).await
    }

    /// Sets the reverse DNS name of the server's main address.
    pub async fn set_server_reverse(
        &self,
        id: &ResourceId,
        reverse: &str,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/reverse", id.server_path());
        self.put(&path, &ReverseRequest { reverse }).await
    }

    pub async fn load_iso(
        &self,
        id: &ResourceId,
        request: &LoadIsoRequest,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/iso", id.server_path());
        self.put(&path, request).await
    }

    pub async fn unload_iso(&self, id: &ResourceId) -> Result<ActionResult, ApiError> {
        let path = format!("{}/iso", id.server_path());
        self.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::common::{classify, ErrorKind};

    #[test]
    fn test_server_tolerates_sparse_payload() {
        let server: Server = serde_json::from_str(r#"{"oid":"srv-1","name":"web","extra":1}"#).unwrap();
        assert_eq!(server.id(), "srv-1");
        assert!(server.ips.is_empty());
        assert!(!server.created_at.is_set());
    }

    #[test]
    fn test_server_timestamp_as_string() {
        let server: Server =
            serde_json::from_str(r#"{"uuid":"u-1","name":"db","created_at":"1700000000"}"#).unwrap();
        assert_eq!(server.id(), "u-1");
        assert_eq!(server.created_at.seconds(), Some(1_700_000_000));
    }

    #[test]
    fn test_foreign_object_is_not_a_server() {
        let err = classify::<Server>(br#"{"status":"queued"}"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_action_uses_generation_path() {
        let mut server = mockito::Server::new_async().await;
        let legacy = server
            .mock("PUT", "/compute/servers/u-1/action")
            .match_body(mockito::Matcher::Json(serde_json::json!({"action": "hardreboot"})))
            .with_body(r#"{"success":"Server rebooting"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let id = ResourceId::from_flags(None, Some("u-1")).unwrap();
        let result = client.server_action(&id, ServerAction::Hardreboot).await.unwrap();

        assert_eq!(result.summary(), Some("Server rebooting"));
        legacy.assert_async().await;
    }
}
