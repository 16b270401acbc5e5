//
//  titan-cli
//  api/compute/networks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Private network API types and endpoint methods.
//!
//! Networks only exist in the current API generation and are addressed by OID.
//! Disabling DRP replication on a network drops the secondary copy, so
//! [`TitanClient::disable_network_drp`] refuses to run without confirmation.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError, FlexTimestamp};
use crate::util::encode_segment;

const NETWORKS_ROOT: &str = "/v2/compute/networks";

/// A private network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub oid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub cidr: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub gateway: Option<String>,

    #[serde(default)]
    pub company_oid: Option<String>,

    /// Servers plugged into the network.
    #[serde(default)]
    pub servers: Vec<NetworkServer>,

    #[serde(default)]
    pub drp: bool,

    #[serde(default)]
    pub created_at: FlexTimestamp,
}

/// A server as seen from a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkServer {
    pub oid: String,

    #[serde(default)]
    pub name: Option<String>,

    /// The server's address inside the network.
    #[serde(default)]
    pub ip: Option<String>,
}

/// Body of `POST /v2/compute/networks`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateNetworkRequest {
    pub name: String,

    pub cidr: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_oid: Option<String>,
}

#[derive(Debug, Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct ServerRequest<'a> {
    server_oid: &'a str,
}

#[derive(Debug, Serialize)]
struct GatewayRequest<'a> {
    ip: &'a str,
}

fn network_path(oid: &str) -> String {
    format!("{}/{}", NETWORKS_ROOT, encode_segment(oid))
}

impl TitanClient {
    pub async fn list_networks(&self) -> Result<Vec<Network>, ApiError> {
        self.get(NETWORKS_ROOT).await
    }

    pub async fn get_network(&self, oid: &str) -> Result<Network, ApiError> {
        self.get(&network_path(oid)).await
    }

    pub async fn create_network(&self, request: &CreateNetworkRequest) -> Result<Network, ApiError> {
        self.post(NETWORKS_ROOT, request).await
    }

    pub async fn delete_network(&self, oid: &str) -> Result<ActionResult, ApiError> {
        self.delete(&network_path(oid)).await
    }

    pub async fn rename_network(&self, oid: &str, name: &str) -> Result<ActionResult, ApiError> {
        let path = format!("{}/name", network_path(oid));
        self.put(&path, &NameRequest { name }).await
    }

    /// Plugs a server into the network.
    pub async fn attach_network_server(
        &self,
        oid: &str,
        server_oid: &str,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/attach", network_path(oid));
        self.put(&path, &ServerRequest { server_oid }).await
    }

    /// Unplugs a server from the network.
    pub async fn detach_network_server(
        &self,
        oid: &str,
        server_oid: &str,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/detach", network_path(oid));
        self.put(&path, &ServerRequest { server_oid }).await
    }

    pub async fn set_network_gateway(&self, oid: &str, ip: &str) -> Result<ActionResult, ApiError> {
        let path = format!("{}/gateway", network_path(oid));
        self.put(&path, &GatewayRequest { ip }).await
    }

    pub async fn remove_network_gateway(&self, oid: &str) -> Result<ActionResult, ApiError> {
        let path = format!("{}/gateway", network_path(oid));
        self.delete(&path).await
    }

    pub async fn enable_network_drp(&self, oid: &str) -> Result<ActionResult, ApiError> {
        let path = format!("{}/drp/enable", network_path(oid));
        self.put_empty(&path).await
    }

    /// Disables DRP replication of a network.
    ///
    /// # Errors
    ///
    /// Returns a precondition error, without contacting the API, unless
    /// `confirm` is set.
    pub async fn disable_network_drp(
        &self,
        oid: &str,
        confirm: bool,
    ) -> Result<ActionResult, ApiError> {
        if !confirm {
            return Err(ApiError::precondition(format!(
                "disabling DRP on network {} removes its replica, pass --confirm to proceed",
                oid
            )));
        }
        let path = format!("{}/drp/disable", network_path(oid));
        self.put_empty(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::common::{classify, ErrorKind};
    use crate::api::testing::forbid_all_requests;

    #[test]
    fn test_network_without_oid_is_malformed() {
        let err = classify::<Network>(br#"{"status":"queued"}"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_disable_drp_requires_confirmation() {
        let mut server = mockito::Server::new_async().await;
        let forbidden = forbid_all_requests(&mut server).await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let err = client.disable_network_drp("net-1", false).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(err.to_string().contains("--confirm"));
        for mock in forbidden {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_disable_drp_with_confirmation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v2/compute/networks/net-1/drp/disable")
            .with_body(r#"{"message":"DRP disabled"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let result = client.disable_network_drp("net-1", true).await.unwrap();
        assert_eq!(result.summary(), Some("DRP disabled"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_network_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/compute/networks")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "name": "backend",
                "cidr": "10.0.0.0/24"
            })))
            .with_body(r#"{"oid":"net-9","name":"backend","cidr":"10.0.0.0/24","created_at":"1700000000"}"#)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let network = client
            .create_network(&CreateNetworkRequest {
                name: "backend".to_string(),
                cidr: "10.0.0.0/24".to_string(),
                company_oid: None,
            })
            .await
            .unwrap();
        assert_eq!(network.oid, "net-9");
        assert!(network.created_at.is_set());
        mock.assert_async().await;
    }
}
