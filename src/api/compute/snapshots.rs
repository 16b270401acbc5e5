//
//  titan-cli
//  api/compute/snapshots.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Snapshot API types and endpoint methods.
//!
//! Snapshots hang off a server and follow its identifier scheme: a server
//! addressed by UUID lists, creates and deletes snapshots through the legacy
//! endpoints, a server addressed by OID through the current ones.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError, ApiGeneration, FlexTimestamp, ResourceId, Size};
use crate::util::encode_segment;

/// A point-in-time copy of a server disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub oid: Option<String>,

    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub created_at: FlexTimestamp,

    #[serde(default)]
    pub size: Option<Size>,

    /// Identifier of the server the snapshot belongs to.
    #[serde(default, alias = "server_oid", alias = "server_uuid")]
    pub server: Option<String>,
}

impl Snapshot {
    /// The identifier to use with endpoints of the given generation.
    pub fn id_for(&self, generation: ApiGeneration) -> Option<&str> {
        match generation {
            ApiGeneration::Current => self.oid.as_deref(),
            ApiGeneration::Legacy => self.uuid.as_deref(),
        }
    }

    /// OID when present, UUID otherwise.
    pub fn id(&self) -> &str {
        self.oid
            .as_deref()
            .or(self.uuid.as_deref())
            .unwrap_or("-")
    }
}

#[derive(Debug, Serialize)]
struct CreateSnapshotRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl TitanClient {
    /// Lists the snapshots of a server.
    pub async fn list_snapshots(&self, server: &ResourceId) -> Result<Vec<Snapshot>, ApiError> {
        let path = format!("{}/snapshots", server.server_path());
        self.get(&path).await
    }

    /// Creates a snapshot. Without a name the API picks one.
    pub async fn create_snapshot(
        &self,
        server: &ResourceId,
        name: Option<&str>,
    ) -> Result<Snapshot, ApiError> {
        let path = format!("{}/snapshots", server.server_path());
        self.post(&path, &CreateSnapshotRequest { name }).await
    }

    /// Deletes a snapshot. `snapshot` must be in the server's identifier scheme.
    pub async fn delete_snapshot(
        &self,
        server: &ResourceId,
        snapshot: &str,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/snapshots/{}", server.server_path(), encode_segment(snapshot));
        self.delete(&path).await
    }

    /// Restores the server disk from a snapshot.
    pub async fn restore_snapshot(
        &self,
        server: &ResourceId,
        snapshot: &str,
    ) -> Result<ActionResult, ApiError> {
        let path = format!(
            "{}/snapshots/{}/restore",
            server.server_path(),
            encode_segment(snapshot)
        );
        self.put_empty(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    #[test]
    fn test_snapshot_ids_per_generation() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"oid":"s1","uuid":"u1","name":"daily","created_at":1000,"size":{"value":10,"unit":"GB"}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.id_for(ApiGeneration::Current), Some("s1"));
        assert_eq!(snapshot.id_for(ApiGeneration::Legacy), Some("u1"));
        assert_eq!(snapshot.size.unwrap().to_string(), "10 GB");
    }

    #[tokio::test]
    async fn test_list_legacy_and_current() {
        let mut server = mockito::Server::new_async().await;
        let legacy = server
            .mock("GET", "/compute/servers/u-1/snapshots")
            .with_body(r#"[{"uuid":"a","created_at":"5"}]"#)
            .expect(1)
            .create_async()
            .await;
        let current = server
            .mock("GET", "/v2/compute/servers/o-1/snapshots")
            .with_body(r#"[{"oid":"b","created_at":7}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let old = client
            .list_snapshots(&ResourceId::Uuid("u-1".to_string()))
            .await
            .unwrap();
        let new = client
            .list_snapshots(&ResourceId::Oid("o-1".to_string()))
            .await
            .unwrap();

        assert_eq!(old[0].id(), "a");
        assert_eq!(new[0].created_at.seconds(), Some(7));
        legacy.assert_async().await;
        current.assert_async().await;
    }

    #[tokio::test]
    async fn test_snapshot_segment_is_escaped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v2/compute/servers/o-1/snapshots/nightly%2F2")
            .with_body(r#"{"success":"deleted"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        client
            .delete_snapshot(&ResourceId::Oid("o-1".to_string()), "nightly/2")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_omits_missing_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/compute/servers/o-1/snapshots")
            .match_body(mockito::Matcher::Json(serde_json::json!({})))
            .with_body(r#"{"oid":"s9","name":"auto"}"#)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let created = client
            .create_snapshot(&ResourceId::Oid("o-1".to_string()), None)
            .await
            .unwrap();
        assert_eq!(created.id(), "s9");
        mock.assert_async().await;
    }
}
