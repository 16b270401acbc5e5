//
//  titan-cli
//  api/compute/drp.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Disaster recovery plan (DRP) operations on a replicated server.
//!
//! A soft failover is orderly and always allowed. A hard failover and a
//! resynchronisation can lose data, so both require an explicit site and a
//! confirmation. When either is missing the call fails locally with a
//! precondition error naming every missing flag, and nothing is sent.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError};
use crate::util::encode_segment;

/// One of the two replication sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DrpSite {
    Primary,
    Secondary,
}

impl fmt::Display for DrpSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrpSite::Primary => "primary",
            DrpSite::Secondary => "secondary",
        })
    }
}

/// Replication status of a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrpStatus {
    #[serde(default)]
    pub enabled: bool,

    /// Site currently serving traffic.
    #[serde(default)]
    pub active_site: Option<DrpSite>,

    #[serde(default)]
    pub state: Option<String>,

    /// Replication lag in seconds, when known.
    #[serde(default)]
    pub lag: Option<u64>,
}

#[derive(Debug, Serialize)]
struct SiteRequest {
    site: DrpSite,
}

#[derive(Debug, Serialize)]
struct ResyncRequest {
    authoritative_site: DrpSite,
}

fn drp_path(server_oid: &str) -> String {
    format!("/v2/compute/servers/{}/drp", encode_segment(server_oid))
}

/// Checks the gate of a destructive DRP operation.
///
/// Returns the site when both `site` and `confirm` are supplied, otherwise a
/// precondition error listing each missing flag.
fn require_gate(
    operation: &str,
    site_flag: &str,
    site: Option<DrpSite>,
    confirm: bool,
) -> Result<DrpSite, ApiError> {
    let mut missing = Vec::new();
    if site.is_none() {
        missing.push(site_flag);
    }
    if !confirm {
        missing.push("--confirm");
    }

    match site {
        Some(site) if missing.is_empty() => Ok(site),
        _ => Err(ApiError::precondition(format!(
            "{} may lose data, missing required flag(s): {}",
            operation,
            missing.join(", ")
        ))),
    }
}

impl TitanClient {
    pub async fn drp_status(&self, server_oid: &str) -> Result<DrpStatus, ApiError> {
        self.get(&drp_path(server_oid)).await
    }

    /// Orderly failover to `site`.
    pub async fn drp_soft_failover(
        &self,
        server_oid: &str,
        site: DrpSite,
    ) -> Result<ActionResult, ApiError> {
        let path = format!("{}/failover", drp_path(server_oid));
        self.put(&path, &SiteRequest { site }).await
    }

    /// Forced failover to `site`, without waiting for replication to drain.
    ///
    /// # Errors
    ///
    /// Precondition error, with no request sent, unless both `site` and
    /// `confirm` are given.
    pub async fn drp_hard_failover(
        &self,
        server_oid: &str,
        site: Option<DrpSite>,
        confirm: bool,
    ) -> Result<ActionResult, ApiError> {
        let site = require_gate("hard failover", "--site", site, confirm)?;
        warn!(server = server_oid, %site, "forcing DRP failover");
        let path = format!("{}/failover/hard", drp_path(server_oid));
        self.put(&path, &SiteRequest { site }).await
    }

    /// Rebuilds the replica from `authoritative`, discarding the other side.
    ///
    /// # Errors
    ///
    /// Precondition error, with no request sent, unless both `authoritative`
    /// and `confirm` are given.
    pub async fn drp_resync(
        &self,
        server_oid: &str,
        authoritative: Option<DrpSite>,
        confirm: bool,
    ) -> Result<ActionResult, ApiError> {
        let authoritative_site =
            require_gate("resync", "--authoritative-site", authoritative, confirm)?;
        warn!(server = server_oid, site = %authoritative_site, "resynchronising DRP replica");
        let path = format!("{}/resync", drp_path(server_oid));
        self.put(&path, &ResyncRequest { authoritative_site }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::common::ErrorKind;
    use crate::api::testing::forbid_all_requests;

    #[tokio::test]
    async fn test_hard_failover_gates_send_nothing() {
        let mut server = mockito::Server::new_async().await;
        let forbidden = forbid_all_requests(&mut server).await;
        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();

        let cases = [
            (None, false, vec!["--site", "--confirm"]),
            (None, true, vec!["--site"]),
            (Some(DrpSite::Secondary), false, vec!["--confirm"]),
        ];
        for (site, confirm, expected) in cases {
            let err = client
                .drp_hard_failover("srv-1", site, confirm)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Precondition);
            let message = err.to_string();
            for flag in expected {
                assert!(message.contains(flag), "{message} should name {flag}");
            }
        }

        for mock in forbidden {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_resync_without_confirm_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let forbidden = forbid_all_requests(&mut server).await;
        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();

        let err = client
            .drp_resync("srv-1", Some(DrpSite::Primary), false)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Precondition(_)));

        for mock in forbidden {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_hard_failover_confirmed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v2/compute/servers/srv-1/drp/failover/hard")
            .match_body(mockito::Matcher::Json(serde_json::json!({"site": "secondary"})))
            .with_body(r#"{"message":"Failover started"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let result = client
            .drp_hard_failover("srv-1", Some(DrpSite::Secondary), true)
            .await
            .unwrap();
        assert_eq!(result.summary(), Some("Failover started"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resync_body_names_authoritative_site() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v2/compute/servers/srv-1/drp/resync")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"authoritative_site": "primary"}),
            ))
            .with_body("")
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        client
            .drp_resync("srv-1", Some(DrpSite::Primary), true)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_status_tolerates_missing_fields() {
        let status: DrpStatus = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(status.enabled);
        assert!(status.active_site.is_none());
    }
}
