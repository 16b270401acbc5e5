//
//  titan-cli
//  api/compute/pnat.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Port NAT rules, forwarding a public port to a port on the server.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError};
use crate::util::encode_segment;

use super::Protocol;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnatRule {
    pub protocol: Protocol,

    /// Public port.
    pub from: u16,

    /// Port on the server.
    pub to: u16,

    /// Public address the rule listens on, when the server has several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

fn pnat_path(server_oid: &str) -> String {
    format!("/v2/compute/servers/{}/pnat", encode_segment(server_oid))
}

impl TitanClient {
    pub async fn list_pnat_rules(&self, server_oid: &str) -> Result<Vec<PnatRule>, ApiError> {
        self.get(&pnat_path(server_oid)).await
    }

    pub async fn add_pnat_rule(
        &self,
        server_oid: &str,
        rule: &PnatRule,
    ) -> Result<ActionResult, ApiError> {
        self.post(&pnat_path(server_oid), rule).await
    }

    pub async fn delete_pnat_rule(
        &self,
        server_oid: &str,
        rule: &PnatRule,
    ) -> Result<ActionResult, ApiError> {
        self.delete_with(&pnat_path(server_oid), rule).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_omits_missing_ip() {
        let rule = PnatRule {
            protocol: Protocol::Tcp,
            from: 2222,
            to: 22,
            ip: None,
        };
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            serde_json::json!({"protocol": "tcp", "from": 2222, "to": 22})
        );
    }
}
