//
//  titan-cli
//  api/compute/firewall.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-server firewall rules.
//!
//! A rule is identified by its full content: removal sends the same
//! `{protocol, port, source}` triple that was used to add it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError};
use crate::util::encode_segment;

/// Transport protocols accepted by firewall and PNAT rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        })
    }
}

/// An inbound allow rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub protocol: Protocol,

    /// A port (`22`) or a range (`8000-8100`).
    pub port: String,

    /// Source address or CIDR, `0.0.0.0/0` for any.
    #[serde(default = "any_source")]
    pub source: String,
}

fn any_source() -> String {
    "0.0.0.0/0".to_string()
}

/// Rules plus the default policy applied to unmatched traffic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirewallRules {
    #[serde(default)]
    pub policy: Option<String>,

    #[serde(default)]
    pub rules: Vec<FirewallRule>,
}

fn firewall_path(server_oid: &str) -> String {
    format!("/v2/compute/servers/{}/firewall", encode_segment(server_oid))
}

impl TitanClient {
    pub async fn list_firewall_rules(&self, server_oid: &str) -> Result<FirewallRules, ApiError> {
        self.get(&firewall_path(server_oid)).await
    }

    pub async fn add_firewall_rule(
        &self,
        server_oid: &str,
        rule: &FirewallRule,
    ) -> Result<ActionResult, ApiError> {
        self.post(&firewall_path(server_oid), rule).await
    }

    pub async fn delete_firewall_rule(
        &self,
        server_oid: &str,
        rule: &FirewallRule,
    ) -> Result<ActionResult, ApiError> {
        self.delete_with(&firewall_path(server_oid), rule).await
    }
}
