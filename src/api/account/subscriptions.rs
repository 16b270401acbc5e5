//
//  titan-cli
//  api/account/subscriptions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ApiError, FlexTimestamp};
use crate::util::encode_segment;

/// A billing subscription, grouping the servers bought under one offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub oid: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub company_oid: Option<String>,

    /// OIDs of the servers covered.
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default)]
    pub created_at: FlexTimestamp,

    /// End of the commitment period, unset for open-ended subscriptions.
    #[serde(default)]
    pub ends_at: FlexTimestamp,
}

impl TitanClient {
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.get("/v2/subscriptions").await
    }

    pub async fn get_subscription(&self, oid: &str) -> Result<Subscription, ApiError> {
        self.get(&format!("/v2/subscriptions/{}", encode_segment(oid))).await
    }
}
