//
//  titan-cli
//  api/compute/templates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Operating system templates servers are installed from.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::ApiError;
use crate::util::encode_segment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub oid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub os: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Minimum disk size in GB.
    #[serde(default)]
    pub min_disk: Option<u32>,

    #[serde(default)]
    pub available: Option<bool>,
}

impl TitanClient {
    pub async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.get("/v2/compute/templates").await
    }

    pub async fn get_template(&self, oid: &str) -> Result<Template, ApiError> {
        self.get(&format!("/v2/compute/templates/{}", encode_segment(oid))).await
    }
}
