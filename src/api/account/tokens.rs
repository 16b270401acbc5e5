//
//  titan-cli
//  api/account/tokens.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Personal API tokens.
//!
//! The secret value is only returned once, in the answer to
//! [`TitanClient::create_api_token`]. Listings carry metadata only.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError, FlexTimestamp};
use crate::util::encode_segment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    #[serde(default)]
    pub oid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub created_at: FlexTimestamp,

    #[serde(default)]
    pub expire: FlexTimestamp,

    #[serde(default)]
    pub last_use: FlexTimestamp,

    /// Secret value, present only right after creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Body of `POST /v2/auth/user/tokens`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiTokenRequest {
    pub name: String,

    /// Expiry as a Unix timestamp in seconds.
    pub expire: i64,
}

impl TitanClient {
    pub async fn list_api_tokens(&self) -> Result<Vec<ApiToken>, ApiError> {
        self.get("/v2/auth/user/tokens").await
    }

    pub async fn create_api_token(
        &self,
        request: &CreateApiTokenRequest,
    ) -> Result<ApiToken, ApiError> {
        self.post("/v2/auth/user/tokens", request).await
    }

    pub async fn delete_api_token(&self, oid: &str) -> Result<ActionResult, ApiError> {
        self.delete(&format!("/v2/auth/user/tokens/{}", encode_segment(oid))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    #[tokio::test]
    async fn test_create_token_returns_secret_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/auth/user/tokens")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"name": "ci", "expire": 1800000000}),
            ))
            .with_body(r#"{"oid":"tok-1","name":"ci","expire":"1800000000","token":"s3cr3t"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let token = client
            .create_api_token(&CreateApiTokenRequest {
                name: "ci".to_string(),
                expire: 1_800_000_000,
            })
            .await
            .unwrap();
        assert_eq!(token.token.as_deref(), Some("s3cr3t"));
        assert_eq!(token.expire.seconds(), Some(1_800_000_000));
        mock.assert_async().await;
    }
}
