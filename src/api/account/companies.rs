//
//  titan-cli
//  api/account/companies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::ApiError;
use crate::util::encode_segment;

use super::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub oid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub vat: Option<String>,
}

impl TitanClient {
    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get("/v2/companies").await
    }

    pub async fn get_company(&self, oid: &str) -> Result<Company, ApiError> {
        self.get(&format!("/v2/companies/{}", encode_segment(oid))).await
    }

    pub async fn list_company_users(&self, oid: &str) -> Result<Vec<User>, ApiError> {
        self.get(&format!("/v2/companies/{}/users", encode_segment(oid))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    #[tokio::test]
    async fn test_list_company_users() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/companies/cmp-1/users")
            .with_body(r#"[{"oid":"u1","email":"a@example.com","role":"admin"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let users = client.list_company_users("cmp-1").await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role.as_deref(), Some("admin"));
        mock.assert_async().await;
    }
}
