//
//  titan-cli
//  api/account/ssh_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError};
use crate::util::encode_segment;

/// A public key installed on servers at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKey {
    /// Key name, also its identifier.
    #[serde(default, alias = "name")]
    pub title: String,

    #[serde(default)]
    pub value: String,
}

impl SshKey {
    /// Key type and a shortened body, e.g. `ssh-ed25519 AAAAC3Nz...Zk9x`.
    pub fn short_value(&self) -> String {
        let mut parts = self.value.split_whitespace();
        let kind = parts.next().unwrap_or_default();
        let body = parts.next().unwrap_or_default();
        let chars: Vec<char> = body.chars().collect();
        if chars.len() <= 16 {
            return format!("{} {}", kind, body).trim().to_string();
        }
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{} {}...{}", kind, head, tail)
    }
}

impl TitanClient {
    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>, ApiError> {
        self.get("/v2/auth/user/ssh-keys").await
    }

    pub async fn add_ssh_key(&self, key: &SshKey) -> Result<ActionResult, ApiError> {
        self.post("/v2/auth/user/ssh-keys", key).await
    }

    pub async fn delete_ssh_key(&self, name: &str) -> Result<ActionResult, ApiError> {
        let path = format!("/v2/auth/user/ssh-keys/{}", encode_segment(name));
        self.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    #[test]
    fn test_short_value() {
        let key = SshKey {
            title: "laptop".to_string(),
            value: "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGZk9x me@host".to_string(),
        };
        assert_eq!(key.short_value(), "ssh-ed25519 AAAAC3Nz...Zk9x");
    }

    #[tokio::test]
    async fn test_add_accepts_echoed_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/auth/user/ssh-keys")
            .with_body(r#"{"title":"laptop","value":"ssh-ed25519 AAAA"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let key = SshKey {
            title: "laptop".to_string(),
            value: "ssh-ed25519 AAAA".to_string(),
        };
        let result = client.add_ssh_key(&key).await.unwrap();
        assert!(result.summary().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_escapes_key_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v2/auth/user/ssh-keys/my%20key")
            .with_body(r#"{"success":"Key removed"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let result = client.delete_ssh_key("my key").await.unwrap();
        assert_eq!(result.summary(), Some("Key removed"));
        mock.assert_async().await;
    }
}
