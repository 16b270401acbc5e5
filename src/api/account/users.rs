//
//  titan-cli
//  api/account/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ApiError, FlexTimestamp};

/// A user account, either the caller or a member of a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub oid: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    /// Role inside the company, only set when listed through a company.
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub company_oid: Option<String>,

    #[serde(default)]
    pub last_login: FlexTimestamp,
}

impl User {
    /// First and last name joined, or the email when neither is set.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

impl TitanClient {
    /// The user owning the API token.
    pub async fn get_user(&self) -> Result<User, ApiError> {
        self.get("/v2/auth/user").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(r#"{"oid":"u1","email":"ops@example.com"}"#).unwrap();
        assert_eq!(user.display_name(), "ops@example.com");

        let user: User = serde_json::from_str(
            r#"{"oid":"u1","email":"ops@example.com","firstname":"Ada","lastname":"Lovelace","last_login":1700000000}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert!(user.last_login.is_set());
    }
}
