//
//  titan-cli
//  api/account/history.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Audit history of actions taken on the account.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ApiError, FlexTimestamp};
use crate::util::query_string;

/// Default number of events per page.
pub const DEFAULT_HISTORY_SIZE: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    #[serde(default)]
    pub oid: Option<String>,

    #[serde(default)]
    pub action: String,

    /// Email of the user who triggered the event.
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub server_oid: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub created_at: FlexTimestamp,
}

/// Which slice of the history to fetch. Pages start at 1.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub page: u32,
    pub size: u32,
    pub server_oid: Option<String>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_HISTORY_SIZE,
            server_oid: None,
        }
    }
}

impl HistoryQuery {
    fn to_path(&self) -> String {
        let page = self.page.max(1).to_string();
        let size = self.size.max(1).to_string();
        let query = query_string(&[
            ("page", Some(page.as_str())),
            ("size", Some(size.as_str())),
            ("server_oid", self.server_oid.as_deref()),
        ]);
        format!("/v2/history{}", query)
    }
}

impl TitanClient {
    pub async fn list_history(&self, query: &HistoryQuery) -> Result<Vec<HistoryEvent>, ApiError> {
        self.get(&query.to_path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_path() {
        assert_eq!(HistoryQuery::default().to_path(), "/v2/history?page=1&size=20");

        let query = HistoryQuery {
            page: 0,
            size: 50,
            server_oid: Some("srv-1".to_string()),
        };
        assert_eq!(query.to_path(), "/v2/history?page=1&size=50&server_oid=srv-1");
    }
}
