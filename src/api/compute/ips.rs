//
//  titan-cli
//  api/compute/ips.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Public IP addresses owned by a company and attachable to servers.

use serde::{Deserialize, Serialize};

use crate::api::client::TitanClient;
use crate::api::common::{ActionResult, ApiError};
use crate::util::{encode_segment, query_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ip {
    pub ip: String,

    #[serde(default)]
    pub version: Option<u8>,

    #[serde(default)]
    pub reverse: Option<String>,

    /// Server currently holding the address, if any.
    #[serde(default)]
    pub server_oid: Option<String>,

    #[serde(default)]
    pub company_oid: Option<String>,
}

#[derive(Debug, Serialize)]
struct AttachRequest<'a> {
    server_oid: &'a str,
}

impl TitanClient {
    /// Lists public addresses, optionally restricted to one company.
    pub async fn list_ips(&self, company_oid: Option<&str>) -> Result<Vec<Ip>, ApiError> {
        let query = query_string(&[("company_oid", company_oid)]);
        self.get(&format!("/v2/compute/ips{}", query)).await
    }

    pub async fn attach_ip(&self, ip: &str, server_oid: &str) -> Result<ActionResult, ApiError> {
        let path = format!("/v2/compute/ips/{}/attach", encode_segment(ip));
        self.put(&path, &AttachRequest { server_oid }).await
    }

    pub async fn detach_ip(&self, ip: &str) -> Result<ActionResult, ApiError> {
        let path = format!("/v2/compute/ips/{}/detach", encode_segment(ip));
        self.put_empty(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    #[tokio::test]
    async fn test_list_ips_with_company_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/compute/ips")
            .match_query(mockito::Matcher::UrlEncoded(
                "company_oid".to_string(),
                "cmp-1".to_string(),
            ))
            .with_body(r#"[{"ip":"192.0.2.10","version":4,"server_oid":"srv-1"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let ips = client.list_ips(Some("cmp-1")).await.unwrap();
        assert_eq!(ips[0].server_oid.as_deref(), Some("srv-1"));
        mock.assert_async().await;
    }
}
