//
//  titan-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Titan API
//!
//! This module provides the transport for every API call. It builds one HTTP
//! request per call, injects the authentication and client identification
//! headers, and hands the raw body to the classifier in [`crate::api::common`].
//!
//! ## Features
//!
//! - Explicit [`ClientConfig`] value, built once per invocation
//! - `X-API-KEY`, `X-Client-OS` and `X-Client-Version` headers on every request
//! - Request bodies encoded before any socket activity
//! - 4xx/5xx bodies returned for classification instead of failing early
//! - No retries: exactly one round trip per call

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::common::{classify, envelope_of, ApiError, ApiReturn};

/// Header carrying the API token.
pub const HEADER_API_KEY: &str = "X-API-KEY";

/// Header carrying the client operating system.
pub const HEADER_CLIENT_OS: &str = "X-Client-OS";

/// Header carrying the client version.
pub const HEADER_CLIENT_VERSION: &str = "X-Client-Version";

/// Base URI used when neither the environment nor the config file sets one.
pub const DEFAULT_BASE_URI: &str = "https://api.titan.nbs-system.com";

/// Connection settings for one invocation.
///
/// Built once at startup from flags, environment and config file, then owned
/// by the [`TitanClient`]. Never mutated afterwards.
///
/// # Example
///
/// ```rust
/// use titan_cli::api::client::ClientConfig;
///
/// let config = ClientConfig::new("https://api.example.com/", "secret");
/// assert_eq!(config.base_uri, "https://api.example.com");
/// assert_eq!(config.client_version, titan_cli::VERSION);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, without trailing slash.
    pub base_uri: String,
    /// The API token sent in [`HEADER_API_KEY`].
    pub token: String,
    /// Reported in [`HEADER_CLIENT_VERSION`].
    pub client_version: String,
    /// Reported in [`HEADER_CLIENT_OS`].
    pub client_os: String,
}

impl ClientConfig {
    /// Creates a configuration with this build's version and OS.
    pub fn new(base_uri: impl Into<String>, token: impl Into<String>) -> Self {
        let base_uri: String = base_uri.into();
        Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            token: token.into(),
            client_version: crate::VERSION.to_string(),
            client_os: std::env::consts::OS.to_string(),
        }
    }
}

/// The raw outcome of one completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub bytes: Vec<u8>,
}

/// The HTTP client for the Titan API.
///
/// Every resource method in [`crate::api::compute`] and [`crate::api::account`]
/// is implemented on this type and funnels through [`TitanClient::send`].
///
/// # Example
///
/// ```rust,no_run
/// use titan_cli::api::client::{ClientConfig, TitanClient};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = TitanClient::new(ClientConfig::new("https://api.example.com", "token"))?;
/// let servers = client.list_servers().await?;
/// println!("{} servers", servers.len());
/// # Ok(())
/// # }
/// ```
pub struct TitanClient {
    http: Client,
    config: ClientConfig,
}

impl TitanClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("titan/{}", config.client_version))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL for an API-relative path. The path is used verbatim.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_uri, path)
    }

    /// Performs one HTTP round trip.
    ///
    /// The status code is not interpreted here: any completed exchange
    /// returns its body. Only connection, TLS or body-read failures are
    /// errors.
    ///
    /// # Parameters
    ///
    /// * `method` - GET, PUT, POST or DELETE
    /// * `path` - API-relative path, already escaped, with any query string
    /// * `body` - Pre-encoded JSON body, see [`encode_body`]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(HEADER_API_KEY, &self.config.token)
            .header(HEADER_CLIENT_OS, &self.config.client_os)
            .header(HEADER_CLIENT_VERSION, &self.config.client_version)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();
        debug!(%method, %url, %status, len = bytes.len(), "received response");

        Ok(RawResponse { status, bytes })
    }

    /// Sends a request and classifies the response into `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let raw = self.send(method, path, body).await?;
        decode(&raw)
    }

    /// GET `path` and decode the response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path` and decode the response.
    ///
    /// # Errors
    ///
    /// An unencodable body fails with [`ApiError::Encode`] before the request
    /// is built.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.call(Method::POST, path, Some(body)).await
    }

    /// PUT `body` as JSON to `path` and decode the response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.call(Method::PUT, path, Some(body)).await
    }

    /// PUT to `path` without a body.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::PUT, path, None).await
    }

    /// DELETE `path` and decode the response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::DELETE, path, None).await
    }

    /// DELETE `path` with a JSON body, used by rule removal endpoints.
    pub async fn delete_with<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.call(Method::DELETE, path, Some(body)).await
    }
}

/// Encodes a request body to JSON.
///
/// # Errors
///
/// Returns [`ApiError::Encode`] when `body` cannot be represented as JSON,
/// e.g. a map with non-string keys.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(ApiError::Encode)
}

/// Classifies a raw response into `T`.
///
/// The envelope decides first. A non-2xx status without an envelope becomes a
/// business error titled `HTTP_<code>` carrying the body text. An empty 2xx
/// body decodes as `{}` so acknowledgement types default cleanly while list
/// types still fail as malformed.
pub fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, ApiError> {
    if let Some(envelope) = envelope_of(&raw.bytes) {
        return Err(ApiError::Api(envelope));
    }

    if !raw.status.is_success() {
        let text = String::from_utf8_lossy(&raw.bytes).trim().to_string();
        return Err(ApiError::Api(ApiReturn {
            error: Some(format!("HTTP_{}", raw.status.as_u16())),
            message: Some(if text.is_empty() {
                raw.status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            } else {
                text
            }),
            ..Default::default()
        }));
    }

    if raw.bytes.iter().all(u8::is_ascii_whitespace) {
        return classify(b"{}").into_result();
    }

    classify(&raw.bytes).into_result()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::api::common::{ActionResult, ErrorKind};

    fn client_for(server: &mockito::ServerGuard) -> TitanClient {
        TitanClient::new(ClientConfig::new(server.url(), "test-token")).unwrap()
    }

    #[tokio::test]
    async fn test_headers_are_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/ping")
            .match_header("x-api-key", "test-token")
            .match_header("x-client-os", std::env::consts::OS)
            .match_header("x-client-version", crate::VERSION)
            .match_header("content-type", "application/json")
            .with_body(r#"{"message":"pong"}"#)
            .expect(1)
            .create_async()
            .await;

        let result: ActionResult = client_for(&server).get("/v2/ping").await.unwrap();
        assert_eq!(result.summary(), Some("pong"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_body_is_classified() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/missing")
            .with_status(404)
            .with_body(r#"{"error":"ERROR_NOT_FOUND","message":"no such server"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .get::<ActionResult>("/v2/missing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Business);
        assert!(err.is_api_error("ERROR_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_error_status_without_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/broken")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = client_for(&server)
            .get::<ActionResult>("/v2/broken")
            .await
            .unwrap_err();
        assert!(err.is_api_error("HTTP_502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_validation_error_on_200() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v2/compute/networks")
            .with_status(200)
            .with_body(r#"{"error":"ERROR_VALIDATION","data":[{"field":"name","value":""}]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .post::<ActionResult, _>("/v2/compute/networks", &serde_json::json!({"name": ""}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Business);
        assert!(err.to_string().contains("name: \"\""));
    }

    #[tokio::test]
    async fn test_unencodable_body_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut body = HashMap::new();
        body.insert((1, 2), "tuple keys are not valid JSON object keys");

        let err = client_for(&server)
            .post::<ActionResult, _>("/v2/anything", &body)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Encode(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport() {
        let client = TitanClient::new(ClientConfig::new("http://127.0.0.1:9", "t")).unwrap();
        let err = client.get::<ActionResult>("/v2/ping").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_empty_body_defaults_action_result() {
        let raw = RawResponse {
            status: StatusCode::NO_CONTENT,
            bytes: Vec::new(),
        };
        let result: ActionResult = decode(&raw).unwrap();
        assert!(result.summary().is_none());

        let err = decode::<Vec<ActionResult>>(&raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = TitanClient::new(ClientConfig::new("https://api.example.com/", "t")).unwrap();
        assert_eq!(
            client.url("/v2/compute/servers?page=1"),
            "https://api.example.com/v2/compute/servers?page=1"
        );
    }
}
