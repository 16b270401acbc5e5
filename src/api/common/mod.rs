//
//  titan-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Titan control plane
//!
//! This module provides the types shared by every endpoint: the error taxonomy,
//! the error envelope returned by both API generations, the response classifier
//! and the identifier types used to pick between the legacy and current API.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type, one variant family per failure kind
//! - [`ApiReturn`] - The JSON error envelope (legacy and current shapes)
//! - [`Classified`] - Result of classifying a response body
//! - [`ApiGeneration`] / [`ResourceId`] - OID vs UUID addressing
//! - [`FlexTimestamp`] - Timestamps encoded as numbers or strings
//!
//! # Example
//!
//! ```rust
//! use titan_cli::api::common::{classify, Classified};
//! use serde_json::Value;
//!
//! let body = br#"{"error":"ERROR_VALIDATION","data":[{"field":"name","value":""}]}"#;
//! match classify::<Value>(body) {
//!     Classified::Business(envelope) => assert!(envelope.message().contains("name")),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Notes
//!
//! The API reuses HTTP 200 for validation failures, so the status code alone
//! cannot tell success from rejection. The envelope is always inspected first.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::encode_segment;

mod timestamp;

pub use timestamp::*;

/// Error title the API uses when a server already holds its maximum number of snapshots.
pub const SNAPSHOT_LIMIT_EXCEEDED: &str = "ERROR_SNAPSHOT_LIMIT_EXCEEDED";

/// The four kinds of failure a command can end with.
///
/// | Kind | Cause | Network touched |
/// |------|-------|-----------------|
/// | `Transport` | connection, DNS, TLS, body read, request encoding | maybe |
/// | `Decode` | response matched no expected JSON shape | yes |
/// | `Business` | the API understood and rejected the request | yes |
/// | `Precondition` | invalid input caught locally | never |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Decode,
    Business,
    Precondition,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::Business => "api",
            ErrorKind::Precondition => "precondition",
        };
        f.write_str(name)
    }
}

/// Unified error type for all Titan API operations.
///
/// Every error that reaches a command handler is one of these variants, and
/// [`ApiError::kind`] maps it onto the four-way [`ErrorKind`] taxonomy.
/// Rendering an error never changes its kind.
///
/// # Example
///
/// ```rust
/// use titan_cli::api::common::{ApiError, ErrorKind};
///
/// let err = ApiError::precondition("either --oid or --uuid is required");
/// assert_eq!(err.kind(), ErrorKind::Precondition);
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP exchange could not be completed.
    ///
    /// Covers connection failures, DNS resolution, TLS errors and failures
    /// while reading the response body. Never retried.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request body could not be encoded as JSON.
    ///
    /// Raised before the request is built, so nothing is sent.
    #[error("Could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body did not match the expected JSON shape.
    #[error("Malformed response: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The API explicitly rejected the request.
    ///
    /// Carries the decoded envelope so callers can inspect the title,
    /// e.g. to recognise [`SNAPSHOT_LIMIT_EXCEEDED`].
    #[error("{0}")]
    Api(ApiReturn),

    /// The API answered in a way that contradicts an earlier answer.
    ///
    /// Raised by snapshot rotation when a limit-exceeded error is followed by
    /// an empty snapshot list.
    #[error("Inconsistent API state: {0}")]
    Inconsistent(String),

    /// The invocation was rejected locally, before any network call.
    #[error("{0}")]
    Precondition(String),

    /// The operator declined an interactive confirmation.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// Builds a [`ApiError::Precondition`] from any message.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Returns the taxonomy kind of this error.
    ///
    /// Request-encoding failures count as transport errors: the request could
    /// not be completed. Inconsistent answers count as decode errors. A
    /// cancelled confirmation counts as a precondition failure since no
    /// remote mutation took place.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::Encode(_) => ErrorKind::Transport,
            ApiError::Malformed(_) | ApiError::Inconsistent(_) => ErrorKind::Decode,
            ApiError::Api(_) => ErrorKind::Business,
            ApiError::Precondition(_) | ApiError::Cancelled => ErrorKind::Precondition,
        }
    }

    /// Returns the envelope when this is a business error.
    pub fn envelope(&self) -> Option<&ApiReturn> {
        match self {
            ApiError::Api(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Checks whether this is a business error with the given title or legacy code.
    pub fn is_api_error(&self, title: &str) -> bool {
        self.envelope().is_some_and(|e| e.has_code(title))
    }
}

/// One field-level validation failure from the current API envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the offending request field.
    #[serde(default)]
    pub field: String,

    /// The rejected value, as sent back by the API.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}

/// The error envelope returned by both API generations.
///
/// Two shapes exist and both decode into this struct:
///
/// ```json
/// {"success": "...", "error": "..."}
/// ```
///
/// ```json
/// {"error": "ERROR_VALIDATION", "message": "...", "data": [{"field": "name", "value": ""}]}
/// ```
///
/// Unknown fields are ignored. `data` is kept as a raw value because success
/// payloads also use that key for unrelated content; only an array of objects
/// is read as a validation list.
///
/// # Invariant
///
/// [`ApiReturn::is_error`] is true only when the title is non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiReturn {
    /// Error title (current API) or error string (legacy API).
    #[serde(default)]
    pub error: Option<String>,

    /// Success message (legacy API).
    #[serde(default)]
    pub success: Option<String>,

    /// Human readable message (current API).
    #[serde(default)]
    pub message: Option<String>,

    /// Legacy status code, sent by the previous API generation alongside `error`.
    ///
    /// Older deployments send it as a number, newer ones as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,

    /// Validation details (current API), or any payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiReturn {
    /// Returns true when the envelope reports a rejection.
    pub fn is_error(&self) -> bool {
        self.title().is_some()
    }

    /// Returns the non-empty error title, if any.
    pub fn title(&self) -> Option<&str> {
        self.error.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Matches either the title or the legacy status code against `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.title() == Some(code) || self.legacy_code().as_deref() == Some(code)
    }

    /// The legacy status code rendered as a string.
    pub fn legacy_code(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Extracts field-level validation errors from `data`.
    ///
    /// Returns an empty list when `data` is absent or is not an array of
    /// `{field, value}` objects.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        match &self.data {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter(|item| item.get("field").is_some())
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Builds the single human message for this envelope.
    ///
    /// Validation entries are rendered as `field: value` pairs joined by `; `.
    /// Falls back to the message, then to the title.
    pub fn message(&self) -> String {
        let details: Vec<String> = self
            .validation_errors()
            .iter()
            .map(ToString::to_string)
            .collect();

        let base = self
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.title())
            .unwrap_or("unknown API error");

        if details.is_empty() {
            base.to_string()
        } else {
            format!("{}: {}", base, details.join("; "))
        }
    }
}

impl fmt::Display for ApiReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title() {
            Some(title) if self.message.as_deref().is_some_and(|m| !m.is_empty())
                || !self.validation_errors().is_empty() =>
            {
                write!(f, "{} ({})", self.message(), title)
            }
            _ => f.write_str(&self.message()),
        }
    }
}

/// Outcome of classifying a response body.
#[derive(Debug)]
pub enum Classified<T> {
    /// The envelope carried no error and the payload decoded.
    Success(T),
    /// The envelope carried an error title. The payload was not decoded.
    Business(ApiReturn),
    /// No error title, but the payload did not decode as `T`.
    Malformed(serde_json::Error),
}

impl<T> Classified<T> {
    /// Collapses the classification into a `Result`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Classified::Success(value) => Ok(value),
            Classified::Business(envelope) => Err(ApiError::Api(envelope)),
            Classified::Malformed(err) => Err(ApiError::Malformed(err)),
        }
    }
}

/// Reads the error envelope out of a body, if it has one.
///
/// Bodies that are not JSON objects (arrays, scalars, empty bodies) carry no
/// envelope and yield `None`.
pub fn envelope_of(bytes: &[u8]) -> Option<ApiReturn> {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()
        .filter(serde_json::Value::is_object)
        .and_then(|value| serde_json::from_value::<ApiReturn>(value).ok())
        .filter(ApiReturn::is_error)
}

/// Classifies a response body in two phases.
///
/// 1. Try the error envelope. A non-empty title is a business error and the
///    success payload is never decoded.
/// 2. Otherwise decode the same bytes as `T`. Failure is a malformed response.
pub fn classify<T: DeserializeOwned>(bytes: &[u8]) -> Classified<T> {
    if let Some(envelope) = envelope_of(bytes) {
        return Classified::Business(envelope);
    }

    match serde_json::from_slice(bytes) {
        Ok(value) => Classified::Success(value),
        Err(err) => Classified::Malformed(err),
    }
}

/// The two coexisting API generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiGeneration {
    /// Previous generation, addresses resources by UUID.
    Legacy,
    /// Current generation, addresses resources by OID.
    Current,
}

impl ApiGeneration {
    /// Root path of the server collection for this generation.
    pub fn servers_root(self) -> &'static str {
        match self {
            ApiGeneration::Legacy => "/compute/servers",
            ApiGeneration::Current => "/v2/compute/servers",
        }
    }
}

/// An identifier in one of the two schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    Oid(String),
    Uuid(String),
}

impl ResourceId {
    /// Picks the identifier from a pair of mutually exclusive flags.
    ///
    /// Exactly one of `oid` and `uuid` must be set (and non-empty); anything
    /// else is a precondition error and nothing is sent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use titan_cli::api::common::ResourceId;
    ///
    /// let id = ResourceId::from_flags(Some("srv-1"), None).unwrap();
    /// assert_eq!(id, ResourceId::Oid("srv-1".to_string()));
    /// assert!(ResourceId::from_flags(Some("a"), Some("b")).is_err());
    /// assert!(ResourceId::from_flags(None, None).is_err());
    /// ```
    pub fn from_flags(oid: Option<&str>, uuid: Option<&str>) -> Result<Self, ApiError> {
        let oid = oid.map(str::trim).filter(|s| !s.is_empty());
        let uuid = uuid.map(str::trim).filter(|s| !s.is_empty());

        match (oid, uuid) {
            (Some(oid), None) => Ok(ResourceId::Oid(oid.to_string())),
            (None, Some(uuid)) => Ok(ResourceId::Uuid(uuid.to_string())),
            (Some(_), Some(_)) => Err(ApiError::precondition(
                "--oid and --uuid are mutually exclusive, supply only one",
            )),
            (None, None) => Err(ApiError::precondition("either --oid or --uuid is required")),
        }
    }

    /// The API generation this identifier belongs to.
    pub fn generation(&self) -> ApiGeneration {
        match self {
            ResourceId::Oid(_) => ApiGeneration::Current,
            ResourceId::Uuid(_) => ApiGeneration::Legacy,
        }
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceId::Oid(id) | ResourceId::Uuid(id) => id,
        }
    }

    /// Path of the server this identifier designates.
    pub fn server_path(&self) -> String {
        format!(
            "{}/{}",
            self.generation().servers_root(),
            encode_segment(self.as_str())
        )
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement returned by action endpoints.
///
/// Action endpoints answer with the legacy `{"success": "..."}` shape, the
/// current `{"message": "..."}` shape, or an empty body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub success: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResult {
    /// Human summary of the acknowledgement, if the API sent one.
    pub fn summary(&self) -> Option<&str> {
        self.message.as_deref().or(self.success.as_deref())
    }
}

/// A quantity with its unit, e.g. a snapshot size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Size {
    #[serde(default)]
    pub value: f64,

    #[serde(default)]
    pub unit: String,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
