//
//  titan-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Titan control plane API.
//!
//! ## API Generations
//!
//! - **Legacy**: resources addressed by UUID under `/compute/...`
//! - **Current**: resources addressed by OID under `/v2/...`
//!
//! Both generations share one transport and one error envelope.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use titan_cli::api::{ClientConfig, TitanClient};
//! use titan_cli::api::common::ResourceId;
//!
//! # async fn example() -> Result<(), titan_cli::api::ApiError> {
//! let client = TitanClient::new(ClientConfig::new("https://api.example.com", "token"))?;
//! let server = client.get_server(&ResourceId::Oid("srv-1".into())).await?;
//! println!("{} is {}", server.name, server.state);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`], whose [`kind`](ApiError::kind) is one of:
//!
//! - `Transport`: the exchange could not be completed
//! - `Decode`: the response matched no expected shape
//! - `Business`: the API rejected the request, see [`ApiReturn`]
//! - `Precondition`: rejected locally, nothing was sent

/// Core HTTP transport.
///
/// Provides the [`TitanClient`] struct which handles:
/// - Authentication and client identification headers
/// - Request body encoding
/// - Response classification
pub mod client;

/// Shared types: error taxonomy, envelope, classifier, identifiers.
pub mod common;

/// Servers, snapshots, networks, firewall, PNAT, IPs, templates, DRP.
pub mod compute;

/// User, companies, subscriptions, API tokens, SSH keys, history.
pub mod account;

pub use client::{ClientConfig, TitanClient};
pub use common::{ApiError, ApiReturn, ErrorKind};

#[cfg(test)]
pub(crate) mod testing {
    use mockito::{Matcher, Mock, ServerGuard};

    /// Registers mocks that fail their assertion if any request reaches the server.
    pub async fn forbid_all_requests(server: &mut ServerGuard) -> Vec<Mock> {
        let mut mocks = Vec::new();
        for method in ["GET", "PUT", "POST", "DELETE"] {
            mocks.push(
                server
                    .mock(method, Matcher::Any)
                    .expect(0)
                    .create_async()
                    .await,
            );
        }
        mocks
    }
}
