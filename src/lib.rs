//
//  titan-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Titan CLI Library
//!
//! A command-line interface library for the Titan cloud control plane.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `titan` CLI tool:
//! a typed HTTP client for both generations of the Titan API, snapshot
//! rotation, and the commands built on top of them.
//!
//! ## Features
//!
//! - **Two API Generations**: legacy UUID addressing and current OID addressing
//!   behind one client
//! - **Strict Error Taxonomy**: transport, malformed response, API rejection and
//!   local precondition failures stay distinct down to the exit code
//! - **Snapshot Rotation**: opt-in eviction of the oldest snapshot when a
//!   server reaches its quota
//! - **Guarded Destructive Operations**: DRP hard failover, resync and network
//!   DRP disable never run without explicit confirmation
//! - **Interactive & Scriptable**: coloured tables, or JSON with `--json`
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client, error envelope and resource endpoints
//! - [`config`]: Configuration file and connection settings
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Confirmation and secret prompts
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use titan_cli::api::TitanClient;
//! use titan_cli::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?.resolve(None, None)?;
//! let client = TitanClient::new(config)?;
//! for server in client.list_servers().await? {
//!     println!("{} {}", server.id(), server.name);
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// API client for the Titan control plane.
///
/// The client handles authentication headers, body encoding and response
/// classification for every endpoint.
pub mod api;

/// Configuration file management.
///
/// Reads and writes `~/.titan/config` and resolves the token and base URI
/// from flags, environment and file.
pub mod config;

/// Output formatting for different modes.
///
/// - Table format: Human-readable tables for interactive use
/// - JSON format: Structured output for scripting and automation
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

pub mod util;

pub use cli::Cli;

pub use config::Config;

/// Binary name, used in completions and messages.
pub const APP_NAME: &str = "titan";

/// Version of this build, sent to the API in `X-Client-Version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes.
///
/// Each error kind has its own code so scripts can tell a network problem
/// from a rejected request.
pub mod exit_codes {
    use crate::api::common::{ApiError, ErrorKind};

    pub const SUCCESS: i32 = 0;

    /// Connection, DNS, TLS or request encoding failure.
    pub const TRANSPORT: i32 = 1;

    /// Invalid invocation, caught before any network call.
    pub const USAGE: i32 = 2;

    /// The response matched no expected shape.
    pub const MALFORMED: i32 = 3;

    /// The API rejected the request.
    pub const API_ERROR: i32 = 8;

    /// The operator declined a confirmation.
    pub const CANCELLED: i32 = 16;

    /// Exit code for an API layer error.
    pub fn for_api_error(err: &ApiError) -> i32 {
        if matches!(err, ApiError::Cancelled) {
            return CANCELLED;
        }
        match err.kind() {
            ErrorKind::Transport => TRANSPORT,
            ErrorKind::Decode => MALFORMED,
            ErrorKind::Business => API_ERROR,
            ErrorKind::Precondition => USAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::exit_codes::*;
    use crate::api::common::{ApiError, ApiReturn};

    #[test]
    fn test_exit_codes_follow_error_kind() {
        assert_eq!(for_api_error(&ApiError::precondition("x")), USAGE);
        assert_eq!(for_api_error(&ApiError::Cancelled), CANCELLED);
        assert_eq!(for_api_error(&ApiError::Inconsistent("x".into())), MALFORMED);
        assert_eq!(for_api_error(&ApiError::Api(ApiReturn::default())), API_ERROR);

        let malformed = serde_json::from_str::<u8>("x").unwrap_err();
        assert_eq!(for_api_error(&ApiError::Malformed(malformed)), MALFORMED);
    }
}
