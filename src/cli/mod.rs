//
//  titan-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Command-line interface definitions.
//!
//! One module per top-level subcommand. Each exposes an `XCommand` struct with
//! an async `run(&self, &GlobalOptions)` method that builds the client, calls
//! the API layer and hands the result to an [`OutputWriter`].

mod api_token;
mod company;
mod completion;
mod drp;
mod firewall;
mod history;
mod ip;
mod network;
mod pnat;
mod server;
mod setup;
mod snapshot;
mod ssh_key;
mod subscription;
mod template;
mod user;
mod version;

pub use api_token::ApiTokenCommand;
pub use company::CompanyCommand;
pub use completion::CompletionCommand;
pub use drp::DrpCommand;
pub use firewall::FirewallCommand;
pub use history::HistoryCommand;
pub use ip::IpCommand;
pub use network::NetworkCommand;
pub use pnat::PnatCommand;
pub use server::ServerCommand;
pub use setup::SetupCommand;
pub use snapshot::SnapshotCommand;
pub use ssh_key::SshKeyCommand;
pub use subscription::SubscriptionCommand;
pub use template::TemplateCommand;
pub use user::UserCommand;
pub use version::VersionCommand;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::api::common::{ApiError, ResourceId};
use crate::api::TitanClient;
use crate::config::{Config, ENV_TOKEN, ENV_URI};
use crate::output::{OutputFormat, OutputWriter};

#[derive(Parser, Debug)]
#[command(
    name = "titan",
    version,
    about = "Manage Titan cloud resources from the command line",
    long_about = "titan is a CLI for the Titan cloud control plane.\n\n\
                  It manages servers, snapshots, networks, firewall and NAT rules, \
                  and account settings.",
    propagate_version = true,
    after_help = "Use 'titan <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output JSON instead of tables (disables colour)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// API token, overrides the config file
    #[arg(long, global = true, env = ENV_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// API base URI, overrides the config file
    #[arg(long, global = true, env = ENV_URI)]
    pub uri: Option<String>,
}

impl GlobalOptions {
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    /// Builds the API client from flags, environment and config file.
    pub fn client(&self) -> Result<TitanClient> {
        let config = Config::load()?;
        let client_config = config.resolve(self.token.as_deref(), self.uri.as_deref())?;
        Ok(TitanClient::new(client_config)?)
    }
}

/// The `--oid` / `--uuid` pair selecting a server.
#[derive(Args, Debug, Clone)]
pub struct ServerIdArgs {
    /// Server OID (current API)
    #[arg(long)]
    pub oid: Option<String>,

    /// Server UUID (legacy API)
    #[arg(long)]
    pub uuid: Option<String>,
}

impl ServerIdArgs {
    /// Exactly one of the two flags must be set.
    pub fn resolve(&self) -> Result<ResourceId, ApiError> {
        ResourceId::from_flags(self.oid.as_deref(), self.uuid.as_deref())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage servers
    #[command(visible_alias = "srv")]
    Server(ServerCommand),

    /// Manage private networks
    #[command(visible_alias = "net")]
    Network(NetworkCommand),

    /// Manage server snapshots
    #[command(visible_alias = "snap")]
    Snapshot(SnapshotCommand),

    /// Manage server firewall rules
    #[command(visible_alias = "fw")]
    Firewall(FirewallCommand),

    /// Manage public IP addresses
    Ip(IpCommand),

    /// Manage port NAT rules
    Pnat(PnatCommand),

    /// Show subscriptions
    #[command(visible_alias = "sub")]
    Subscription(SubscriptionCommand),

    /// Show OS templates
    Template(TemplateCommand),

    /// Manage SSH keys
    #[command(name = "ssh-key")]
    SshKey(SshKeyCommand),

    /// Manage API tokens
    #[command(name = "api-token")]
    ApiToken(ApiTokenCommand),

    /// Show the authenticated user
    User(UserCommand),

    /// Show companies and their members
    Company(CompanyCommand),

    /// Show the action history
    History(HistoryCommand),

    /// Disaster recovery operations
    Drp(DrpCommand),

    /// Show version and API endpoint
    Version(VersionCommand),

    /// Write the configuration file
    Setup(SetupCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),
}

impl Commands {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match self {
            Commands::Server(cmd) => cmd.run(global).await,
            Commands::Network(cmd) => cmd.run(global).await,
            Commands::Snapshot(cmd) => cmd.run(global).await,
            Commands::Firewall(cmd) => cmd.run(global).await,
            Commands::Ip(cmd) => cmd.run(global).await,
            Commands::Pnat(cmd) => cmd.run(global).await,
            Commands::Subscription(cmd) => cmd.run(global).await,
            Commands::Template(cmd) => cmd.run(global).await,
            Commands::SshKey(cmd) => cmd.run(global).await,
            Commands::ApiToken(cmd) => cmd.run(global).await,
            Commands::User(cmd) => cmd.run(global).await,
            Commands::Company(cmd) => cmd.run(global).await,
            Commands::History(cmd) => cmd.run(global).await,
            Commands::Drp(cmd) => cmd.run(global).await,
            Commands::Version(cmd) => cmd.run(global).await,
            Commands::Setup(cmd) => cmd.run(global).await,
            Commands::Completion(cmd) => cmd.run(global).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_server_id_args() {
        let both = ServerIdArgs {
            oid: Some("o".to_string()),
            uuid: Some("u".to_string()),
        };
        assert!(matches!(both.resolve(), Err(ApiError::Precondition(_))));

        let uuid = ServerIdArgs {
            oid: None,
            uuid: Some("u".to_string()),
        };
        assert_eq!(uuid.resolve().unwrap(), ResourceId::Uuid("u".to_string()));
    }
}
