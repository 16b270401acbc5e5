//
//  titan-cli
//  cli/network.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Private network commands.
//!
//! ## Examples
//!
//! ```bash
//! titan network create --name backend --cidr 10.0.0.0/24
//! titan network attach net-123 --server srv-456
//! titan network drp disable net-123 --confirm
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::compute::{CreateNetworkRequest, Network};
use crate::output::{format_bool, format_status, or_dash, print_field, print_header, TableBuilder, TableOutput};

/// Manage private networks
#[derive(Args, Debug)]
pub struct NetworkCommand {
    #[command(subcommand)]
    pub command: NetworkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NetworkSubcommand {
    /// List networks
    #[command(visible_alias = "ls")]
    List,

    /// Show network details and attached servers
    Show(NetworkArg),

    /// Create a network
    Create(CreateArgs),

    /// Delete a network
    Delete(NetworkArg),

    /// Rename a network
    Rename(RenameArgs),

    /// Attach a server to a network
    Attach(ServerArgs),

    /// Detach a server from a network
    Detach(ServerArgs),

    /// Set or remove the network gateway
    #[command(subcommand)]
    Gateway(GatewaySubcommand),

    /// Enable or disable DRP replication
    #[command(subcommand)]
    Drp(NetworkDrpSubcommand),
}

#[derive(Args, Debug)]
pub struct NetworkArg {
    /// Network OID
    pub network: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    /// Address range, e.g. 10.0.0.0/24
    #[arg(long)]
    pub cidr: String,

    /// Owning company, defaults to the user's company
    #[arg(long)]
    pub company: Option<String>,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    pub network: String,

    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ServerArgs {
    pub network: String,

    /// Server OID
    #[arg(long)]
    pub server: String,
}

#[derive(Subcommand, Debug)]
pub enum GatewaySubcommand {
    /// Use a server address as gateway
    Set(GatewayArgs),

    /// Remove the gateway
    Remove(NetworkArg),
}

#[derive(Args, Debug)]
pub struct GatewayArgs {
    pub network: String,

    /// Gateway address inside the network
    #[arg(long)]
    pub ip: String,
}

#[derive(Subcommand, Debug)]
pub enum NetworkDrpSubcommand {
    Enable(NetworkArg),

    /// Disable replication, dropping the replica
    Disable(DisableDrpArgs),
}

#[derive(Args, Debug)]
pub struct DisableDrpArgs {
    pub network: String,

    /// Required: confirm the replica will be dropped
    #[arg(long)]
    pub confirm: bool,
}

impl TableOutput for Network {
    fn headers() -> Vec<&'static str> {
        vec!["OID", "NAME", "CIDR", "STATE", "SERVERS", "DRP"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.oid.clone(),
            self.name.clone(),
            or_dash(self.cidr.as_deref()),
            format_status(self.state.as_deref().unwrap_or("-"), color),
            self.servers.len().to_string(),
            format_bool(self.drp, color),
        ]
    }

    fn print_details(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("OID", &self.oid, color);
        print_field("CIDR", &or_dash(self.cidr.as_deref()), color);
        print_field("State", &format_status(self.state.as_deref().unwrap_or("-"), color), color);
        print_field("Gateway", &or_dash(self.gateway.as_deref()), color);
        print_field("Company", &or_dash(self.company_oid.as_deref()), color);
        print_field("DRP", &format_bool(self.drp, color), color);
        print_field("Created", &self.created_at.to_string(), color);

        if !self.servers.is_empty() {
            println!();
            TableBuilder::new()
                .color(color)
                .headers(["SERVER", "NAME", "IP"])
                .rows(self.servers.iter().map(|s| {
                    vec![s.oid.clone(), or_dash(s.name.as_deref()), or_dash(s.ip.as_deref())]
                }))
                .print();
        }
    }
}

impl NetworkCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            NetworkSubcommand::List => self.list(global).await,
            NetworkSubcommand::Show(args) => self.show(args, global).await,
            NetworkSubcommand::Create(args) => self.create(args, global).await,
            NetworkSubcommand::Delete(args) => self.delete(args, global).await,
            NetworkSubcommand::Rename(args) => self.rename(args, global).await,
            NetworkSubcommand::Attach(args) => self.attach(args, global).await,
            NetworkSubcommand::Detach(args) => self.detach(args, global).await,
            NetworkSubcommand::Gateway(cmd) => self.gateway(cmd, global).await,
            NetworkSubcommand::Drp(cmd) => self.drp(cmd, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let networks = client.list_networks().await?;
        global.output().write_list(&networks, "No networks found")
    }

    async fn show(&self, args: &NetworkArg, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let network = client.get_network(&args.network).await?;
        global.output().write(&network)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let request = CreateNetworkRequest {
            name: args.name.clone(),
            cidr: args.cidr.clone(),
            company_oid: args.company.clone(),
        };
        let network = client.create_network(&request).await?;
        let output = global.output();
        if output.is_json() {
            return output.write(&network);
        }
        output.write_success(&format!("Created network '{}' ({})", network.name, network.oid));
        Ok(())
    }

    async fn delete(&self, args: &NetworkArg, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let result = client.delete_network(&args.network).await?;
        global
            .output()
            .write_action(&result, &format!("Deleted network {}", args.network))
    }

    async fn rename(&self, args: &RenameArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let result = client.rename_network(&args.network, &args.name).await?;
        global.output().write_action(
            &result,
            &format!("Network {} renamed to '{}'", args.network, args.name),
        )
    }

    async fn attach(&self, args: &ServerArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let result = client
            .attach_network_server(&args.network, &args.server)
            .await?;
        global.output().write_action(
            &result,
            &format!("Server {} attached to network {}", args.server, args.network),
        )
    }

    async fn detach(&self, args: &ServerArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let result = client
            .detach_network_server(&args.network, &args.server)
            .await?;
        global.output().write_action(
            &result,
            &format!("Server {} detached from network {}", args.server, args.network),
        )
    }

    async fn gateway(&self, cmd: &GatewaySubcommand, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();
        match cmd {
            GatewaySubcommand::Set(args) => {
                let result = client.set_network_gateway(&args.network, &args.ip).await?;
                output.write_action(&result, &format!("Gateway of {} set to {}", args.network, args.ip))
            }
            GatewaySubcommand::Remove(args) => {
                let result = client.remove_network_gateway(&args.network).await?;
                output.write_action(&result, &format!("Gateway of {} removed", args.network))
            }
        }
    }

    async fn drp(&self, cmd: &NetworkDrpSubcommand, global: &GlobalOptions) -> Result<()> {
        match cmd {
            NetworkDrpSubcommand::Enable(args) => {
                let client = global.client()?;
                let result = client.enable_network_drp(&args.network).await?;
                global
                    .output()
                    .write_action(&result, &format!("DRP enabled on network {}", args.network))
            }
            NetworkDrpSubcommand::Disable(args) => {
                let client = global.client()?;
                let result = client
                    .disable_network_drp(&args.network, args.confirm)
                    .await?;
                global
                    .output()
                    .write_action(&result, &format!("DRP disabled on network {}", args.network))
            }
        }
    }
}
