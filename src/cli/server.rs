//
//  titan-cli
//  cli/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server commands.
//!
//! ## Examples
//!
//! ```bash
//! titan server list
//! titan server show --oid srv-123
//! titan server action reboot --uuid 0b6c...
//! titan server iso load --oid srv-123 --protocol https --url https://example.com/boot.iso
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{GlobalOptions, ServerIdArgs};
use crate::api::compute::{LoadIsoRequest, Server, ServerAction};
use crate::output::{format_bool, format_status, or_dash, print_field, print_header, TableOutput};

/// Manage servers
#[derive(Args, Debug)]
pub struct ServerCommand {
    #[command(subcommand)]
    pub command: ServerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServerSubcommand {
    /// List servers
    #[command(visible_alias = "ls")]
    List,

    /// Show server details
    Show(ServerIdArgs),

    /// Change the power state of a server
    Action(ActionArgs),

    /// Rename a server
    Rename(RenameArgs),

    /// Set the reverse DNS name of a server
    Reverse(ReverseArgs),

    /// Mount or unmount an ISO image
    #[command(subcommand)]
    Iso(IsoSubcommand),
}

#[derive(Args, Debug)]
pub struct ActionArgs {
    #[arg(value_enum)]
    pub action: ServerAction,

    #[command(flatten)]
    pub id: ServerIdArgs,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    #[command(flatten)]
    pub id: ServerIdArgs,

    /// New server name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ReverseArgs {
    #[command(flatten)]
    pub id: ServerIdArgs,

    /// Reverse DNS name, e.g. web.example.com
    #[arg(long)]
    pub reverse: String,
}

#[derive(Subcommand, Debug)]
pub enum IsoSubcommand {
    /// Mount an ISO image from a URL
    Load(LoadIsoArgs),

    /// Unmount the current ISO image
    Unload(ServerIdArgs),
}

#[derive(Args, Debug)]
pub struct LoadIsoArgs {
    #[command(flatten)]
    pub id: ServerIdArgs,

    /// Download protocol
    #[arg(long, default_value = "https", value_parser = ["http", "https", "cifs"])]
    pub protocol: String,

    /// Location of the image
    #[arg(long)]
    pub url: String,
}

impl TableOutput for Server {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE", "PLAN", "IPS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let ips: Vec<&str> = self.ips.iter().map(|ip| ip.ip.as_str()).collect();
        vec![
            self.id().to_string(),
            self.name.clone(),
            format_status(&self.state, color),
            or_dash(self.plan.as_deref()),
            if ips.is_empty() { "-".to_string() } else { ips.join(", ") },
        ]
    }

    fn print_details(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("OID", &or_dash(self.oid.as_deref()), color);
        print_field("UUID", &or_dash(self.uuid.as_deref()), color);
        print_field("State", &format_status(&self.state, color), color);
        print_field("Hostname", &or_dash(self.hostname.as_deref()), color);
        print_field("Plan", &or_dash(self.plan.as_deref()), color);
        print_field("Template", &or_dash(self.template.as_deref()), color);

        println!();
        print_field("CPU", &or_dash(self.cpu.map(|c| c.to_string())), color);
        print_field("RAM", &or_dash(self.ram.as_ref().map(ToString::to_string)), color);
        print_field("Disk", &or_dash(self.disk.as_ref().map(ToString::to_string)), color);

        println!();
        for ip in &self.ips {
            let label = match ip.version {
                Some(6) => "IPv6",
                _ => "IPv4",
            };
            print_field(label, &ip.ip, color);
        }
        print_field("Reverse", &or_dash(self.reverse.as_deref()), color);
        print_field("DRP", &format_bool(self.drp, color), color);
        print_field("Created", &self.created_at.to_string(), color);
    }
}

impl ServerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ServerSubcommand::List => self.list(global).await,
            ServerSubcommand::Show(id) => self.show(id, global).await,
            ServerSubcommand::Action(args) => self.action(args, global).await,
            ServerSubcommand::Rename(args) => self.rename(args, global).await,
            ServerSubcommand::Reverse(args) => self.reverse(args, global).await,
            ServerSubcommand::Iso(IsoSubcommand::Load(args)) => self.load_iso(args, global).await,
            ServerSubcommand::Iso(IsoSubcommand::Unload(id)) => self.unload_iso(id, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let servers = client.list_servers().await?;
        global.output().write_list(&servers, "No servers found")
    }

    async fn show(&self, id: &ServerIdArgs, global: &GlobalOptions) -> Result<()> {
        let id = id.resolve()?;
        let client = global.client()?;
        let server = client.get_server(&id).await?;
        global.output().write(&server)
    }

    async fn action(&self, args: &ActionArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let result = client.server_action(&id, args.action).await?;
        global.output().write_action(
            &result,
            &format!("Action '{}' sent to server {}", args.action.as_str(), id),
        )
    }

    async fn rename(&self, args: &RenameArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let result = client.rename_server(&id, &args.name).await?;
        global
            .output()
            .write_action(&result, &format!("Server {} renamed to '{}'", id, args.name))
    }

    async fn reverse(&self, args: &ReverseArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let result = client.set_server_reverse(&id, &args.reverse).await?;
        global
            .output()
            .write_action(&result, &format!("Reverse of server {} set to {}", id, args.reverse))
    }

    async fn load_iso(&self, args: &LoadIsoArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let request = LoadIsoRequest {
            protocol: args.protocol.clone(),
            url: args.url.clone(),
        };
        let result = client.load_iso(&id, &request).await?;
        global
            .output()
            .write_action(&result, &format!("ISO mounted on server {}", id))
    }

    async fn unload_iso(&self, id: &ServerIdArgs, global: &GlobalOptions) -> Result<()> {
        let id = id.resolve()?;
        let client = global.client()?;
        let result = client.unload_iso(&id).await?;
        global
            .output()
            .write_action(&result, &format!("ISO unmounted from server {}", id))
    }
}
