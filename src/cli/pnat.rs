//
//  titan-cli
//  cli/pnat.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::compute::{PnatRule, Protocol};
use crate::output::{or_dash, print_field, TableOutput};

/// Manage port NAT rules
#[derive(Args, Debug)]
pub struct PnatCommand {
    #[command(subcommand)]
    pub command: PnatSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PnatSubcommand {
    /// List the NAT rules of a server
    #[command(visible_alias = "ls")]
    List(ServerArg),

    /// Forward a public port to the server
    Add(RuleArgs),

    /// Remove a forwarding rule
    #[command(visible_alias = "rm")]
    Delete(RuleArgs),
}

#[derive(Args, Debug)]
pub struct ServerArg {
    /// Server OID
    #[arg(long)]
    pub oid: String,
}

#[derive(Args, Debug)]
pub struct RuleArgs {
    /// Server OID
    #[arg(long)]
    pub oid: String,

    #[arg(long, value_enum, default_value_t = Protocol::Tcp)]
    pub protocol: Protocol,

    /// Public port
    #[arg(long)]
    pub from: u16,

    /// Port on the server
    #[arg(long)]
    pub to: u16,

    /// Public address, when the server has several
    #[arg(long)]
    pub ip: Option<String>,
}

impl RuleArgs {
    fn rule(&self) -> PnatRule {
        PnatRule {
            protocol: self.protocol,
            from: self.from,
            to: self.to,
            ip: self.ip.clone(),
        }
    }
}

impl TableOutput for PnatRule {
    fn headers() -> Vec<&'static str> {
        vec!["PROTOCOL", "FROM", "TO", "IP"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.protocol.to_string(),
            self.from.to_string(),
            self.to.to_string(),
            or_dash(self.ip.as_deref()),
        ]
    }

    fn print_details(&self, color: bool) {
        print_field("Protocol", &self.protocol.to_string(), color);
        print_field("From", &self.from.to_string(), color);
        print_field("To", &self.to.to_string(), color);
        print_field("IP", &or_dash(self.ip.as_deref()), color);
    }
}

impl PnatCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PnatSubcommand::List(args) => {
                let client = global.client()?;
                let rules = client.list_pnat_rules(&args.oid).await?;
                global.output().write_list(&rules, "No NAT rules")
            }
            PnatSubcommand::Add(args) => {
                let client = global.client()?;
                let result = client.add_pnat_rule(&args.oid, &args.rule()).await?;
                global.output().write_action(
                    &result,
                    &format!("Forwarding {}/{} to port {}", args.protocol, args.from, args.to),
                )
            }
            PnatSubcommand::Delete(args) => {
                let client = global.client()?;
                let result = client.delete_pnat_rule(&args.oid, &args.rule()).await?;
                global.output().write_action(
                    &result,
                    &format!("Removed forwarding of {}/{}", args.protocol, args.from),
                )
            }
        }
    }
}
