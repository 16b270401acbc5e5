//
//  titan-cli
//  cli/firewall.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Firewall rule commands.
//!
//! ## Examples
//!
//! ```bash
//! titan firewall list --oid srv-123
//! titan firewall add --oid srv-123 --protocol tcp --port 443
//! titan firewall delete --oid srv-123 --protocol tcp --port 22 --source 203.0.113.0/24
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::compute::{FirewallRule, FirewallRules, Protocol};
use crate::output::{print_field, TableOutput};

/// Manage server firewall rules
#[derive(Args, Debug)]
pub struct FirewallCommand {
    #[command(subcommand)]
    pub command: FirewallSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FirewallSubcommand {
    /// List the rules of a server
    #[command(visible_alias = "ls")]
    List(ServerArg),

    /// Allow inbound traffic
    Add(RuleArgs),

    /// Remove a rule
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

    /// Port or range, e.g. 22 or 8000-8100
    #[arg(long)]
    pub port: String,

    /// Source address or CIDR
    #[arg(long, default_value = "0.0.0.0/0")]
    pub source: String,
}

impl RuleArgs {
    fn rule(&self) -> FirewallRule {
        FirewallRule {
            protocol: self.protocol,
            port: self.port.clone(),
            source: self.source.clone(),
        }
    }
}

impl TableOutput for FirewallRule {
    fn headers() -> Vec<&'static str> {
        vec!["PROTOCOL", "PORT", "SOURCE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.protocol.to_string(), self.port.clone(), self.source.clone()]
    }

    fn print_details(&self, color: bool) {
        print_field("Protocol", &self.protocol.to_string(), color);
        print_field("Port", &self.port, color);
        print_field("Source", &self.source, color);
    }
}

impl FirewallCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            FirewallSubcommand::List(args) => self.list(args, global).await,
            FirewallSubcommand::Add(args) => self.add(args, global).await,
            FirewallSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ServerArg, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let rules: FirewallRules = client.list_firewall_rules(&args.oid).await?;
        let output = global.output();
        if output.is_json() {
            return crate::output::write_json(&rules);
        }
        if let Some(policy) = &rules.policy {
            print_field("Default policy", policy, output.color_enabled());
            println!();
        }
        output.write_list(&rules.rules, "No firewall rules")
    }

    async fn add(&self, args: &RuleArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let rule = args.rule();
        let result = client.add_firewall_rule(&args.oid, &rule).await?;
        global.output().write_action(
            &result,
            &format!("Allowed {}/{} from {}", rule.protocol, rule.port, rule.source),
        )
    }

    async fn delete(&self, args: &RuleArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let rule = args.rule();
        let result = client.delete_firewall_rule(&args.oid, &rule).await?;
        global.output().write_action(
            &result,
            &format!("Removed rule {}/{} from {}", rule.protocol, rule.port, rule.source),
        )
    }
}
