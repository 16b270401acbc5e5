//
//  titan-cli
//  cli/ip.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::compute::Ip;
use crate::output::{or_dash, print_field, TableOutput};

/// Manage public IP addresses
#[derive(Args, Debug)]
pub struct IpCommand {
    #[command(subcommand)]
    pub command: IpSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IpSubcommand {
    /// List addresses
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Attach an address to a server
    Attach(AttachArgs),

    /// Detach an address from its server
    Detach(IpArg),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only addresses of this company
    #[arg(long)]
    pub company: Option<String>,
}

#[derive(Args, Debug)]
pub struct AttachArgs {
    pub ip: String,

    /// Server OID
    #[arg(long)]
    pub server: String,
}

#[derive(Args, Debug)]
pub struct IpArg {
    pub ip: String,
}

impl TableOutput for Ip {
    fn headers() -> Vec<&'static str> {
        vec!["IP", "VERSION", "SERVER", "REVERSE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.ip.clone(),
            or_dash(self.version.map(|v| format!("IPv{}", v))),
            or_dash(self.server_oid.as_deref()),
            or_dash(self.reverse.as_deref()),
        ]
    }

    fn print_details(&self, color: bool) {
        print_field("IP", &self.ip, color);
        print_field("Server", &or_dash(self.server_oid.as_deref()), color);
        print_field("Reverse", &or_dash(self.reverse.as_deref()), color);
        print_field("Company", &or_dash(self.company_oid.as_deref()), color);
    }
}

impl IpCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();
        match &self.command {
            IpSubcommand::List(args) => {
                let ips = client.list_ips(args.company.as_deref()).await?;
                output.write_list(&ips, "No IP addresses found")
            }
            IpSubcommand::Attach(args) => {
                let result = client.attach_ip(&args.ip, &args.server).await?;
                output.write_action(&result, &format!("{} attached to server {}", args.ip, args.server))
            }
            IpSubcommand::Detach(args) => {
                let result = client.detach_ip(&args.ip).await?;
                output.write_action(&result, &format!("{} detached", args.ip))
            }
        }
    }
}
