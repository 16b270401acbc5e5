//
//  titan-cli
//  cli/drp.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Disaster recovery commands.
//!
//! `failover --hard` and `resync` may lose data and refuse to run without
//! both a site and `--confirm`.
//!
//! ## Examples
//!
//! ```bash
//! titan drp status --oid srv-123
//! titan drp failover --oid srv-123 --site secondary
//! titan drp failover --oid srv-123 --site secondary --hard --confirm
//! titan drp resync --oid srv-123 --authoritative-site primary --confirm
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::common::ApiError;
use crate::api::compute::{DrpSite, DrpStatus};
use crate::output::{format_bool, format_status, or_dash, print_field, TableOutput};

/// Disaster recovery operations
#[derive(Args, Debug)]
pub struct DrpCommand {
    #[command(subcommand)]
    pub command: DrpSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DrpSubcommand {
    /// Show replication status
    Status(ServerArg),

    /// Switch the active site
    Failover(FailoverArgs),

    /// Rebuild the replica from one site
    Resync(ResyncArgs),
}

#[derive(Args, Debug)]
pub struct ServerArg {
    /// Server OID
    #[arg(long)]
    pub oid: String,
}

#[derive(Args, Debug)]
pub struct FailoverArgs {
    /// Server OID
    #[arg(long)]
    pub oid: String,

    /// Site to switch to
    #[arg(long, value_enum)]
    pub site: Option<DrpSite>,

    /// Do not wait for replication to drain
    #[arg(long)]
    pub hard: bool,

    /// Required with --hard
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Args, Debug)]
pub struct ResyncArgs {
    /// Server OID
    #[arg(long)]
    pub oid: String,

    /// Site whose data is kept
    #[arg(long, value_enum)]
    pub authoritative_site: Option<DrpSite>,

    /// Required: the other site's data is discarded
    #[arg(long)]
    pub confirm: bool,
}

impl TableOutput for DrpStatus {
    fn headers() -> Vec<&'static str> {
        vec!["ENABLED", "ACTIVE SITE", "STATE", "LAG"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            format_bool(self.enabled, color),
            or_dash(self.active_site.map(|s| s.to_string())),
            format_status(self.state.as_deref().unwrap_or("-"), color),
            or_dash(self.lag.map(|l| format!("{}s", l))),
        ]
    }

    fn print_details(&self, color: bool) {
        print_field("Enabled", &format_bool(self.enabled, color), color);
        print_field("Active site", &or_dash(self.active_site.map(|s| s.to_string())), color);
        print_field("State", &format_status(self.state.as_deref().unwrap_or("-"), color), color);
        print_field("Lag", &or_dash(self.lag.map(|l| format!("{}s", l))), color);
    }
}

impl DrpCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            DrpSubcommand::Status(args) => {
                let client = global.client()?;
                let status = client.drp_status(&args.oid).await?;
                global.output().write(&status)
            }
            DrpSubcommand::Failover(args) => self.failover(args, global).await,
            DrpSubcommand::Resync(args) => {
                let client = global.client()?;
                let result = client
                    .drp_resync(&args.oid, args.authoritative_site, args.confirm)
                    .await?;
                global
                    .output()
                    .write_action(&result, &format!("Resynchronisation of {} started", args.oid))
            }
        }
    }

    async fn failover(&self, args: &FailoverArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let result = if args.hard {
            client
                .drp_hard_failover(&args.oid, args.site, args.confirm)
                .await?
        } else {
            let site = args
                .site
                .ok_or_else(|| ApiError::precondition("failover requires --site"))?;
            client.drp_soft_failover(&args.oid, site).await?
        };
        global
            .output()
            .write_action(&result, &format!("Failover of {} started", args.oid))
    }
}
