//
//  titan-cli
//  cli/snapshot.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Snapshot commands.
//!
//! `snapshot create` goes through rotation: when the server is at its
//! snapshot quota, `--force` deletes the oldest snapshot and retries, and
//! `--ask` asks first. Without either flag the quota error is reported as is.
//!
//! ## Examples
//!
//! ```bash
//! titan snapshot list --oid srv-123
//! titan snapshot create --oid srv-123 --name before-upgrade --force
//! titan snapshot restore --uuid 0b6c... --snapshot 7d1e...
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{GlobalOptions, ServerIdArgs};
use crate::api::common::ApiError;
use crate::api::compute::{create_with_rotation, Eviction, Snapshot};
use crate::interactive::confirm_destructive;
use crate::output::{format_status, or_dash, print_field, print_header, TableOutput};

/// Manage server snapshots
#[derive(Args, Debug)]
pub struct SnapshotCommand {
    #[command(subcommand)]
    pub command: SnapshotSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SnapshotSubcommand {
    /// List the snapshots of a server
    #[command(visible_alias = "ls")]
    List(ServerIdArgs),

    /// Create a snapshot, rotating out the oldest one if allowed
    Create(CreateArgs),

    /// Delete a snapshot
    Delete(SnapshotArgs),

    /// Restore a server from a snapshot
    Restore(SnapshotArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub id: ServerIdArgs,

    /// Snapshot name, chosen by the API when omitted
    #[arg(long)]
    pub name: Option<String>,

    /// Delete the oldest snapshot without asking when the quota is reached
    #[arg(long, short = 'f', conflicts_with = "ask")]
    pub force: bool,

    /// Ask before deleting the oldest snapshot when the quota is reached
    #[arg(long)]
    pub ask: bool,
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub id: ServerIdArgs,

    /// Snapshot identifier, in the same scheme as the server
    #[arg(long)]
    pub snapshot: String,
}

/// JSON shape of a rotated create.
#[derive(Debug, Serialize)]
struct CreateReport<'a> {
    created: &'a Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    evicted: Option<&'a Snapshot>,
}

impl TableOutput for Snapshot {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE", "SIZE", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name.clone(),
            format_status(self.state.as_deref().unwrap_or("-"), color),
            or_dash(self.size.as_ref().map(ToString::to_string)),
            self.created_at.to_string(),
        ]
    }

    fn print_details(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("OID", &or_dash(self.oid.as_deref()), color);
        print_field("UUID", &or_dash(self.uuid.as_deref()), color);
        print_field("State", &or_dash(self.state.as_deref()), color);
        print_field("Size", &or_dash(self.size.as_ref().map(ToString::to_string)), color);
        print_field("Server", &or_dash(self.server.as_deref()), color);
        print_field("Created", &self.created_at.to_string(), color);
    }
}

fn confirm_eviction(snapshot: &Snapshot) -> Result<bool, ApiError> {
    confirm_destructive(&format!(
        "Snapshot limit reached. Delete oldest snapshot '{}' ({}, created {})?",
        snapshot.name,
        snapshot.id(),
        snapshot.created_at
    ))
}

impl SnapshotCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SnapshotSubcommand::List(id) => self.list(id, global).await,
            SnapshotSubcommand::Create(args) => self.create(args, global).await,
            SnapshotSubcommand::Delete(args) => self.delete(args, global).await,
            SnapshotSubcommand::Restore(args) => self.restore(args, global).await,
        }
    }

    async fn list(&self, id: &ServerIdArgs, global: &GlobalOptions) -> Result<()> {
        let id = id.resolve()?;
        let client = global.client()?;
        let snapshots = client.list_snapshots(&id).await?;
        global
            .output()
            .write_list(&snapshots, &format!("No snapshots on server {}", id))
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let output = global.output();

        let eviction = if args.force {
            Eviction::Forced
        } else if args.ask {
            Eviction::Ask(&confirm_eviction)
        } else {
            Eviction::Disabled
        };

        let outcome = create_with_rotation(&client, &id, args.name.as_deref(), eviction).await?;

        if output.is_json() {
            return crate::output::write_json(&CreateReport {
                created: &outcome.created,
                evicted: outcome.evicted.as_ref(),
            });
        }

        if let Some(evicted) = &outcome.evicted {
            output.write_warning(&format!(
                "Deleted oldest snapshot '{}' ({})",
                evicted.name,
                evicted.id()
            ));
        }
        output.write_success(&format!(
            "Created snapshot '{}' ({})",
            outcome.created.name,
            outcome.created.id()
        ));
        Ok(())
    }

    async fn delete(&self, args: &SnapshotArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let result = client.delete_snapshot(&id, &args.snapshot).await?;
        global
            .output()
            .write_action(&result, &format!("Deleted snapshot {}", args.snapshot))
    }

    async fn restore(&self, args: &SnapshotArgs, global: &GlobalOptions) -> Result<()> {
        let id = args.id.resolve()?;
        let client = global.client()?;
        let result = client.restore_snapshot(&id, &args.snapshot).await?;
        global.output().write_action(
            &result,
            &format!("Restoring server {} from snapshot {}", id, args.snapshot),
        )
    }
}
