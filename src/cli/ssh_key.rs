//
//  titan-cli
//  cli/ssh_key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSH key management commands
//!
//! Keys registered here are installed on servers at creation time.
//!
//! ## Examples
//!
//! ```bash
//! # List SSH keys
//! titan ssh-key list
//!
//! # Add a key from a file
//! titan ssh-key add --title laptop --key-file ~/.ssh/id_ed25519.pub
//!
//! # Delete a key
//! titan ssh-key delete laptop
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::account::SshKey;
use crate::output::{print_field, TableOutput};
use crate::util::truncate;

/// Manage SSH keys
#[derive(Args, Debug)]
pub struct SshKeyCommand {
    #[command(subcommand)]
    pub command: SshKeySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SshKeySubcommand {
    /// List SSH keys
    #[command(visible_alias = "ls")]
    List,

    /// Add an SSH key
    Add(AddArgs),

    /// Delete an SSH key
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Key title, also its identifier
    #[arg(long, short = 't')]
    pub title: String,

    /// SSH public key content
    #[arg(long, short = 'k', conflicts_with = "key_file")]
    pub key: Option<String>,

    /// Read key from file
    #[arg(long, short = 'f', conflicts_with = "key")]
    pub key_file: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Title of the key to delete
    pub title: String,
}

impl AddArgs {
    fn key_value(&self) -> Result<String> {
        let value = match (&self.key, &self.key_file) {
            (Some(key), _) => key.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Could not read key file {}", path))?,
            (None, None) => bail!("Either --key or --key-file is required"),
        };
        let value = value.trim().to_string();
        if !value.starts_with("ssh-") && !value.starts_with("ecdsa-") {
            bail!("Not an SSH public key: '{}'", truncate(&value, 30));
        }
        Ok(value)
    }
}

impl TableOutput for SshKey {
    fn headers() -> Vec<&'static str> {
        vec!["TITLE", "KEY"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.title.clone(), self.short_value()]
    }

    fn print_details(&self, color: bool) {
        print_field("Title", &self.title, color);
        print_field("Key", &self.value, color);
    }
}

impl SshKeyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SshKeySubcommand::List => self.list(global).await,
            SshKeySubcommand::Add(args) => self.add(args, global).await,
            SshKeySubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let keys = client.list_ssh_keys().await?;
        global.output().write_list(&keys, "No SSH keys found")
    }

    async fn add(&self, args: &AddArgs, global: &GlobalOptions) -> Result<()> {
        let key = SshKey {
            title: args.title.clone(),
            value: args.key_value()?,
        };
        let client = global.client()?;
        let result = client.add_ssh_key(&key).await?;
        global
            .output()
            .write_action(&result, &format!("Added SSH key '{}'", key.title))
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let result = client.delete_ssh_key(&args.title).await?;
        global
            .output()
            .write_action(&result, &format!("Deleted SSH key '{}'", args.title))
    }
}
