//
//  titan-cli
//  cli/api_token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::account::{ApiToken, CreateApiTokenRequest};
use crate::output::{print_field, TableOutput};
use crate::util::expiry_from_now;

/// Manage API tokens
#[derive(Args, Debug)]
pub struct ApiTokenCommand {
    #[command(subcommand)]
    pub command: ApiTokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ApiTokenSubcommand {
    /// List tokens
    #[command(visible_alias = "ls")]
    List,

    /// Create a token. The secret is shown once.
    Create(CreateArgs),

    /// Revoke a token
    #[command(visible_alias = "rm")]
    Delete {
        /// Token OID
        oid: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    /// Lifetime, e.g. 90d, 12h or 2w
    #[arg(long, default_value = "90d")]
    pub expire: String,
}

impl TableOutput for ApiToken {
    fn headers() -> Vec<&'static str> {
        vec!["OID", "NAME", "CREATED", "EXPIRES", "LAST USE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.oid.clone(),
            self.name.clone(),
            self.created_at.to_string(),
            self.expire.to_string(),
            self.last_use.to_string(),
        ]
    }

    fn print_details(&self, color: bool) {
        print_field("OID", &self.oid, color);
        print_field("Name", &self.name, color);
        print_field("Expires", &self.expire.to_string(), color);
        if let Some(token) = &self.token {
            print_field("Token", token, color);
        }
    }
}

impl ApiTokenCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ApiTokenSubcommand::List => {
                let client = global.client()?;
                let tokens = client.list_api_tokens().await?;
                global.output().write_list(&tokens, "No API tokens found")
            }
            ApiTokenSubcommand::Create(args) => {
                let request = CreateApiTokenRequest {
                    name: args.name.clone(),
                    expire: expiry_from_now(&args.expire)?,
                };
                let client = global.client()?;
                let token = client.create_api_token(&request).await?;
                let output = global.output();
                output.write(&token)?;
                if !output.is_json() && token.token.is_some() {
                    println!();
                    output.write_warning("Copy the token now, it will not be shown again");
                }
                Ok(())
            }
            ApiTokenSubcommand::Delete { oid } => {
                let client = global.client()?;
                let result = client.delete_api_token(oid).await?;
                global
                    .output()
                    .write_action(&result, &format!("Revoked API token {}", oid))
            }
        }
    }
}
