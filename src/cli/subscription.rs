//
//  titan-cli
//  cli/subscription.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::account::Subscription;
use crate::output::{format_status, or_dash, print_field, print_header, TableOutput};

/// Show subscriptions
#[derive(Args, Debug)]
pub struct SubscriptionCommand {
    #[command(subcommand)]
    pub command: SubscriptionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionSubcommand {
    /// List subscriptions
    #[command(visible_alias = "ls")]
    List,

    /// Show one subscription
    Show {
        /// Subscription OID
        oid: String,
    },
}

impl TableOutput for Subscription {
    fn headers() -> Vec<&'static str> {
        vec!["OID", "NAME", "STATE", "SERVERS", "ENDS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.oid.clone(),
            or_dash(self.name.as_deref()),
            format_status(self.state.as_deref().unwrap_or("-"), color),
            self.servers.len().to_string(),
            self.ends_at.to_string(),
        ]
    }

    fn print_details(&self, color: bool) {
        print_header(self.name.as_deref().unwrap_or(&self.oid));
        println!();
        print_field("OID", &self.oid, color);
        print_field("State", &format_status(self.state.as_deref().unwrap_or("-"), color), color);
        print_field("Company", &or_dash(self.company_oid.as_deref()), color);
        print_field("Created", &self.created_at.to_string(), color);
        print_field("Ends", &self.ends_at.to_string(), color);
        print_field(
            "Servers",
            &if self.servers.is_empty() { "-".to_string() } else { self.servers.join(", ") },
            color,
        );
    }
}

impl SubscriptionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        match &self.command {
            SubscriptionSubcommand::List => {
                let subscriptions = client.list_subscriptions().await?;
                global.output().write_list(&subscriptions, "No subscriptions found")
            }
            SubscriptionSubcommand::Show { oid } => {
                let subscription = client.get_subscription(oid).await?;
                global.output().write(&subscription)
            }
        }
    }
}
