//
//  titan-cli
//  cli/history.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::api::account::{HistoryEvent, HistoryQuery, DEFAULT_HISTORY_SIZE};
use crate::output::{format_status, or_dash, print_field, TableOutput};

/// Show the action history
#[derive(Args, Debug)]
pub struct HistoryCommand {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Events per page
    #[arg(long, short = 'L', default_value_t = DEFAULT_HISTORY_SIZE)]
    pub size: u32,

    /// Only events of this server (OID)
    #[arg(long)]
    pub server: Option<String>,
}

impl TableOutput for HistoryEvent {
    fn headers() -> Vec<&'static str> {
        vec!["DATE", "ACTION", "USER", "SERVER", "STATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.created_at.to_string(),
            self.action.clone(),
            or_dash(self.user.as_deref()),
            or_dash(self.server_oid.as_deref()),
            format_status(self.state.as_deref().unwrap_or("-"), color),
        ]
    }

    fn print_details(&self, color: bool) {
        print_field("Date", &self.created_at.to_string(), color);
        print_field("Action", &self.action, color);
        print_field("User", &or_dash(self.user.as_deref()), color);
    }
}

impl HistoryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let query = HistoryQuery {
            page: self.page,
            size: self.size,
            server_oid: self.server.clone(),
        };
        let events = client.list_history(&query).await?;
        global
            .output()
            .write_list(&events, &format!("No events on page {}", query.page))
    }
}
