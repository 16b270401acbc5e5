//
//  titan-cli
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;

use super::GlobalOptions;
use crate::api::account::User;
use crate::output::{or_dash, print_field, print_header, TableOutput};
use crate::util::format_relative_time;

/// Show the user owning the API token
#[derive(Args, Debug)]
pub struct UserCommand {}

impl TableOutput for User {
    fn headers() -> Vec<&'static str> {
        vec!["OID", "NAME", "EMAIL", "ROLE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.oid.clone(),
            self.display_name(),
            self.email.clone(),
            or_dash(self.role.as_deref()),
        ]
    }

    fn print_details(&self, color: bool) {
        print_header(&self.display_name());
        println!();
        print_field("OID", &self.oid, color);
        print_field("Email", &self.email, color);
        print_field("Company", &or_dash(self.company_oid.as_deref()), color);
        let last_login = match self.last_login.seconds() {
            Some(seconds) => format!("{} ({})", self.last_login, format_relative_time(seconds)),
            None => "-".to_string(),
        };
        print_field("Last login", &last_login, color);
    }
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let user = client.get_user().await?;
        global.output().write(&user)
    }
}
