//
//  titan-cli
//  cli/company.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::account::Company;
use crate::output::{or_dash, print_field, print_header, TableOutput};

/// Show companies and their members
#[derive(Args, Debug)]
pub struct CompanyCommand {
    #[command(subcommand)]
    pub command: CompanySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CompanySubcommand {
    /// List the companies the user belongs to
    #[command(visible_alias = "ls")]
    List,

    /// Show company details
    Show {
        /// Company OID
        oid: String,
    },

    /// List the members of a company
    Users {
        /// Company OID
        oid: String,
    },
}

impl TableOutput for Company {
    fn headers() -> Vec<&'static str> {
        vec!["OID", "NAME", "EMAIL"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.oid.clone(), self.name.clone(), or_dash(self.email.as_deref())]
    }

    fn print_details(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("OID", &self.oid, color);
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            print_field("Description", description, color);
        }
        print_field("Email", &or_dash(self.email.as_deref()), color);
        print_field("Phone", &or_dash(self.phone.as_deref()), color);
        print_field("Address", &or_dash(self.address.as_deref()), color);
        print_field("VAT", &or_dash(self.vat.as_deref()), color);
    }
}

impl CompanyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();
        match &self.command {
            CompanySubcommand::List => {
                let companies = client.list_companies().await?;
                output.write_list(&companies, "No companies found")
            }
            CompanySubcommand::Show { oid } => {
                let company = client.get_company(oid).await?;
                output.write(&company)
            }
            CompanySubcommand::Users { oid } => {
                let users = client.list_company_users(oid).await?;
                output.write_list(&users, &format!("No users in company {}", oid))
            }
        }
    }
}
