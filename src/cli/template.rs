//
//  titan-cli
//  cli/template.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::api::compute::Template;
use crate::output::{format_bool, or_dash, print_field, print_header, TableOutput};

/// Show OS templates
#[derive(Args, Debug)]
pub struct TemplateCommand {
    #[command(subcommand)]
    pub command: TemplateSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TemplateSubcommand {
    /// List templates
    #[command(visible_alias = "ls")]
    List,

    /// Show one template
    Show {
        /// Template OID
        oid: String,
    },
}

impl TableOutput for Template {
    fn headers() -> Vec<&'static str> {
        vec!["OID", "NAME", "OS", "VERSION", "MIN DISK"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.oid.clone(),
            self.name.clone(),
            or_dash(self.os.as_deref()),
            or_dash(self.version.as_deref()),
            or_dash(self.min_disk.map(|d| format!("{} GB", d))),
        ]
    }

    fn print_details(&self, color: bool) {
        print_header(&self.name);
        println!();
        print_field("OID", &self.oid, color);
        print_field("OS", &or_dash(self.os.as_deref()), color);
        print_field("Version", &or_dash(self.version.as_deref()), color);
        print_field("Min disk", &or_dash(self.min_disk.map(|d| format!("{} GB", d))), color);
        print_field("Available", &format_bool(self.available.unwrap_or(true), color), color);
    }
}

impl TemplateCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        match &self.command {
            TemplateSubcommand::List => {
                let templates = client.list_templates().await?;
                global.output().write_list(&templates, "No templates found")
            }
            TemplateSubcommand::Show { oid } => {
                let template = client.get_template(oid).await?;
                global.output().write(&template)
            }
        }
    }
}
