//
//  titan-cli
//  cli/version.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::GlobalOptions;
use crate::config::Config;
use crate::output::{print_field, write_json};

/// Show the CLI version and the API endpoint in use
#[derive(Args, Debug)]
pub struct VersionCommand {}

#[derive(Debug, Serialize)]
struct VersionInfo<'a> {
    version: &'a str,
    uri: String,
}

impl VersionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        // An unreadable config file should not hide the version.
        let config = Config::load().unwrap_or_default();
        let info = VersionInfo {
            version: crate::VERSION,
            uri: config.resolve_uri(global.uri.as_deref()),
        };

        let output = global.output();
        if output.is_json() {
            return write_json(&info);
        }
        println!("titan version {}", info.version);
        print_field("API", &info.uri, output.color_enabled());
        Ok(())
    }
}
