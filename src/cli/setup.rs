//
//  titan-cli
//  cli/setup.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `titan setup`: writes `~/.titan/config`.
//!
//! With `--token` (or `TITAN_API_TOKEN`) the file is written without any
//! prompt. Otherwise the token and an optional URI are asked for.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use super::GlobalOptions;
use crate::api::common::ApiError;
use crate::config::{Config, Profile};
use crate::interactive::{can_prompt, prompt_confirm_with_default, prompt_input_optional, prompt_password};
use crate::output::write_json;

/// Write the configuration file
#[derive(Args, Debug)]
pub struct SetupCommand {
    /// Overwrite an existing token without asking
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct SetupReport {
    path: String,
    uri: Option<String>,
}

impl SetupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let existing = Config::load().unwrap_or_default();
        let has_token = existing.default.token.as_deref().is_some_and(|t| !t.is_empty());
        let given = global.token.as_deref().map(str::trim).filter(|t| !t.is_empty());

        if has_token && !self.force {
            let overwrite = given.is_none()
                && can_prompt()
                && prompt_confirm_with_default("A token is already configured. Replace it?", false)?;
            if !overwrite {
                return Err(ApiError::precondition(
                    "a token is already configured, pass --force to replace it",
                )
                .into());
            }
        }

        let profile = match given {
            Some(token) => Profile {
                token: Some(token.to_string()),
                uri: global.uri.clone().or(existing.default.uri.clone()),
            },
            None => {
                if !can_prompt() {
                    return Err(ApiError::precondition(
                        "no terminal to prompt on, pass --token to configure non-interactively",
                    )
                    .into());
                }
                let token = prompt_password("API token")?;
                if token.is_empty() {
                    return Err(ApiError::precondition("the API token cannot be empty").into());
                }
                let uri = match &global.uri {
                    Some(uri) => Some(uri.clone()),
                    None => prompt_input_optional("API URI (leave empty for the default)")?,
                };
                Profile {
                    token: Some(token),
                    uri,
                }
            }
        };

        let config = Config { default: profile };
        let path = config.save()?;
        debug!(path = %path.display(), "configuration written");

        let output = global.output();
        if output.is_json() {
            return write_json(&SetupReport {
                path: path.display().to_string(),
                uri: config.default.uri,
            });
        }
        output.write_success(&format!("Configuration written to {}", path.display()));
        Ok(())
    }
}
