//
//  titan-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use titan_cli::api::ApiError;
use titan_cli::cli::Cli;
use titan_cli::config::ENV_DEBUG;
use titan_cli::exit_codes;
use titan_cli::output::{write_json, ErrorDocument, OutputWriter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.global.json || cli.global.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Execute command
    let result = cli.command.run(&cli.global).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => std::process::exit(report(&e, &cli.global.output())),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_DEBUG).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Prints the error once and returns the exit code.
///
/// Errors from the API layer keep their kind. Anything else (unreadable
/// config file, bad local input) is a usage error.
fn report(err: &anyhow::Error, output: &OutputWriter) -> i32 {
    let api_error = err.downcast_ref::<ApiError>();

    // ApiError messages already embed their source.
    let message = match api_error {
        Some(api_error) => api_error.to_string(),
        None => format!("{err:#}"),
    };

    if output.is_json() {
        let document = match api_error {
            Some(api_error) => ErrorDocument::from_api_error(api_error),
            None => ErrorDocument::from_api_error(&ApiError::precondition(message.clone())),
        };
        if write_json(&document).is_err() {
            eprintln!("error: {message}");
        }
    } else {
        output.write_error(&message);
    }

    api_error.map_or(exit_codes::USAGE, exit_codes::for_api_error)
}
