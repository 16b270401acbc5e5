//
//  titan-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Everything the CLI prints goes through this module. Command handlers hand
//! typed values to an [`OutputWriter`], which renders them as a table or as
//! pretty JSON depending on `--json`.
//!
//! ## Formats
//!
//! - **Table**: `comfy-table` lists and `key: value` detail views, coloured
//!   with `console` unless `--no-color` or `--json` is set
//! - **Json**: the value itself, pretty printed, one document per command
//!
//! ## Presentation Boundary
//!
//! API types never format themselves. Their human rendering is provided by
//! implementing [`TableOutput`] next to the command that shows them.

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

use crate::api::common::ActionResult;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled() && format == OutputFormat::Table,
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes one item: its detail view, or the item as JSON.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_details(self.color);
                Ok(())
            }
        }
    }

    /// Writes a collection: one table row per item, or a JSON array.
    ///
    /// `empty` is printed instead of an empty table.
    pub fn write_list<T: Serialize + TableOutput>(
        &self,
        values: &[T],
        empty: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values),
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info(empty);
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
                Ok(())
            }
        }
    }

    /// Writes the acknowledgement of an action endpoint.
    ///
    /// In table mode the API message wins over `fallback`.
    pub fn write_action(&self, result: &ActionResult, fallback: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(result),
            OutputFormat::Table => {
                self.write_success(result.summary().unwrap_or(fallback));
                Ok(())
            }
        }
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Human rendering of a value.
pub trait TableOutput {
    /// Column headers of the list view.
    fn headers() -> Vec<&'static str>
    where
        Self: Sized;

    /// One row of the list view, aligned with [`TableOutput::headers`].
    fn row(&self, color: bool) -> Vec<String>;

    /// Detail view of a single value.
    fn print_details(&self, color: bool);
}

pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
