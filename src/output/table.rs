//
//  titan-cli
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::style;

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent wrapper over a `comfy_table::Table` with coloured headers.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colours a resource state: green when up, red when down or failed,
/// yellow while transitioning.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    match status.to_lowercase().as_str() {
        "running" | "active" | "enabled" | "up" | "ok" | "available" => {
            style(status).green().to_string()
        }
        "stopped" | "disabled" | "down" | "error" | "failed" | "suspended" => {
            style(status).red().to_string()
        }
        "pending" | "creating" | "starting" | "stopping" | "rebooting" | "deleting"
        | "syncing" | "restoring" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    match (value, color) {
        (true, true) => style("Yes").green().to_string(),
        (false, true) => style("No").dim().to_string(),
        (true, false) => "Yes".to_string(),
        (false, false) => "No".to_string(),
    }
}

/// Renders an optional value, `-` when absent or empty.
pub fn or_dash<S: AsRef<str>>(value: Option<S>) -> String {
    match value {
        Some(v) if !v.as_ref().is_empty() => v.as_ref().to_string(),
        _ => "-".to_string(),
    }
}
