//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// Comma-separated tags, or `-` when there are none
pub(crate) fn format_tags(tags: &BTreeSet<String>) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }
}

/// Width of the widest cell in a column, at least the header's width
pub(crate) fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(str::len).max().unwrap_or(0).max(header.len())
}

/// Pretty-print `value` as JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
