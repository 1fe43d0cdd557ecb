//! List command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tm_core::Version;
use tm_sql::StatementSplitter;

use crate::cli::{GlobalArgs, LsArgs, OutputFormat};
use crate::commands::common::{column_width, format_tags, print_json};
use crate::context::ProjectContext;

/// Execute the ls command
pub(crate) fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let tag = ctx.target.tag.as_deref();
    let db_type = ctx.target.database.db_type;
    let splitter = StatementSplitter::from_dialect_name(db_type.dialect_name())
        .with_context(|| format!("No statement splitter for {db_type}"))?;

    let versions: Vec<Arc<Version>> = if args.all {
        ctx.versions.all().to_vec()
    } else {
        ctx.versions.filtered(tag)
    };

    let mut rows = Vec::new();
    for version in versions.iter().filter(|v| !v.is_base()) {
        rows.push(VersionInfo::from_version(version, tag, &splitter)?);
    }

    match args.output {
        OutputFormat::Table => print_table(&rows, args.all),
        OutputFormat::Json => print_json(&rows)?,
    }
    Ok(())
}

/// Version information for display
#[derive(Debug, Serialize)]
struct VersionInfo {
    number: u32,
    name: String,
    tags: BTreeSet<String>,
    description: Option<String>,
    visible: bool,
    up_statements: usize,
    down_statements: usize,
}

impl VersionInfo {
    fn from_version(
        version: &Version,
        tag: Option<&str>,
        splitter: &StatementSplitter,
    ) -> Result<Self> {
        let up = version
            .up_statements(splitter)
            .with_context(|| format!("Failed to split up SQL of {version}"))?;
        let down = version
            .down_statements(splitter)
            .with_context(|| format!("Failed to split down SQL of {version}"))?;
        Ok(Self {
            number: version.number(),
            name: version.name().to_string(),
            tags: version.tags().clone(),
            description: version.description().map(String::from),
            visible: version.is_visible(tag),
            up_statements: up.len(),
            down_statements: down.len(),
        })
    }
}

fn print_table(rows: &[VersionInfo], show_visibility: bool) {
    if rows.is_empty() {
        println!("No versions found.");
        return;
    }

    let tags: Vec<String> = rows.iter().map(|r| format_tags(&r.tags)).collect();
    let name_width = column_width("NAME", rows.iter().map(|r| r.name.as_str()));
    let tags_width = column_width("TAGS", tags.iter().map(String::as_str));

    print!(
        "{:>7}  {:<name_width$}  {:<tags_width$}  {:>3}  {:>4}",
        "VERSION", "NAME", "TAGS", "UP", "DOWN"
    );
    if show_visibility {
        print!("  VISIBLE");
    }
    println!();

    for (row, tags) in rows.iter().zip(&tags) {
        print!(
            "{:>7}  {:<name_width$}  {:<tags_width$}  {:>3}  {:>4}",
            row.number, row.name, tags, row.up_statements, row.down_statements
        );
        if show_visibility {
            print!("  {}", if row.visible { "yes" } else { "no" });
        }
        println!();
    }
    println!();
    println!("{} version(s)", rows.len());
}
