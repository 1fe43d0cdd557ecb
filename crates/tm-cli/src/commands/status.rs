//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::{column_width, format_tags, print_json};
use crate::context::ProjectContext;

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let db = ctx.connect()?;
    let migrator = ctx.migrator(db.as_ref())?;
    let current = migrator
        .current_version()
        .context("Failed to read the current version")?;

    let known = migrator
        .visible_versions()
        .iter()
        .any(|v| v.number() == current);
    let rows: Vec<StatusRow> = migrator
        .visible_versions()
        .iter()
        .filter(|v| !v.is_base())
        .map(|v| StatusRow {
            number: v.number(),
            name: v.name().to_string(),
            tags: format_tags(v.tags()),
            applied: v.number() <= current,
        })
        .collect();

    let report = StatusReport {
        project: ctx.config.name.clone(),
        database: ctx.target.database.path.clone(),
        marker: migrator.marker_description(),
        tag: ctx.target.tag.clone(),
        current,
        latest: migrator.latest_version(),
        current_is_known: known,
        versions: rows,
    };

    match args.output {
        OutputFormat::Table => print_status(&ctx, &report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatusReport {
    project: String,
    database: String,
    marker: String,
    tag: Option<String>,
    current: u32,
    latest: u32,
    current_is_known: bool,
    versions: Vec<StatusRow>,
}

#[derive(Debug, Serialize)]
struct StatusRow {
    number: u32,
    name: String,
    tags: String,
    applied: bool,
}

fn print_status(ctx: &ProjectContext, report: &StatusReport) {
    println!("Project:  {} ({})", report.project, ctx.root.display());
    println!("Database: {} [{}]", report.database, ctx.target.database.db_type);
    println!("Marker:   {}", report.marker);
    println!("Filter:   {}", ctx.tag_label());
    println!("Current:  {} (latest {})", report.current, report.latest);
    if !report.current_is_known {
        println!(
            "WARNING: version {} is not among the visible versions; migrate will refuse to run",
            report.current
        );
    }
    if report.versions.is_empty() {
        println!("No versions visible.");
        return;
    }
    println!();

    let name_width = column_width("NAME", report.versions.iter().map(|r| r.name.as_str()));
    let tags_width = column_width("TAGS", report.versions.iter().map(|r| r.tags.as_str()));

    println!(
        "{:>7}  {:<name_width$}  {:<tags_width$}  STATUS",
        "VERSION", "NAME", "TAGS"
    );
    println!(
        "{:->7}  {:-<name_width$}  {:-<tags_width$}  {:-<7}",
        "", "", "", ""
    );
    for row in &report.versions {
        let status = if row.applied { "applied" } else { "pending" };
        println!(
            "{:>7}  {:<name_width$}  {:<tags_width$}  {status}",
            row.number, row.name, row.tags
        );
    }
}
