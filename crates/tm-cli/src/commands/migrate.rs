//! Migrate command implementation

use anyhow::{Context, Result};
use tm_engine::{MigrationReport, MigrationTarget, PlannedStep};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::context::ProjectContext;

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let db = ctx.connect()?;
    let migrator = ctx.migrator(db.as_ref())?;
    let target = args.to.map_or(MigrationTarget::Latest, MigrationTarget::Version);

    if args.dry_run {
        let plan = migrator
            .plan(target)
            .with_context(|| format!("Failed to plan migration to {target}"))?;
        print_plan(&plan);
        return Ok(());
    }

    let report = migrator
        .migrate(target)
        .with_context(|| format!("Migration to {target} failed ({})", ctx.tag_label()))?;
    print_report(&report);
    Ok(())
}

fn print_plan(plan: &[PlannedStep]) {
    if plan.is_empty() {
        println!("Nothing to migrate.");
        return;
    }
    println!("Would apply {} step(s):", plan.len());
    for step in plan {
        println!(
            "  {:<4} {:>6} -> {:<6} {}",
            step.direction,
            step.from,
            step.to,
            step.version.name()
        );
    }
}

fn print_report(report: &MigrationReport) {
    if report.is_noop() {
        println!("Already at version {}.", report.to);
        return;
    }
    for step in &report.steps {
        println!(
            "  {:<4} {:>6} -> {:<6} {} ({} statements)",
            step.direction, step.from, step.to, step.name, step.statements
        );
    }
    println!(
        "Migrated from version {} to {} in {} step(s).",
        report.from,
        report.to,
        report.steps.len()
    );
}
