use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use aura_core::models::ExportData;
use aura_core::service::AuraService;

pub(crate) fn cmd_import_json(svc: &AuraService, path: &Path, json: bool) -> Result<()> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data: ExportData =
        serde_json::from_str(&body).context("Failed to parse export file")?;

    let summary = svc.import_all(&data)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Import complete.\n");
    println!("  Profile imported:   {}", yes_no(summary.profile_imported));
    println!("  Streak imported:    {}", yes_no(summary.streak_imported));
    println!("  Meals imported:     {}", summary.meals_imported);
    println!("  Exercises imported: {}", summary.exercises_imported);
    println!("  Routines imported:  {}", summary.routines_imported);
    println!("  Target imported:    {}", yes_no(summary.target_imported));

    Ok(())
}

pub(crate) fn cmd_import_csv(
    svc: &AuraService,
    path: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let csv_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let summary = svc.import_meals_csv(&csv_data, dry_run)?;

    if summary.rows_parsed == 0 {
        if json {
            println!(
                "{}",
                serde_json::json!({ "error": "No rows found in CSV file" })
            );
        } else {
            eprintln!("No rows found in CSV file.");
        }
        return Ok(());
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "dry_run": dry_run,
                "rows_parsed": summary.rows_parsed,
                "meals_imported": summary.meals_imported,
                "rows_skipped": summary.rows_skipped,
                "dates_spanned": summary.dates_spanned,
            })
        );
    } else if dry_run {
        println!("Dry run — no changes made.\n");
        println!("  Rows parsed:     {}", summary.rows_parsed);
        println!("  Meals to import: {}", summary.meals_imported);
        println!("  Rows skipped:    {}", summary.rows_skipped);
        println!("  Dates spanned:   {}", summary.dates_spanned);
    } else {
        println!("Import complete.\n");
        println!("  Rows parsed:    {}", summary.rows_parsed);
        println!("  Meals imported: {}", summary.meals_imported);
        println!("  Rows skipped:   {}", summary.rows_skipped);
        println!("  Dates spanned:  {}", summary.dates_spanned);
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
