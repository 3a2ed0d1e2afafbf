use anyhow::Result;
use std::process;

use aura_core::service::AuraService;

use super::helpers::{parse_date, progress_bar};

pub(crate) fn cmd_summary(svc: &AuraService, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let summary = svc.get_nutrition_summary(date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.meal_count == 0 {
        let date = &summary.date;
        eprintln!("No meals for {date}");
        process::exit(2);
    }

    let date = &summary.date;
    println!("=== {date} ===\n");

    let count = summary.meal_count;
    let plural = if count == 1 { "meal" } else { "meals" };
    let total = summary.total_calories;
    let target = summary.target_calories;
    let pct = summary.progress_pct;
    let bar = progress_bar(pct, 20);
    println!("  Calories: {total:.0} / {target} kcal ({count} {plural})");
    println!("  [{bar}] {pct}%");

    let remaining = summary.remaining_calories;
    if remaining < 0.0 {
        let over = -remaining;
        println!("  Over target by {over:.0} kcal");
    } else {
        println!("  Remaining: {remaining:.0} kcal");
    }

    let p = summary.total_protein_g;
    let c = summary.total_carbs_g;
    let f = summary.total_fats_g;
    println!("\n  Macros: P:{p:.0}g C:{c:.0}g F:{f:.0}g");

    Ok(())
}
