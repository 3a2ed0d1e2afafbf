use anyhow::Result;
use chrono::Local;

use aura_core::service::AuraService;

use super::helpers::{parse_date, progress_bar};
use super::require_profile;

pub(crate) fn cmd_dashboard(svc: &AuraService, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    require_profile(svc, json)?;
    let dash = svc.build_dashboard(date, Local::now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    let day = &dash.date;
    println!("=== Dashboard — {day} ===\n");

    let name = &dash.profile.name;
    let age = dash.profile.age;
    let gender = &dash.profile.gender;
    let bmi = dash.profile.bmi;
    let category = &dash.profile.bmi_category;
    println!("  {name}, {age} ({gender}) — BMI {bmi:.1} ({category})");
    println!();

    let total = dash.nutrition.total_calories;
    let target = dash.nutrition.target_calories;
    let count = dash.nutrition.meal_count;
    let plural = if count == 1 { "meal" } else { "meals" };
    let pct = dash.nutrition.progress_pct;
    let bar = progress_bar(pct, 20);
    println!("  Calories: {total:.0} / {target} kcal ({count} {plural})");
    println!("  [{bar}] {pct}%");
    println!();

    let done = dash.exercises_completed;
    let planned = dash.exercises_total;
    println!("  Exercises: {done}/{planned} completed");

    let skin_done = dash.skincare.completed;
    let skin_total = dash.skincare.total;
    println!("  Skincare: {skin_done}/{skin_total} routines done");

    let d = dash.streak.current.days;
    let h = dash.streak.current.hours;
    let m = dash.streak.current.minutes;
    let s = dash.streak.current.seconds;
    let longest = dash.streak.longest_streak;
    println!("  Streak: {d}d {h}h {m}m {s}s (longest {longest} days)");

    if !dash.goals.is_empty() {
        println!();
        println!("  Goals: {}", dash.goals.join(", "));
    }

    Ok(())
}
