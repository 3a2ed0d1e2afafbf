use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use aura_core::models::{Exercise, NewExercise, period_range};
use aura_core::service::AuraService;

use super::helpers::{json_error, parse_date, truncate};

pub(crate) fn cmd_exercise_add(
    svc: &AuraService,
    name: &str,
    category: &str,
    duration: i64,
    calories: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;

    let exercise = svc.add_exercise(&NewExercise {
        name: name.to_string(),
        category: category.to_string(),
        duration_min: duration,
        calories,
        date,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&exercise)?);
        return Ok(());
    }

    let id = exercise.id;
    let name = &exercise.name;
    let category = &exercise.category;
    let min = exercise.duration_min;
    println!("Added [{id}] {name} ({category}, {min} min) for {date}");

    Ok(())
}

pub(crate) fn cmd_exercise_list(
    svc: &AuraService,
    category: Option<&str>,
    period: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let reference = parse_date(date)?;
    let exercises = svc.list_exercises(category, period, reference)?;

    if exercises.is_empty() {
        if json {
            println!("[]");
        } else {
            let (start, end) = period_range(period, reference)?;
            if start == end {
                eprintln!("No exercises for {start}");
            } else {
                eprintln!("No exercises between {start} and {end}");
            }
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&exercises)?);
        return Ok(());
    }

    print_exercise_table(&exercises);

    let total = exercises.len();
    let completed = exercises.iter().filter(|e| e.completed).count();
    println!("{completed}/{total} completed");

    Ok(())
}

pub(crate) fn cmd_exercise_done(svc: &AuraService, id: i64, json: bool) -> Result<()> {
    if let Ok(exercise) = svc.complete_exercise(id) {
        if json {
            println!("{}", serde_json::to_string_pretty(&exercise)?);
        } else {
            let name = &exercise.name;
            if exercise.completed {
                println!("Completed [{id}] {name} ✓");
            } else {
                println!("Unchecked [{id}] {name}");
            }
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Exercise {id} not found")));
        } else {
            eprintln!("Exercise {id} not found");
        }
        process::exit(2);
    }
}

pub(crate) fn cmd_exercise_stats(
    svc: &AuraService,
    category: Option<&str>,
    period: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let reference = parse_date(date)?;
    let stats = svc.exercise_stats(category, period, reference)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let start = &stats.start_date;
    let end = &stats.end_date;
    if start == end {
        println!("=== {start} ===\n");
    } else {
        println!("=== {start} to {end} ===\n");
    }

    if let Some(category) = &stats.category {
        println!("  Category: {category}");
    }
    let completed = stats.completed;
    let total = stats.total;
    let calories = stats.calories_burned;
    let minutes = stats.minutes_active;
    println!("  Completed: {completed}/{total}");
    println!("  Calories burned: {calories:.0}");
    println!("  Minutes active: {minutes}");

    Ok(())
}

fn print_exercise_table(exercises: &[Exercise]) {
    #[derive(Tabled)]
    struct ExerciseRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Done")]
        done: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Min")]
        duration: i64,
        #[tabled(rename = "Cal")]
        calories: String,
        #[tabled(rename = "Date")]
        date: String,
    }

    let rows: Vec<ExerciseRow> = exercises
        .iter()
        .map(|e| ExerciseRow {
            id: e.id,
            done: if e.completed { "✓".to_string() } else { String::new() },
            name: truncate(&e.name, 30),
            category: e.category.clone(),
            duration: e.duration_min,
            calories: format!("{:.0}", e.calories),
            date: e.date.clone(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(0..1)).with(Alignment::right()))
        .with(Modify::new(Columns::new(4..6)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
