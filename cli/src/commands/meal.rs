use anyhow::{Result, bail};
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use aura_core::models::{Meal, NewMeal};
use aura_core::service::AuraService;

use super::helpers::{parse_date, truncate};

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_log(
    svc: &AuraService,
    name: &str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    date: Option<String>,
    notes: Option<String>,
    recipe: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;

    let meal = svc.log_meal(&NewMeal {
        name: name.to_string(),
        date,
        calories,
        protein_g: protein,
        carbs_g: carbs,
        fats_g: fats,
        notes,
        recipe,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
        return Ok(());
    }

    let id = meal.id;
    let name = &meal.name;
    let cal = meal.calories;
    let p = meal.protein_g;
    let c = meal.carbs_g;
    let f = meal.fats_g;
    println!("Logged [{id}] {name} — {cal:.0} kcal | P:{p:.1}g C:{c:.1}g F:{f:.1}g for {date}");
    if let Some(notes) = &meal.notes {
        println!("  Notes: {notes}");
    }

    Ok(())
}

pub(crate) fn cmd_meals(
    svc: &AuraService,
    date: Option<String>,
    last: Option<i64>,
    json: bool,
) -> Result<()> {
    let meals = match last {
        Some(n) => {
            if n <= 0 {
                bail!("--last must be a positive number");
            }
            let meals = svc.get_meal_history(n)?;
            if meals.is_empty() {
                if json {
                    println!("[]");
                } else {
                    eprintln!("No meals logged yet");
                }
                process::exit(2);
            }
            meals
        }
        None => {
            let date = parse_date(date)?;
            let meals = svc.get_meals_for_date(date)?;
            if meals.is_empty() {
                if json {
                    println!("[]");
                } else {
                    eprintln!("No meals for {date}");
                }
                process::exit(2);
            }
            meals
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
        return Ok(());
    }

    print_meals_table(&meals);

    let count = meals.len();
    let total: f64 = meals.iter().map(|m| m.calories).sum();
    println!("{count} meals, {total:.0} kcal");

    Ok(())
}

fn print_meals_table(meals: &[Meal]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fats")]
        fats: String,
        #[tabled(rename = "Notes")]
        notes: String,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            date: m.date.clone(),
            id: m.id,
            name: truncate(&m.name, 30),
            calories: format!("{:.0}", m.calories),
            protein: format!("{:.1} g", m.protein_g),
            carbs: format!("{:.1} g", m.carbs_g),
            fats: format!("{:.1} g", m.fats_g),
            notes: truncate(m.notes.as_deref().unwrap_or(""), 24),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .with(Modify::new(Columns::new(3..7)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
