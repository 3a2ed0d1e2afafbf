use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use aura_core::models::{NewRoutine, SkincareRoutine, parse_products};
use aura_core::service::AuraService;

use super::helpers::{json_error, parse_date, truncate};

pub(crate) fn cmd_skincare_add(
    svc: &AuraService,
    name: &str,
    products: &str,
    time: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;

    let routine = svc.add_routine(&NewRoutine {
        name: name.to_string(),
        time_of_day: time.to_string(),
        products: parse_products(products),
        date,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routine)?);
        return Ok(());
    }

    let id = routine.id;
    let name = &routine.name;
    let time = &routine.time_of_day;
    let count = routine.products.len();
    let plural = if count == 1 { "product" } else { "products" };
    println!("Added [{id}] {name} ({time}, {count} {plural}) for {date}");

    Ok(())
}

pub(crate) fn cmd_skincare_list(
    svc: &AuraService,
    time: Option<&str>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let routines = svc.get_routines_for_date(date, time)?;

    if routines.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No routines for {date}");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&routines)?);
        return Ok(());
    }

    print_routine_table(&routines);

    let total = routines.len();
    let completed = routines.iter().filter(|r| r.completed).count();
    println!("{completed}/{total} completed");

    Ok(())
}

pub(crate) fn cmd_skincare_done(svc: &AuraService, id: i64, json: bool) -> Result<()> {
    if let Ok(routine) = svc.complete_routine(id) {
        if json {
            println!("{}", serde_json::to_string_pretty(&routine)?);
        } else {
            let name = &routine.name;
            if routine.completed {
                println!("Completed [{id}] {name} ✓");
            } else {
                println!("Unchecked [{id}] {name}");
            }
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Routine {id} not found")));
        } else {
            eprintln!("Routine {id} not found");
        }
        process::exit(2);
    }
}

fn print_routine_table(routines: &[SkincareRoutine]) {
    #[derive(Tabled)]
    struct RoutineRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Done")]
        done: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Products")]
        products: String,
    }

    let rows: Vec<RoutineRow> = routines
        .iter()
        .map(|r| RoutineRow {
            id: r.id,
            done: if r.completed { "✓".to_string() } else { String::new() },
            name: truncate(&r.name, 30),
            time: r.time_of_day.clone(),
            products: truncate(&r.products.join(", "), 40),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(0..1)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}
