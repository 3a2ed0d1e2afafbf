use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use aura_core::service::AuraService;

pub(crate) fn cmd_export(svc: &AuraService, out: Option<&Path>) -> Result<()> {
    let data = svc.export_all()?;
    let body = serde_json::to_string_pretty(&data)?;

    match out {
        Some(path) => {
            fs::write(path, &body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let meals = data.meals.len();
            let exercises = data.exercises.len();
            let routines = data.skincare.len();
            println!(
                "Exported {meals} meals, {exercises} exercises, and {routines} routines to {}",
                path.display()
            );
        }
        None => println!("{body}"),
    }

    Ok(())
}
