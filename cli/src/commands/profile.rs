use anyhow::{Context, Result, bail};
use std::process;

use aura_core::models::{GOAL_PRESETS, NewProfile, Profile, UpdateProfile, bmi_category};
use aura_core::service::AuraService;

use super::helpers::{json_error, parse_goal_picks, prompt_line};
use super::require_profile;

pub(crate) fn cmd_init(svc: &AuraService, json: bool) -> Result<()> {
    if svc.get_profile()?.is_some() {
        bail!("A profile already exists. Use `aura profile set` to update it");
    }

    eprintln!("Let's set up your profile.\n");
    let name = prompt_line("Name: ")?;
    let age: i64 = prompt_line("Age: ")?
        .parse()
        .context("Invalid age. Enter a whole number")?;
    let gender = prompt_line("Gender (male/female/other): ")?;
    let weight_kg: f64 = prompt_line("Weight (kg): ")?
        .parse()
        .context("Invalid weight. Enter a number")?;
    let height_cm: f64 = prompt_line("Height (cm): ")?
        .parse()
        .context("Invalid height. Enter a number")?;

    eprintln!("\nPick your goals:");
    for (i, goal) in GOAL_PRESETS.iter().enumerate() {
        let n = i + 1;
        eprintln!("  {n}. {goal}");
    }
    let picks = prompt_line("\nGoals (comma-separated numbers, empty to skip): ")?;
    let goals = parse_goal_picks(&picks)?;

    let profile = svc.create_profile(&NewProfile {
        name,
        age,
        gender,
        weight_kg,
        height_cm,
        goals,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile_json(&profile))?);
    } else {
        let name = &profile.name;
        println!("\nWelcome, {name}! Your profile is ready.\n");
        print_profile(&profile);
    }

    Ok(())
}

pub(crate) fn cmd_profile_show(svc: &AuraService, json: bool) -> Result<()> {
    let profile = require_profile(svc, json)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile_json(&profile))?);
    } else {
        print_profile(&profile);
    }

    Ok(())
}

pub(crate) fn cmd_profile_set(
    svc: &AuraService,
    name: Option<String>,
    age: Option<i64>,
    gender: Option<String>,
    weight: Option<f64>,
    height: Option<f64>,
    json: bool,
) -> Result<()> {
    let update = UpdateProfile {
        name,
        age,
        gender,
        weight_kg: weight,
        height_cm: height,
    };
    if update.is_empty() {
        bail!(
            "Nothing to update. Provide at least one of --name, --age, --gender, --weight, or --height"
        );
    }

    require_profile(svc, json)?;
    let profile = svc.update_profile(&update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile_json(&profile))?);
    } else {
        println!("Profile updated.\n");
        print_profile(&profile);
    }

    Ok(())
}

pub(crate) fn cmd_goal_add(svc: &AuraService, goal: &str, json: bool) -> Result<()> {
    if goal.trim().is_empty() {
        bail!("Goal must not be empty");
    }
    require_profile(svc, json)?;
    let added = svc.add_goal(goal.trim())?;

    if json {
        println!("{}", serde_json::json!({ "goal": goal.trim(), "added": added }));
    } else if added {
        println!("Added goal: {}", goal.trim());
    } else {
        println!("Goal '{}' is already set", goal.trim());
    }

    Ok(())
}

pub(crate) fn cmd_goal_remove(svc: &AuraService, goal: &str, json: bool) -> Result<()> {
    require_profile(svc, json)?;
    if svc.remove_goal(goal.trim())? {
        if json {
            println!("{}", serde_json::json!({ "goal": goal.trim(), "removed": true }));
        } else {
            println!("Removed goal: {}", goal.trim());
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Goal '{}' not found", goal.trim())));
        } else {
            eprintln!("Goal '{}' not found", goal.trim());
        }
        process::exit(2);
    }
}

fn print_profile(profile: &Profile) {
    let bmi = profile.bmi();
    let category = bmi_category(bmi);
    let name = &profile.name;
    let age = profile.age;
    let gender = &profile.gender;
    let weight = profile.weight_kg;
    let height = profile.height_cm;
    println!("  {name}, {age} ({gender})");
    println!("  Weight: {weight:.1} kg   Height: {height:.1} cm");
    println!("  BMI: {bmi:.1} ({category})");
    if profile.goals.is_empty() {
        println!("  Goals: none yet");
    } else {
        println!("  Goals: {}", profile.goals.join(", "));
    }
}

fn profile_json(profile: &Profile) -> serde_json::Value {
    let bmi = profile.bmi();
    serde_json::json!({
        "name": profile.name,
        "age": profile.age,
        "gender": profile.gender,
        "weight_kg": profile.weight_kg,
        "height_cm": profile.height_cm,
        "bmi": bmi,
        "bmi_category": bmi_category(bmi),
        "goals": profile.goals,
        "created_at": profile.created_at,
        "updated_at": profile.updated_at,
    })
}
