use anyhow::Result;

use aura_core::models::DEFAULT_CALORIE_TARGET;
use aura_core::service::AuraService;

pub(crate) fn cmd_target_set(svc: &AuraService, calories: i64, json: bool) -> Result<()> {
    svc.set_calorie_target(calories)?;

    if json {
        println!("{}", serde_json::json!({ "target_calories": calories }));
    } else {
        println!("Daily target set to {calories} kcal");
    }

    Ok(())
}

pub(crate) fn cmd_target_show(svc: &AuraService, json: bool) -> Result<()> {
    let setting = svc.get_calorie_target_setting()?;

    if json {
        let target = setting.unwrap_or(DEFAULT_CALORIE_TARGET);
        println!(
            "{}",
            serde_json::json!({ "target_calories": target, "default": setting.is_none() })
        );
    } else if let Some(target) = setting {
        println!("Daily target: {target} kcal");
    } else {
        println!("Daily target: {DEFAULT_CALORIE_TARGET} kcal (default)");
    }

    Ok(())
}

pub(crate) fn cmd_target_clear(svc: &AuraService, json: bool) -> Result<()> {
    let cleared = svc.clear_calorie_target()?;

    if json {
        println!("{}", serde_json::json!({ "cleared": cleared }));
    } else if cleared {
        println!("Target cleared. Using the {DEFAULT_CALORIE_TARGET} kcal default.");
    } else {
        eprintln!("No target was set");
    }

    Ok(())
}
