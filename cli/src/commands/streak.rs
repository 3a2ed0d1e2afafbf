use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use aura_core::service::AuraService;

use super::helpers::confirm;

pub(crate) fn cmd_streak_show(svc: &AuraService, json: bool) -> Result<()> {
    let status = svc.streak_status(Local::now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let d = status.current.days;
    let h = status.current.hours;
    let m = status.current.minutes;
    let s = status.current.seconds;
    println!("Current streak: {d}d {h}h {m}m {s}s");

    let longest = status.longest_streak;
    let relapses = status.relapses;
    println!("Longest: {longest} days   Relapses: {relapses}");

    let started = DateTime::parse_from_rfc3339(&status.started_at)
        .with_context(|| format!("Invalid streak start timestamp '{}'", status.started_at))?;
    println!("Started: {}", started.format("%Y-%m-%d %H:%M"));

    Ok(())
}

pub(crate) fn cmd_streak_reset(svc: &AuraService, yes: bool, json: bool) -> Result<()> {
    if !yes && !confirm("Reset your streak and record a relapse?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let status = svc.reset_streak(Local::now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Streak reset. The timer starts again now.");
    let longest = status.longest_streak;
    let relapses = status.relapses;
    println!("Longest: {longest} days   Relapses: {relapses}");

    Ok(())
}
