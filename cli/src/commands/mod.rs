mod dashboard;
mod exercise;
mod export;
mod helpers;
mod import;
mod meal;
mod profile;
mod skincare;
mod streak;
mod summary;
mod target;

use std::process;

use anyhow::Result;

use aura_core::models::Profile;
use aura_core::service::AuraService;

pub(crate) use dashboard::cmd_dashboard;
pub(crate) use exercise::{
    cmd_exercise_add, cmd_exercise_done, cmd_exercise_list, cmd_exercise_stats,
};
pub(crate) use export::cmd_export;
pub(crate) use import::{cmd_import_csv, cmd_import_json};
pub(crate) use meal::{cmd_log, cmd_meals};
pub(crate) use profile::{
    cmd_goal_add, cmd_goal_remove, cmd_init, cmd_profile_set, cmd_profile_show,
};
pub(crate) use skincare::{cmd_skincare_add, cmd_skincare_done, cmd_skincare_list};
pub(crate) use streak::{cmd_streak_reset, cmd_streak_show};
pub(crate) use summary::cmd_summary;
pub(crate) use target::{cmd_target_clear, cmd_target_set, cmd_target_show};

/// Fetch the profile, or exit pointing the user at `aura init`.
pub(super) fn require_profile(svc: &AuraService, json: bool) -> Result<Profile> {
    if let Some(profile) = svc.get_profile()? {
        return Ok(profile);
    }
    if json {
        println!(
            "{}",
            helpers::json_error("No profile found. Run `aura init` to create one")
        );
    } else {
        eprintln!("No profile found. Run `aura init` to create one.");
    }
    process::exit(2);
}
