use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub goals: Vec<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Profile {
    /// Body mass index from the stored weight and height.
    #[must_use]
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

#[must_use]
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

impl UpdateProfile {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.weight_kg.is_none()
            && self.height_cm.is_none()
    }
}

// --- Meal types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    pub date: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recipe: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub name: String,
    pub date: NaiveDate,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub notes: Option<String>,
    pub recipe: Option<String>,
}

/// One day's nutrition totals against the calorie target.
#[derive(Debug, Clone, Serialize)]
pub struct NutritionSummary {
    pub date: String,
    pub meal_count: i64,
    pub total_calories: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fats_g: f64,
    pub target_calories: i64,
    pub remaining_calories: f64,
    pub progress_pct: i64,
}

/// Percent of the calorie target consumed, capped at 100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_pct(consumed: f64, target: i64) -> i64 {
    if target <= 0 {
        return 0;
    }
    let pct = (consumed / target as f64 * 100.0).round() as i64;
    pct.clamp(0, 100)
}

// --- Exercise types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    pub category: String,
    pub duration_min: i64,
    pub calories: f64,
    pub completed: bool,
    pub date: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub category: String,
    pub duration_min: i64,
    pub calories: f64,
    pub date: NaiveDate,
}

/// Checklist counts over a filtered set of exercises. Calories and minutes
/// sum completed rows only.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseStats {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub total: i64,
    pub completed: i64,
    pub calories_burned: f64,
    pub minutes_active: i64,
}

// --- Streak types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRecord {
    pub started_at: String,
    pub longest_streak: i64,
    pub relapses: i64,
    #[serde(default)]
    pub updated_at: String,
}

impl StreakRecord {
    pub fn breakdown_at(&self, now: DateTime<Local>) -> Result<StreakBreakdown> {
        let started = DateTime::parse_from_rfc3339(&self.started_at)
            .with_context(|| format!("Invalid streak start timestamp '{}'", self.started_at))?;
        Ok(StreakBreakdown::from_seconds(
            now.timestamp() - started.timestamp(),
        ))
    }
}

/// Elapsed time since the streak started, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl StreakBreakdown {
    /// Negative elapsed time (clock rolled back past the start) clamps to zero.
    #[must_use]
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StreakStatus {
    pub started_at: String,
    pub current: StreakBreakdown,
    pub longest_streak: i64,
    pub relapses: i64,
}

// --- Skincare types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkincareRoutine {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    pub time_of_day: String,
    pub products: Vec<String>,
    pub completed: bool,
    pub date: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewRoutine {
    pub name: String,
    pub time_of_day: String,
    pub products: Vec<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkincareStats {
    pub date: String,
    pub completed: i64,
    pub total: i64,
}

// --- Dashboard types ---

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: f64,
    pub bmi_category: String,
}

/// Everything the dashboard renders for one day, assembled in a single pass.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub date: String,
    pub profile: ProfileSummary,
    pub nutrition: NutritionSummary,
    pub exercises_completed: i64,
    pub exercises_total: i64,
    pub streak: StreakStatus,
    pub skincare: SkincareStats,
    pub goals: Vec<String>,
}

// --- Export / Import types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: i64,
    pub exported_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub streak: Option<StreakRecord>,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
    pub skincare: Vec<SkincareRoutine>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub calorie_target: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_field_names)]
pub struct ImportSummary {
    pub profile_imported: bool,
    pub streak_imported: bool,
    pub meals_imported: i64,
    pub exercises_imported: i64,
    pub routines_imported: i64,
    pub target_imported: bool,
}

// --- Vocabularies and validation ---

pub const GENDERS: &[&str] = &["male", "female", "other"];

pub const EXERCISE_CATEGORIES: &[&str] = &["home", "gym", "cardio", "yoga"];

pub const ROUTINE_TIMES: &[&str] = &["morning", "evening"];

pub const PERIODS: &[&str] = &["daily", "weekly", "monthly"];

/// Goal choices offered at onboarding. Free-text goals are also accepted.
pub const GOAL_PRESETS: &[&str] = &[
    "Weight Loss",
    "Muscle Gain",
    "Better Sleep",
    "Mental Clarity",
    "Healthy Skin",
    "Increased Energy",
];

pub const DEFAULT_CALORIE_TARGET: i64 = 2000;

pub fn validate_gender(gender: &str) -> Result<String> {
    let lower = gender.to_lowercase();
    if GENDERS.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        bail!(
            "Invalid gender '{gender}'. Must be one of: {}",
            GENDERS.join(", ")
        )
    }
}

pub fn validate_category(category: &str) -> Result<String> {
    let lower = category.to_lowercase();
    if EXERCISE_CATEGORIES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        bail!(
            "Invalid category '{category}'. Must be one of: {}",
            EXERCISE_CATEGORIES.join(", ")
        )
    }
}

pub fn validate_time_of_day(time: &str) -> Result<String> {
    let lower = time.to_lowercase();
    if ROUTINE_TIMES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        bail!(
            "Invalid time of day '{time}'. Must be one of: {}",
            ROUTINE_TIMES.join(", ")
        )
    }
}

/// Validate a new profile: name present, age/weight/height positive, known gender.
pub fn validate_new_profile(profile: &NewProfile) -> Result<()> {
    if profile.name.trim().is_empty() {
        bail!("Name must not be empty");
    }
    if profile.age <= 0 {
        bail!("Age must be greater than 0");
    }
    validate_gender(&profile.gender)?;
    if profile.weight_kg <= 0.0 {
        bail!("Weight must be greater than 0");
    }
    if profile.height_cm <= 0.0 {
        bail!("Height must be greater than 0");
    }
    Ok(())
}

pub fn validate_profile_update(update: &UpdateProfile) -> Result<()> {
    if update.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
        bail!("Name must not be empty");
    }
    if update.age.is_some_and(|a| a <= 0) {
        bail!("Age must be greater than 0");
    }
    if let Some(gender) = &update.gender {
        validate_gender(gender)?;
    }
    if update.weight_kg.is_some_and(|w| w <= 0.0) {
        bail!("Weight must be greater than 0");
    }
    if update.height_cm.is_some_and(|h| h <= 0.0) {
        bail!("Height must be greater than 0");
    }
    Ok(())
}

/// Validate a new meal: name present, calories and macros non-negative.
pub fn validate_new_meal(meal: &NewMeal) -> Result<()> {
    if meal.name.trim().is_empty() {
        bail!("Meal name must not be empty");
    }
    if meal.calories < 0.0 {
        bail!("Calories must not be negative");
    }
    if meal.protein_g < 0.0 || meal.carbs_g < 0.0 || meal.fats_g < 0.0 {
        bail!("Macros must not be negative");
    }
    Ok(())
}

/// Validate a new exercise: name present, known category, positive duration,
/// non-negative calories.
pub fn validate_new_exercise(exercise: &NewExercise) -> Result<()> {
    if exercise.name.trim().is_empty() {
        bail!("Exercise name must not be empty");
    }
    validate_category(&exercise.category)?;
    if exercise.duration_min <= 0 {
        bail!("Duration must be greater than 0");
    }
    if exercise.calories < 0.0 {
        bail!("Calories must not be negative");
    }
    Ok(())
}

/// Validate a new skincare routine: name present, known time of day, at least
/// one product.
pub fn validate_new_routine(routine: &NewRoutine) -> Result<()> {
    if routine.name.trim().is_empty() {
        bail!("Routine name must not be empty");
    }
    validate_time_of_day(&routine.time_of_day)?;
    if routine.products.is_empty() {
        bail!("Routine must have at least one product");
    }
    Ok(())
}

/// Split a comma-separated product list, trimming whitespace and dropping
/// empty segments.
#[must_use]
pub fn parse_products(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn validate_record_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{date}'. Must be YYYY-MM-DD"))?;
    Ok(())
}

/// Validate an imported meal record: name, non-negative numbers, date format.
pub fn validate_import_meal(meal: &Meal) -> Result<()> {
    if meal.name.trim().is_empty() {
        bail!("Meal name must not be empty");
    }
    if meal.calories < 0.0 || meal.protein_g < 0.0 || meal.carbs_g < 0.0 || meal.fats_g < 0.0 {
        bail!("Meal calories and macros must not be negative");
    }
    validate_record_date(&meal.date)
}

/// Validate an imported exercise record.
pub fn validate_import_exercise(exercise: &Exercise) -> Result<()> {
    if exercise.name.trim().is_empty() {
        bail!("Exercise name must not be empty");
    }
    validate_category(&exercise.category)?;
    if exercise.duration_min <= 0 {
        bail!("Duration must be greater than 0");
    }
    if exercise.calories < 0.0 {
        bail!("Calories must not be negative");
    }
    validate_record_date(&exercise.date)
}

/// Validate an imported skincare routine record.
pub fn validate_import_routine(routine: &SkincareRoutine) -> Result<()> {
    if routine.name.trim().is_empty() {
        bail!("Routine name must not be empty");
    }
    validate_time_of_day(&routine.time_of_day)?;
    if routine.products.is_empty() {
        bail!("Routine must have at least one product");
    }
    validate_record_date(&routine.date)
}

// --- Period resolution ---

/// Resolve a period keyword against a reference date to an inclusive date
/// range. Weeks run Sunday through Saturday; months are calendar months.
pub fn period_range(period: &str, reference: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    match period.to_lowercase().as_str() {
        "daily" => Ok((reference, reference)),
        "weekly" => {
            let offset = i64::from(reference.weekday().num_days_from_sunday());
            let start = reference - Duration::days(offset);
            Ok((start, start + Duration::days(6)))
        }
        "monthly" => {
            let start = reference
                .with_day(1)
                .context("Invalid reference date for monthly period")?;
            let next_month = if start.month() == 12 {
                NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
            };
            let end = next_month
                .map(|d| d - Duration::days(1))
                .context("Invalid reference date for monthly period")?;
            Ok((start, end))
        }
        _ => bail!(
            "Invalid period '{period}'. Must be one of: {}",
            PERIODS.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        let profile = Profile {
            name: "Alex".to_string(),
            age: 30,
            gender: "other".to_string(),
            weight_kg: 70.0,
            height_cm: 175.0,
            goals: vec![],
            created_at: String::new(),
            updated_at: String::new(),
        };
        // 70 / 1.75^2 = 22.857...
        assert!((profile.bmi() - 22.857).abs() < 0.001);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(bmi_category(17.0), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal");
        assert_eq!(bmi_category(24.9), "Normal");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(29.9), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese");
    }

    #[test]
    fn test_progress_pct() {
        assert_eq!(progress_pct(0.0, 2000), 0);
        assert_eq!(progress_pct(500.0, 2000), 25);
        assert_eq!(progress_pct(2000.0, 2000), 100);
        // Over target caps at 100
        assert_eq!(progress_pct(3500.0, 2000), 100);
    }

    #[test]
    fn test_progress_pct_zero_target() {
        assert_eq!(progress_pct(500.0, 0), 0);
    }

    #[test]
    fn test_streak_breakdown_from_seconds() {
        // 2 days, 3 hours, 4 minutes, 5 seconds
        let total = 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5;
        let b = StreakBreakdown::from_seconds(total);
        assert_eq!(b.days, 2);
        assert_eq!(b.hours, 3);
        assert_eq!(b.minutes, 4);
        assert_eq!(b.seconds, 5);
    }

    #[test]
    fn test_streak_breakdown_zero() {
        let b = StreakBreakdown::from_seconds(0);
        assert_eq!(b.days, 0);
        assert_eq!(b.hours, 0);
        assert_eq!(b.minutes, 0);
        assert_eq!(b.seconds, 0);
    }

    #[test]
    fn test_streak_breakdown_negative_clamps() {
        let b = StreakBreakdown::from_seconds(-120);
        assert_eq!(b.days, 0);
        assert_eq!(b.seconds, 0);
    }

    #[test]
    fn test_streak_breakdown_at() {
        let record = StreakRecord {
            started_at: "2024-06-15T08:00:00+00:00".to_string(),
            longest_streak: 0,
            relapses: 0,
            updated_at: String::new(),
        };
        let now = DateTime::parse_from_rfc3339("2024-06-16T09:30:45+00:00")
            .unwrap()
            .with_timezone(&Local);
        let b = record.breakdown_at(now).unwrap();
        assert_eq!(b.days, 1);
        assert_eq!(b.hours, 1);
        assert_eq!(b.minutes, 30);
        assert_eq!(b.seconds, 45);
    }

    #[test]
    fn test_streak_breakdown_at_bad_timestamp() {
        let record = StreakRecord {
            started_at: "not-a-timestamp".to_string(),
            longest_streak: 0,
            relapses: 0,
            updated_at: String::new(),
        };
        assert!(record.breakdown_at(Local::now()).is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert_eq!(validate_gender("male").unwrap(), "male");
        assert_eq!(validate_gender("Female").unwrap(), "female");
        assert_eq!(validate_gender("OTHER").unwrap(), "other");
        assert!(validate_gender("unknown").is_err());
        assert!(validate_gender("").is_err());
    }

    #[test]
    fn test_validate_category() {
        assert_eq!(validate_category("home").unwrap(), "home");
        assert_eq!(validate_category("Gym").unwrap(), "gym");
        assert_eq!(validate_category("CARDIO").unwrap(), "cardio");
        assert_eq!(validate_category("yoga").unwrap(), "yoga");
        assert!(validate_category("swimming").is_err());
    }

    #[test]
    fn test_validate_time_of_day() {
        assert_eq!(validate_time_of_day("morning").unwrap(), "morning");
        assert_eq!(validate_time_of_day("Evening").unwrap(), "evening");
        assert!(validate_time_of_day("noon").is_err());
    }

    fn sample_profile() -> NewProfile {
        NewProfile {
            name: "Alex".to_string(),
            age: 30,
            gender: "other".to_string(),
            weight_kg: 70.0,
            height_cm: 175.0,
            goals: vec!["Better Sleep".to_string()],
        }
    }

    #[test]
    fn test_validate_new_profile_valid() {
        assert!(validate_new_profile(&sample_profile()).is_ok());
    }

    #[test]
    fn test_validate_new_profile_rejects_bad_fields() {
        let mut p = sample_profile();
        p.name = "  ".to_string();
        assert!(validate_new_profile(&p).is_err());

        let mut p = sample_profile();
        p.age = 0;
        assert!(validate_new_profile(&p).is_err());

        let mut p = sample_profile();
        p.gender = "robot".to_string();
        assert!(validate_new_profile(&p).is_err());

        let mut p = sample_profile();
        p.weight_kg = -1.0;
        assert!(validate_new_profile(&p).is_err());

        let mut p = sample_profile();
        p.height_cm = 0.0;
        assert!(validate_new_profile(&p).is_err());
    }

    #[test]
    fn test_validate_profile_update_empty_is_ok() {
        assert!(validate_profile_update(&UpdateProfile::default()).is_ok());
    }

    #[test]
    fn test_validate_profile_update_rejects_bad_fields() {
        let update = UpdateProfile {
            age: Some(-5),
            ..UpdateProfile::default()
        };
        assert!(validate_profile_update(&update).is_err());

        let update = UpdateProfile {
            gender: Some("robot".to_string()),
            ..UpdateProfile::default()
        };
        assert!(validate_profile_update(&update).is_err());
    }

    #[test]
    fn test_validate_new_meal() {
        let meal = NewMeal {
            name: "Oatmeal".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            calories: 350.0,
            protein_g: 12.0,
            carbs_g: 60.0,
            fats_g: 7.0,
            notes: None,
            recipe: None,
        };
        assert!(validate_new_meal(&meal).is_ok());

        let mut bad = meal.clone();
        bad.name = String::new();
        assert!(validate_new_meal(&bad).is_err());

        let mut bad = meal.clone();
        bad.calories = -10.0;
        assert!(validate_new_meal(&bad).is_err());

        let mut bad = meal;
        bad.protein_g = -1.0;
        assert!(validate_new_meal(&bad).is_err());
    }

    #[test]
    fn test_validate_new_exercise() {
        let exercise = NewExercise {
            name: "Push-ups".to_string(),
            category: "home".to_string(),
            duration_min: 15,
            calories: 80.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        };
        assert!(validate_new_exercise(&exercise).is_ok());

        let mut bad = exercise.clone();
        bad.duration_min = 0;
        assert!(validate_new_exercise(&bad).is_err());

        let mut bad = exercise;
        bad.category = "swimming".to_string();
        assert!(validate_new_exercise(&bad).is_err());
    }

    #[test]
    fn test_validate_new_routine() {
        let routine = NewRoutine {
            name: "Morning Glow".to_string(),
            time_of_day: "morning".to_string(),
            products: vec!["Cleanser".to_string(), "SPF".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        };
        assert!(validate_new_routine(&routine).is_ok());

        let mut bad = routine.clone();
        bad.products.clear();
        assert!(validate_new_routine(&bad).is_err());

        let mut bad = routine;
        bad.time_of_day = "noon".to_string();
        assert!(validate_new_routine(&bad).is_err());
    }

    #[test]
    fn test_parse_products() {
        assert_eq!(
            parse_products("Cleanser, Toner, SPF"),
            vec!["Cleanser", "Toner", "SPF"]
        );
        // Empty segments are dropped, order is preserved
        assert_eq!(parse_products("a,,b"), vec!["a", "b"]);
        assert_eq!(parse_products("  spaced  "), vec!["spaced"]);
        assert!(parse_products("").is_empty());
        assert!(parse_products(" , , ").is_empty());
    }

    fn sample_import_meal() -> Meal {
        Meal {
            id: 0,
            uuid: "abc".to_string(),
            name: "Oatmeal".to_string(),
            date: "2024-06-15".to_string(),
            calories: 350.0,
            protein_g: 12.0,
            carbs_g: 60.0,
            fats_g: 7.0,
            notes: None,
            recipe: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_validate_import_meal() {
        assert!(validate_import_meal(&sample_import_meal()).is_ok());

        let mut bad = sample_import_meal();
        bad.date = "June 15".to_string();
        assert!(validate_import_meal(&bad).is_err());

        let mut bad = sample_import_meal();
        bad.calories = -1.0;
        assert!(validate_import_meal(&bad).is_err());
    }

    #[test]
    fn test_validate_import_exercise() {
        let exercise = Exercise {
            id: 0,
            uuid: String::new(),
            name: "Squats".to_string(),
            category: "gym".to_string(),
            duration_min: 20,
            calories: 120.0,
            completed: false,
            date: "2024-06-15".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert!(validate_import_exercise(&exercise).is_ok());

        let mut bad = exercise.clone();
        bad.category = "parkour".to_string();
        assert!(validate_import_exercise(&bad).is_err());

        let mut bad = exercise;
        bad.date = "15/06/2024".to_string();
        assert!(validate_import_exercise(&bad).is_err());
    }

    #[test]
    fn test_validate_import_routine() {
        let routine = SkincareRoutine {
            id: 0,
            uuid: String::new(),
            name: "Evening Wind-down".to_string(),
            time_of_day: "evening".to_string(),
            products: vec!["Cleanser".to_string()],
            completed: false,
            date: "2024-06-15".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert!(validate_import_routine(&routine).is_ok());

        let mut bad = routine;
        bad.products.clear();
        assert!(validate_import_routine(&bad).is_err());
    }

    #[test]
    fn test_period_range_daily() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = period_range("daily", date).unwrap();
        assert_eq!(start, date);
        assert_eq!(end, date);
    }

    #[test]
    fn test_period_range_weekly_sunday_start() {
        // 2024-06-15 is a Saturday; its week runs Sun 06-09 through Sat 06-15
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = period_range("weekly", date).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        // A Sunday starts its own week
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let (start, end) = period_range("weekly", sunday).unwrap();
        assert_eq!(start, sunday);
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_period_range_monthly() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = period_range("monthly", date).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_period_range_monthly_december() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let (start, end) = period_range("monthly", date).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_period_range_case_insensitive() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(period_range("Weekly", date).is_ok());
        assert!(period_range("MONTHLY", date).is_ok());
    }

    #[test]
    fn test_period_range_invalid() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(period_range("yearly", date).is_err());
        assert!(period_range("", date).is_err());
    }
}
