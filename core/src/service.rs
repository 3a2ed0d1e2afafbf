use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};

use crate::csv_import::{self, CsvImportSummary};
use crate::db::Database;
use crate::models::{
    Dashboard, Exercise, ExerciseStats, ExportData, ImportSummary, Meal, NewExercise, NewMeal,
    NewProfile, NewRoutine, NutritionSummary, Profile, ProfileSummary, SkincareRoutine,
    SkincareStats, StreakRecord, StreakStatus, UpdateProfile, bmi_category, period_range,
    validate_category, validate_new_exercise, validate_new_meal, validate_new_profile,
    validate_new_routine, validate_profile_update, validate_time_of_day,
};

/// Facade over the database: validates input, resolves periods, and
/// assembles the dashboard. One instance per open data file.
pub struct AuraService {
    db: Database,
}

impl AuraService {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    // --- Profile ---

    pub fn create_profile(&self, profile: &NewProfile) -> Result<Profile> {
        validate_new_profile(profile)?;
        let normalized = NewProfile {
            gender: profile.gender.to_lowercase(),
            ..profile.clone()
        };
        self.db.create_profile(&normalized)
    }

    pub fn get_profile(&self) -> Result<Option<Profile>> {
        self.db.get_profile()
    }

    pub fn update_profile(&self, update: &UpdateProfile) -> Result<Profile> {
        validate_profile_update(update)?;
        let normalized = UpdateProfile {
            gender: update.gender.as_ref().map(|g| g.to_lowercase()),
            ..update.clone()
        };
        self.db.update_profile(&normalized)
    }

    pub fn add_goal(&self, goal: &str) -> Result<bool> {
        self.db.add_goal(goal)
    }

    pub fn remove_goal(&self, goal: &str) -> Result<bool> {
        self.db.remove_goal(goal)
    }

    // --- Meals ---

    pub fn log_meal(&self, meal: &NewMeal) -> Result<Meal> {
        validate_new_meal(meal)?;
        self.db.insert_meal(meal)
    }

    pub fn get_meals_for_date(&self, date: NaiveDate) -> Result<Vec<Meal>> {
        self.db.get_meals_for_date(date)
    }

    pub fn get_meal_history(&self, limit: i64) -> Result<Vec<Meal>> {
        self.db.get_meal_history(limit)
    }

    pub fn get_nutrition_summary(&self, date: NaiveDate) -> Result<NutritionSummary> {
        self.db.build_nutrition_summary(date)
    }

    // --- Exercises ---

    pub fn add_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        validate_new_exercise(exercise)?;
        let normalized = NewExercise {
            category: exercise.category.to_lowercase(),
            ..exercise.clone()
        };
        self.db.insert_exercise(&normalized)
    }

    pub fn complete_exercise(&self, id: i64) -> Result<Exercise> {
        self.db.toggle_exercise(id)
    }

    /// Exercises within a period window, optionally narrowed to a category.
    pub fn list_exercises(
        &self,
        category: Option<&str>,
        period: &str,
        reference: NaiveDate,
    ) -> Result<Vec<Exercise>> {
        let category = match category {
            Some(c) => Some(validate_category(c)?),
            None => None,
        };
        let (start, end) = period_range(period, reference)?;
        self.db.get_exercises(category.as_deref(), start, end)
    }

    pub fn exercise_stats(
        &self,
        category: Option<&str>,
        period: &str,
        reference: NaiveDate,
    ) -> Result<ExerciseStats> {
        let category = match category {
            Some(c) => Some(validate_category(c)?),
            None => None,
        };
        let (start, end) = period_range(period, reference)?;
        self.db.exercise_stats(category.as_deref(), start, end)
    }

    // --- Streak ---

    /// The streak singleton with its elapsed time resolved against `now`.
    /// First call starts the timer.
    pub fn streak_status(&self, now: DateTime<Local>) -> Result<StreakStatus> {
        let record = self.db.get_or_init_streak(now)?;
        self.status_from_record(&record, now)
    }

    pub fn reset_streak(&self, now: DateTime<Local>) -> Result<StreakStatus> {
        let record = self.db.reset_streak(now)?;
        self.status_from_record(&record, now)
    }

    fn status_from_record(
        &self,
        record: &StreakRecord,
        now: DateTime<Local>,
    ) -> Result<StreakStatus> {
        Ok(StreakStatus {
            started_at: record.started_at.clone(),
            current: record.breakdown_at(now)?,
            longest_streak: record.longest_streak,
            relapses: record.relapses,
        })
    }

    // --- Skincare ---

    pub fn add_routine(&self, routine: &NewRoutine) -> Result<SkincareRoutine> {
        validate_new_routine(routine)?;
        let normalized = NewRoutine {
            time_of_day: routine.time_of_day.to_lowercase(),
            ..routine.clone()
        };
        self.db.insert_routine(&normalized)
    }

    pub fn complete_routine(&self, id: i64) -> Result<SkincareRoutine> {
        self.db.toggle_routine(id)
    }

    pub fn get_routines_for_date(
        &self,
        date: NaiveDate,
        time_of_day: Option<&str>,
    ) -> Result<Vec<SkincareRoutine>> {
        let time = match time_of_day {
            Some(t) => Some(validate_time_of_day(t)?),
            None => None,
        };
        self.db.get_routines_for_date(date, time.as_deref())
    }

    pub fn skincare_stats(&self, date: NaiveDate) -> Result<SkincareStats> {
        self.db.skincare_stats_for_date(date)
    }

    // --- Calorie target ---

    pub fn set_calorie_target(&self, calories: i64) -> Result<()> {
        self.db.set_calorie_target(calories)
    }

    pub fn get_calorie_target(&self) -> Result<i64> {
        self.db.get_calorie_target()
    }

    /// The explicitly set target, if any. `None` means the default applies.
    pub fn get_calorie_target_setting(&self) -> Result<Option<i64>> {
        self.db.get_calorie_target_setting()
    }

    pub fn clear_calorie_target(&self) -> Result<bool> {
        self.db.clear_calorie_target()
    }

    // --- Dashboard ---

    /// Assemble the one-day overview: profile with BMI, nutrition totals,
    /// the day's exercise and skincare counts, and the live streak.
    pub fn build_dashboard(&self, date: NaiveDate, now: DateTime<Local>) -> Result<Dashboard> {
        let profile = self.db.get_profile()?.context("No profile found")?;
        let nutrition = self.db.build_nutrition_summary(date)?;
        let exercise = self.db.exercise_stats(None, date, date)?;
        let streak = self.streak_status(now)?;
        let skincare = self.skincare_stats(date)?;

        let bmi = profile.bmi();
        Ok(Dashboard {
            date: date.format("%Y-%m-%d").to_string(),
            profile: ProfileSummary {
                name: profile.name,
                age: profile.age,
                gender: profile.gender,
                weight_kg: profile.weight_kg,
                height_cm: profile.height_cm,
                bmi,
                bmi_category: bmi_category(bmi).to_string(),
            },
            nutrition,
            exercises_completed: exercise.completed,
            exercises_total: exercise.total,
            streak,
            skincare,
            goals: profile.goals,
        })
    }

    // --- CSV import ---

    pub fn import_meals_csv(&self, csv_data: &str, dry_run: bool) -> Result<CsvImportSummary> {
        let rows = csv_import::parse_meals_csv(csv_data.as_bytes())?;
        csv_import::import_meal_rows(&self.db, &rows, dry_run)
    }

    // --- Export / Import ---

    pub fn export_all(&self) -> Result<ExportData> {
        self.db.export_all()
    }

    pub fn import_all(&self, data: &ExportData) -> Result<ImportSummary> {
        self.db.import_all(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> NewProfile {
        NewProfile {
            name: "Alex".to_string(),
            age: 30,
            gender: "Other".to_string(),
            weight_kg: 70.0,
            height_cm: 175.0,
            goals: vec!["Better Sleep".to_string()],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn local(rfc3339: &str) -> DateTime<Local> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Local)
    }

    #[test]
    fn test_create_profile_normalizes_gender() {
        let svc = AuraService::new_in_memory().unwrap();
        let profile = svc.create_profile(&sample_profile()).unwrap();
        assert_eq!(profile.gender, "other");
    }

    #[test]
    fn test_create_profile_rejects_invalid() {
        let svc = AuraService::new_in_memory().unwrap();
        let mut bad = sample_profile();
        bad.age = -1;
        assert!(svc.create_profile(&bad).is_err());
        // Nothing was stored
        assert!(svc.get_profile().unwrap().is_none());
    }

    #[test]
    fn test_update_profile_validates_first() {
        let svc = AuraService::new_in_memory().unwrap();
        svc.create_profile(&sample_profile()).unwrap();

        let bad = UpdateProfile {
            weight_kg: Some(-2.0),
            ..UpdateProfile::default()
        };
        assert!(svc.update_profile(&bad).is_err());

        let ok = UpdateProfile {
            weight_kg: Some(68.0),
            ..UpdateProfile::default()
        };
        let updated = svc.update_profile(&ok).unwrap();
        assert_eq!(updated.weight_kg, 68.0);
    }

    #[test]
    fn test_log_meal_and_summary() {
        let svc = AuraService::new_in_memory().unwrap();
        let meal = svc
            .log_meal(&NewMeal {
                name: "Oatmeal".to_string(),
                date: date(2024, 6, 15),
                calories: 350.0,
                protein_g: 12.0,
                carbs_g: 60.0,
                fats_g: 7.0,
                notes: Some("with berries".to_string()),
                recipe: None,
            })
            .unwrap();
        assert_eq!(meal.date, "2024-06-15");

        let summary = svc.get_nutrition_summary(date(2024, 6, 15)).unwrap();
        assert_eq!(summary.meal_count, 1);
        assert!((summary.total_calories - 350.0).abs() < 0.01);
        assert_eq!(summary.target_calories, 2000);
    }

    #[test]
    fn test_log_meal_rejects_invalid() {
        let svc = AuraService::new_in_memory().unwrap();
        let bad = NewMeal {
            name: String::new(),
            date: date(2024, 6, 15),
            calories: 100.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fats_g: 0.0,
            notes: None,
            recipe: None,
        };
        assert!(svc.log_meal(&bad).is_err());
    }

    #[test]
    fn test_list_exercises_weekly_period() {
        let svc = AuraService::new_in_memory().unwrap();
        // 2024-06-15 is a Saturday; the Sunday-start week covers 06-09..06-15
        svc.add_exercise(&NewExercise {
            name: "Push-ups".to_string(),
            category: "Home".to_string(),
            duration_min: 15,
            calories: 80.0,
            date: date(2024, 6, 10),
        })
        .unwrap();
        svc.add_exercise(&NewExercise {
            name: "Run".to_string(),
            category: "cardio".to_string(),
            duration_min: 30,
            calories: 300.0,
            date: date(2024, 6, 8),
        })
        .unwrap();

        let week = svc.list_exercises(None, "weekly", date(2024, 6, 15)).unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].name, "Push-ups");
        // Category was normalized on the way in
        assert_eq!(week[0].category, "home");

        let cardio = svc
            .list_exercises(Some("cardio"), "monthly", date(2024, 6, 15))
            .unwrap();
        assert_eq!(cardio.len(), 1);
        assert_eq!(cardio[0].name, "Run");
    }

    #[test]
    fn test_list_exercises_rejects_bad_period() {
        let svc = AuraService::new_in_memory().unwrap();
        assert!(svc.list_exercises(None, "yearly", date(2024, 6, 15)).is_err());
        assert!(
            svc.list_exercises(Some("swimming"), "daily", date(2024, 6, 15))
                .is_err()
        );
    }

    #[test]
    fn test_exercise_stats_period() {
        let svc = AuraService::new_in_memory().unwrap();
        let ex = svc
            .add_exercise(&NewExercise {
                name: "Yoga Flow".to_string(),
                category: "yoga".to_string(),
                duration_min: 45,
                calories: 150.0,
                date: date(2024, 6, 12),
            })
            .unwrap();
        svc.complete_exercise(ex.id).unwrap();

        let stats = svc.exercise_stats(None, "weekly", date(2024, 6, 15)).unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.completed, 1);
        assert!((stats.calories_burned - 150.0).abs() < 0.01);
        assert_eq!(stats.minutes_active, 45);
        assert_eq!(stats.start_date, "2024-06-09");
        assert_eq!(stats.end_date, "2024-06-15");
    }

    #[test]
    fn test_streak_status_and_reset() {
        let svc = AuraService::new_in_memory().unwrap();
        let start = local("2024-06-15T08:00:00+00:00");

        let status = svc.streak_status(start).unwrap();
        assert_eq!(status.current.days, 0);
        assert_eq!(status.relapses, 0);

        // A day and a half later
        let status = svc.streak_status(local("2024-06-16T20:00:00+00:00")).unwrap();
        assert_eq!(status.current.days, 1);
        assert_eq!(status.current.hours, 12);

        let reset = svc.reset_streak(local("2024-06-16T20:00:00+00:00")).unwrap();
        assert_eq!(reset.longest_streak, 1);
        assert_eq!(reset.relapses, 1);
        assert_eq!(reset.current.days, 0);
        assert_eq!(reset.current.seconds, 0);
    }

    #[test]
    fn test_add_routine_normalizes_time() {
        let svc = AuraService::new_in_memory().unwrap();
        let routine = svc
            .add_routine(&NewRoutine {
                name: "Morning Glow".to_string(),
                time_of_day: "Morning".to_string(),
                products: vec!["Cleanser".to_string()],
                date: date(2024, 6, 15),
            })
            .unwrap();
        assert_eq!(routine.time_of_day, "morning");

        let morning = svc
            .get_routines_for_date(date(2024, 6, 15), Some("MORNING"))
            .unwrap();
        assert_eq!(morning.len(), 1);
    }

    #[test]
    fn test_calorie_target_default_set_clear() {
        let svc = AuraService::new_in_memory().unwrap();

        // Nothing set yet: the default applies
        assert_eq!(svc.get_calorie_target().unwrap(), 2000);
        assert_eq!(svc.get_calorie_target_setting().unwrap(), None);

        svc.set_calorie_target(1800).unwrap();
        assert_eq!(svc.get_calorie_target().unwrap(), 1800);
        assert_eq!(svc.get_calorie_target_setting().unwrap(), Some(1800));

        assert!(svc.clear_calorie_target().unwrap());
        assert_eq!(svc.get_calorie_target().unwrap(), 2000);
        assert!(!svc.clear_calorie_target().unwrap());
    }

    #[test]
    fn test_build_dashboard() {
        let svc = AuraService::new_in_memory().unwrap();
        svc.create_profile(&sample_profile()).unwrap();

        let d = date(2024, 6, 15);
        svc.log_meal(&NewMeal {
            name: "Oatmeal".to_string(),
            date: d,
            calories: 500.0,
            protein_g: 12.0,
            carbs_g: 60.0,
            fats_g: 7.0,
            notes: None,
            recipe: None,
        })
        .unwrap();
        let ex = svc
            .add_exercise(&NewExercise {
                name: "Push-ups".to_string(),
                category: "home".to_string(),
                duration_min: 15,
                calories: 80.0,
                date: d,
            })
            .unwrap();
        svc.complete_exercise(ex.id).unwrap();
        svc.add_exercise(&NewExercise {
            name: "Plank".to_string(),
            category: "home".to_string(),
            duration_min: 10,
            calories: 40.0,
            date: d,
        })
        .unwrap();
        svc.add_routine(&NewRoutine {
            name: "Morning Glow".to_string(),
            time_of_day: "morning".to_string(),
            products: vec!["Cleanser".to_string()],
            date: d,
        })
        .unwrap();

        let dashboard = svc.build_dashboard(d, local("2024-06-15T12:00:00+00:00")).unwrap();
        assert_eq!(dashboard.date, "2024-06-15");
        assert_eq!(dashboard.profile.name, "Alex");
        assert!((dashboard.profile.bmi - 22.857).abs() < 0.001);
        assert_eq!(dashboard.profile.bmi_category, "Normal");
        assert_eq!(dashboard.nutrition.meal_count, 1);
        assert_eq!(dashboard.nutrition.progress_pct, 25);
        // Only the day's exercises count
        assert_eq!(dashboard.exercises_completed, 1);
        assert_eq!(dashboard.exercises_total, 2);
        assert_eq!(dashboard.skincare.total, 1);
        assert_eq!(dashboard.skincare.completed, 0);
        assert_eq!(dashboard.goals, vec!["Better Sleep"]);
    }

    #[test]
    fn test_build_dashboard_without_profile_fails() {
        let svc = AuraService::new_in_memory().unwrap();
        assert!(
            svc.build_dashboard(date(2024, 6, 15), Local::now())
                .is_err()
        );
    }

    #[test]
    fn test_export_import_via_service() {
        let svc = AuraService::new_in_memory().unwrap();
        svc.create_profile(&sample_profile()).unwrap();
        svc.log_meal(&NewMeal {
            name: "Oatmeal".to_string(),
            date: date(2024, 6, 15),
            calories: 350.0,
            protein_g: 12.0,
            carbs_g: 60.0,
            fats_g: 7.0,
            notes: None,
            recipe: None,
        })
        .unwrap();

        let data = svc.export_all().unwrap();
        let other = AuraService::new_in_memory().unwrap();
        let summary = other.import_all(&data).unwrap();
        assert!(summary.profile_imported);
        assert_eq!(summary.meals_imported, 1);
    }
}
