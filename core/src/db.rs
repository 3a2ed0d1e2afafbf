use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, params};
use uuid::Uuid;

use crate::models::{
    DEFAULT_CALORIE_TARGET, Exercise, ExerciseStats, ExportData, ImportSummary, Meal, NewExercise,
    NewMeal, NewProfile, NewRoutine, NutritionSummary, Profile, SkincareRoutine, SkincareStats,
    StreakRecord, UpdateProfile, progress_pct, validate_import_exercise, validate_import_meal,
    validate_import_routine,
};

const EXPORT_VERSION: i64 = 1;
const CALORIE_TARGET_KEY: &str = "calorie_target";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS profile (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    name TEXT NOT NULL,
                    age INTEGER NOT NULL,
                    gender TEXT NOT NULL,
                    weight_kg REAL NOT NULL,
                    height_cm REAL NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS profile_goals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    goal TEXT NOT NULL UNIQUE,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS meals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    date TEXT NOT NULL,
                    calories REAL NOT NULL,
                    protein_g REAL NOT NULL DEFAULT 0,
                    carbs_g REAL NOT NULL DEFAULT 0,
                    fats_g REAL NOT NULL DEFAULT 0,
                    notes TEXT,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS exercises (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    category TEXT NOT NULL,
                    duration_min INTEGER NOT NULL,
                    calories REAL NOT NULL DEFAULT 0,
                    completed INTEGER NOT NULL DEFAULT 0,
                    date TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS skincare_routines (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    time_of_day TEXT NOT NULL,
                    completed INTEGER NOT NULL DEFAULT 0,
                    date TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS skincare_products (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    routine_id INTEGER NOT NULL REFERENCES skincare_routines(id) ON DELETE CASCADE,
                    position INTEGER NOT NULL,
                    name TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS streak (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    started_at TEXT NOT NULL,
                    longest_streak INTEGER NOT NULL DEFAULT 0,
                    relapses INTEGER NOT NULL DEFAULT 0,
                    updated_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_meals_date ON meals(date);
                CREATE INDEX IF NOT EXISTS idx_exercises_date ON exercises(date);
                CREATE INDEX IF NOT EXISTS idx_skincare_date ON skincare_routines(date);
                CREATE INDEX IF NOT EXISTS idx_skincare_products_routine ON skincare_products(routine_id);

                PRAGMA user_version = 1;",
            )?;
        }

        if version < 2 {
            self.conn.execute_batch(
                "ALTER TABLE meals ADD COLUMN recipe TEXT;
                 PRAGMA user_version = 2;",
            )?;
        }

        if version < 3 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS user_settings (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
                );

                PRAGMA user_version = 3;",
            )?;
        }

        Ok(())
    }

    // --- Row mapping helpers ---

    // Expects columns:
    // 0: id, 1: uuid, 2: name, 3: date, 4: calories, 5: protein_g,
    // 6: carbs_g, 7: fats_g, 8: notes, 9: recipe, 10: created_at
    fn meal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Meal> {
        Ok(Meal {
            id: row.get(0)?,
            uuid: row.get(1)?,
            name: row.get(2)?,
            date: row.get(3)?,
            calories: row.get(4)?,
            protein_g: row.get(5)?,
            carbs_g: row.get(6)?,
            fats_g: row.get(7)?,
            notes: row.get(8)?,
            recipe: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn exercise_from_row(row: &rusqlite::Row) -> rusqlite::Result<Exercise> {
        Ok(Exercise {
            id: row.get(0)?,
            uuid: row.get(1)?,
            name: row.get(2)?,
            category: row.get(3)?,
            duration_min: row.get(4)?,
            calories: row.get(5)?,
            completed: row.get(6)?,
            date: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    // Products are loaded separately; the row carries everything else.
    fn routine_from_row(row: &rusqlite::Row) -> rusqlite::Result<SkincareRoutine> {
        Ok(SkincareRoutine {
            id: row.get(0)?,
            uuid: row.get(1)?,
            name: row.get(2)?,
            time_of_day: row.get(3)?,
            products: Vec::new(),
            completed: row.get(4)?,
            date: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn streak_from_row(row: &rusqlite::Row) -> rusqlite::Result<StreakRecord> {
        Ok(StreakRecord {
            started_at: row.get(0)?,
            longest_streak: row.get(1)?,
            relapses: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }

    // --- Profile ---

    pub fn create_profile(&self, profile: &NewProfile) -> Result<Profile> {
        if self.get_profile()?.is_some() {
            bail!("A profile already exists");
        }
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO profile (id, name, age, gender, weight_kg, height_cm, created_at, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                profile.name,
                profile.age,
                profile.gender,
                profile.weight_kg,
                profile.height_cm,
                now,
            ],
        )?;
        for goal in &profile.goals {
            self.add_goal(goal)?;
        }
        self.get_profile()?.context("Profile not found")
    }

    pub fn get_profile(&self) -> Result<Option<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, age, gender, weight_kg, height_cm, created_at, updated_at
             FROM profile WHERE id = 1",
        )?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            let mut profile = Profile {
                name: row.get(0)?,
                age: row.get(1)?,
                gender: row.get(2)?,
                weight_kg: row.get(3)?,
                height_cm: row.get(4)?,
                goals: Vec::new(),
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            };
            profile.goals = self.get_goals()?;
            Ok(Some(profile))
        } else {
            Ok(None)
        }
    }

    pub fn update_profile(&self, update: &UpdateProfile) -> Result<Profile> {
        if self.get_profile()?.is_none() {
            bail!("No profile found");
        }

        let now = Local::now().to_rfc3339();
        if let Some(ref name) = update.name {
            self.conn.execute(
                "UPDATE profile SET name = ?1, updated_at = ?2 WHERE id = 1",
                params![name, now],
            )?;
        }
        if let Some(age) = update.age {
            self.conn.execute(
                "UPDATE profile SET age = ?1, updated_at = ?2 WHERE id = 1",
                params![age, now],
            )?;
        }
        if let Some(ref gender) = update.gender {
            self.conn.execute(
                "UPDATE profile SET gender = ?1, updated_at = ?2 WHERE id = 1",
                params![gender, now],
            )?;
        }
        if let Some(weight_kg) = update.weight_kg {
            self.conn.execute(
                "UPDATE profile SET weight_kg = ?1, updated_at = ?2 WHERE id = 1",
                params![weight_kg, now],
            )?;
        }
        if let Some(height_cm) = update.height_cm {
            self.conn.execute(
                "UPDATE profile SET height_cm = ?1, updated_at = ?2 WHERE id = 1",
                params![height_cm, now],
            )?;
        }

        self.get_profile()?.context("No profile found")
    }

    pub fn add_goal(&self, goal: &str) -> Result<bool> {
        let now = Local::now().to_rfc3339();
        let rows = self.conn.execute(
            "INSERT OR IGNORE INTO profile_goals (goal, created_at) VALUES (?1, ?2)",
            params![goal, now],
        )?;
        Ok(rows > 0)
    }

    pub fn remove_goal(&self, goal: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM profile_goals WHERE goal = ?1", params![goal])?;
        Ok(rows > 0)
    }

    pub fn get_goals(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT goal FROM profile_goals ORDER BY id")?;
        let goals = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    // --- Meals ---

    pub fn insert_meal(&self, meal: &NewMeal) -> Result<Meal> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = meal.date.format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO meals (uuid, name, date, calories, protein_g, carbs_g, fats_g, notes, recipe, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                uuid,
                meal.name,
                date_str,
                meal.calories,
                meal.protein_g,
                meal.carbs_g,
                meal.fats_g,
                meal.notes,
                meal.recipe,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_meal(id)
    }

    pub fn get_meal(&self, id: i64) -> Result<Meal> {
        self.conn
            .query_row(
                "SELECT id, uuid, name, date, calories, protein_g, carbs_g, fats_g, notes, recipe, created_at
                 FROM meals WHERE id = ?1",
                params![id],
                Self::meal_from_row,
            )
            .with_context(|| format!("Meal {id} not found"))
    }

    pub fn get_meals_for_date(&self, date: NaiveDate) -> Result<Vec<Meal>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, name, date, calories, protein_g, carbs_g, fats_g, notes, recipe, created_at
             FROM meals WHERE date = ?1 ORDER BY id",
        )?;
        let meals = stmt
            .query_map(params![date_str], Self::meal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    /// Most recent meals across all dates, newest first.
    pub fn get_meal_history(&self, limit: i64) -> Result<Vec<Meal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, name, date, calories, protein_g, carbs_g, fats_g, notes, recipe, created_at
             FROM meals ORDER BY date DESC, id DESC LIMIT ?1",
        )?;
        let meals = stmt
            .query_map(params![limit], Self::meal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn build_nutrition_summary(&self, date: NaiveDate) -> Result<NutritionSummary> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let (calories, protein, carbs, fats, meal_count): (f64, f64, f64, f64, i64) =
            self.conn.query_row(
                "SELECT COALESCE(SUM(calories), 0),
                        COALESCE(SUM(protein_g), 0),
                        COALESCE(SUM(carbs_g), 0),
                        COALESCE(SUM(fats_g), 0),
                        COUNT(*)
                 FROM meals
                 WHERE date = ?1",
                params![date_str],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )?;

        let target = self.get_calorie_target()?;

        Ok(NutritionSummary {
            date: date_str,
            meal_count,
            total_calories: calories,
            total_protein_g: protein,
            total_carbs_g: carbs,
            total_fats_g: fats,
            target_calories: target,
            remaining_calories: target as f64 - calories,
            progress_pct: progress_pct(calories, target),
        })
    }

    // --- Exercises ---

    pub fn insert_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = exercise.date.format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO exercises (uuid, name, category, duration_min, calories, completed, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?7)",
            params![
                uuid,
                exercise.name,
                exercise.category,
                exercise.duration_min,
                exercise.calories,
                date_str,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_exercise(id)
    }

    pub fn get_exercise(&self, id: i64) -> Result<Exercise> {
        self.conn
            .query_row(
                "SELECT id, uuid, name, category, duration_min, calories, completed, date, created_at, updated_at
                 FROM exercises WHERE id = ?1",
                params![id],
                Self::exercise_from_row,
            )
            .with_context(|| format!("Exercise {id} not found"))
    }

    /// Flip the completion flag in place and return the updated row.
    pub fn toggle_exercise(&self, id: i64) -> Result<Exercise> {
        self.get_exercise(id)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "UPDATE exercises SET completed = 1 - completed, updated_at = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        self.get_exercise(id)
    }

    pub fn get_exercises(
        &self,
        category: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Exercise>> {
        let start_str = start.format("%Y-%m-%d").to_string();
        let end_str = end.format("%Y-%m-%d").to_string();
        let exercises = if let Some(category) = category {
            let mut stmt = self.conn.prepare(
                "SELECT id, uuid, name, category, duration_min, calories, completed, date, created_at, updated_at
                 FROM exercises
                 WHERE date >= ?1 AND date <= ?2 AND category = ?3
                 ORDER BY id",
            )?;
            stmt.query_map(params![start_str, end_str, category], Self::exercise_from_row)?
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let mut stmt = self.conn.prepare(
                "SELECT id, uuid, name, category, duration_min, calories, completed, date, created_at, updated_at
                 FROM exercises
                 WHERE date >= ?1 AND date <= ?2
                 ORDER BY id",
            )?;
            stmt.query_map(params![start_str, end_str], Self::exercise_from_row)?
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(exercises)
    }

    /// Checklist stats over a date range. Calories and minutes count
    /// completed exercises only.
    pub fn exercise_stats(
        &self,
        category: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ExerciseStats> {
        let start_str = start.format("%Y-%m-%d").to_string();
        let end_str = end.format("%Y-%m-%d").to_string();
        let map_row = |row: &rusqlite::Row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        };
        let (total, completed, calories_burned, minutes_active) =
            if let Some(category) = category {
                self.conn.query_row(
                    "SELECT COUNT(*),
                            COALESCE(SUM(completed), 0),
                            COALESCE(SUM(CASE WHEN completed = 1 THEN calories ELSE 0 END), 0),
                            COALESCE(SUM(CASE WHEN completed = 1 THEN duration_min ELSE 0 END), 0)
                     FROM exercises
                     WHERE date >= ?1 AND date <= ?2 AND category = ?3",
                    params![start_str, end_str, category],
                    map_row,
                )?
            } else {
                self.conn.query_row(
                    "SELECT COUNT(*),
                            COALESCE(SUM(completed), 0),
                            COALESCE(SUM(CASE WHEN completed = 1 THEN calories ELSE 0 END), 0),
                            COALESCE(SUM(CASE WHEN completed = 1 THEN duration_min ELSE 0 END), 0)
                     FROM exercises
                     WHERE date >= ?1 AND date <= ?2",
                    params![start_str, end_str],
                    map_row,
                )?
            };

        Ok(ExerciseStats {
            start_date: start_str,
            end_date: end_str,
            category: category.map(ToString::to_string),
            total,
            completed,
            calories_burned,
            minutes_active,
        })
    }

    // --- Streak ---

    fn get_streak(&self) -> Result<Option<StreakRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT started_at, longest_streak, relapses, updated_at FROM streak WHERE id = 1",
        )?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::streak_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Fetch the streak singleton, creating it (starting now) on first use.
    pub fn get_or_init_streak(&self, now: DateTime<Local>) -> Result<StreakRecord> {
        if let Some(record) = self.get_streak()? {
            return Ok(record);
        }
        let now_str = now.to_rfc3339();
        self.conn.execute(
            "INSERT INTO streak (id, started_at, longest_streak, relapses, updated_at)
             VALUES (1, ?1, 0, 0, ?1)",
            params![now_str],
        )?;
        self.get_streak()?.context("Streak record not found")
    }

    /// Reset the habit timer: the elapsed whole-day count is captured into
    /// the longest streak before the start timestamp moves to `now`.
    pub fn reset_streak(&self, now: DateTime<Local>) -> Result<StreakRecord> {
        let record = self.get_or_init_streak(now)?;
        let elapsed_days = record.breakdown_at(now)?.days;
        let longest = record.longest_streak.max(elapsed_days);
        let now_str = now.to_rfc3339();
        self.conn.execute(
            "UPDATE streak
             SET started_at = ?1, longest_streak = ?2, relapses = relapses + 1, updated_at = ?1
             WHERE id = 1",
            params![now_str, longest],
        )?;
        self.get_streak()?.context("Streak record not found")
    }

    // --- Skincare ---

    #[allow(clippy::cast_possible_wrap)]
    pub fn insert_routine(&self, routine: &NewRoutine) -> Result<SkincareRoutine> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = routine.date.format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO skincare_routines (uuid, name, time_of_day, completed, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, 0, ?4, ?5, ?5)",
            params![uuid, routine.name, routine.time_of_day, date_str, now],
        )?;
        let id = self.conn.last_insert_rowid();
        for (position, product) in routine.products.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO skincare_products (routine_id, position, name) VALUES (?1, ?2, ?3)",
                params![id, position as i64, product],
            )?;
        }
        self.get_routine(id)
    }

    pub fn get_routine(&self, id: i64) -> Result<SkincareRoutine> {
        let mut routine = self
            .conn
            .query_row(
                "SELECT id, uuid, name, time_of_day, completed, date, created_at, updated_at
                 FROM skincare_routines WHERE id = ?1",
                params![id],
                Self::routine_from_row,
            )
            .with_context(|| format!("Routine {id} not found"))?;
        routine.products = self.get_products(routine.id)?;
        Ok(routine)
    }

    /// Flip the completion flag in place and return the updated row.
    pub fn toggle_routine(&self, id: i64) -> Result<SkincareRoutine> {
        self.get_routine(id)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "UPDATE skincare_routines SET completed = 1 - completed, updated_at = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        self.get_routine(id)
    }

    pub fn get_routines_for_date(
        &self,
        date: NaiveDate,
        time_of_day: Option<&str>,
    ) -> Result<Vec<SkincareRoutine>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let mut routines = if let Some(time) = time_of_day {
            let mut stmt = self.conn.prepare(
                "SELECT id, uuid, name, time_of_day, completed, date, created_at, updated_at
                 FROM skincare_routines
                 WHERE date = ?1 AND time_of_day = ?2
                 ORDER BY id",
            )?;
            stmt.query_map(params![date_str, time], Self::routine_from_row)?
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let mut stmt = self.conn.prepare(
                "SELECT id, uuid, name, time_of_day, completed, date, created_at, updated_at
                 FROM skincare_routines
                 WHERE date = ?1
                 ORDER BY id",
            )?;
            stmt.query_map(params![date_str], Self::routine_from_row)?
                .collect::<Result<Vec<_>, _>>()?
        };
        for routine in &mut routines {
            routine.products = self.get_products(routine.id)?;
        }
        Ok(routines)
    }

    pub fn skincare_stats_for_date(&self, date: NaiveDate) -> Result<SkincareStats> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let (total, completed): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(completed), 0)
             FROM skincare_routines
             WHERE date = ?1",
            params![date_str],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(SkincareStats {
            date: date_str,
            completed,
            total,
        })
    }

    fn get_products(&self, routine_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM skincare_products WHERE routine_id = ?1 ORDER BY position")?;
        let products = stmt
            .query_map(params![routine_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    // --- User Settings ---

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO user_settings (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM user_settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn delete_setting(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM user_settings WHERE key = ?1", params![key])?;
        Ok(rows > 0)
    }

    /// The stored daily calorie target, if one has been set.
    pub fn get_calorie_target_setting(&self) -> Result<Option<i64>> {
        match self.get_setting(CALORIE_TARGET_KEY)? {
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .with_context(|| format!("Invalid stored calorie target '{value}'")),
            None => Ok(None),
        }
    }

    /// The stored daily calorie target, or the default when unset.
    pub fn get_calorie_target(&self) -> Result<i64> {
        Ok(self
            .get_calorie_target_setting()?
            .unwrap_or(DEFAULT_CALORIE_TARGET))
    }

    pub fn set_calorie_target(&self, calories: i64) -> Result<()> {
        if calories <= 0 {
            bail!("Calorie target must be greater than 0");
        }
        self.set_setting(CALORIE_TARGET_KEY, &calories.to_string())
    }

    pub fn clear_calorie_target(&self) -> Result<bool> {
        self.delete_setting(CALORIE_TARGET_KEY)
    }

    // --- Export / Import ---

    fn get_all_meals(&self) -> Result<Vec<Meal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, name, date, calories, protein_g, carbs_g, fats_g, notes, recipe, created_at
             FROM meals ORDER BY id",
        )?;
        let meals = stmt
            .query_map([], Self::meal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    fn get_all_exercises(&self) -> Result<Vec<Exercise>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, name, category, duration_min, calories, completed, date, created_at, updated_at
             FROM exercises ORDER BY id",
        )?;
        let exercises = stmt
            .query_map([], Self::exercise_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    fn get_all_routines(&self) -> Result<Vec<SkincareRoutine>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, name, time_of_day, completed, date, created_at, updated_at
             FROM skincare_routines ORDER BY id",
        )?;
        let mut routines = stmt
            .query_map([], Self::routine_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        for routine in &mut routines {
            routine.products = self.get_products(routine.id)?;
        }
        Ok(routines)
    }

    pub fn export_all(&self) -> Result<ExportData> {
        let profile = self.get_profile()?;
        let streak = self.get_streak()?;
        let meals = self.get_all_meals()?;
        let exercises = self.get_all_exercises()?;
        let skincare = self.get_all_routines()?;
        let calorie_target = self.get_calorie_target_setting()?;

        Ok(ExportData {
            version: EXPORT_VERSION,
            exported_at: Local::now().to_rfc3339(),
            profile,
            streak,
            meals,
            exercises,
            skincare,
            calorie_target,
        })
    }

    /// Merge an export document into this database. Rows whose uuid is
    /// already present are skipped; the profile and streak singletons are
    /// only adopted when absent.
    pub fn import_all(&self, data: &ExportData) -> Result<ImportSummary> {
        if data.version != EXPORT_VERSION {
            bail!(
                "Unsupported export version {} (expected {EXPORT_VERSION})",
                data.version
            );
        }

        let profile_imported = if let Some(profile) = &data.profile {
            self.import_profile(profile)?
        } else {
            false
        };
        let streak_imported = if let Some(streak) = &data.streak {
            self.import_streak(streak)?
        } else {
            false
        };
        let meals_imported = self.import_meals(&data.meals)?;
        let exercises_imported = self.import_exercises(&data.exercises)?;
        let routines_imported = self.import_routines(&data.skincare)?;
        let target_imported = if let Some(target) = data.calorie_target {
            if self.get_setting(CALORIE_TARGET_KEY)?.is_none() {
                self.set_calorie_target(target)?;
                true
            } else {
                false
            }
        } else {
            false
        };

        Ok(ImportSummary {
            profile_imported,
            streak_imported,
            meals_imported,
            exercises_imported,
            routines_imported,
            target_imported,
        })
    }

    fn import_profile(&self, profile: &Profile) -> Result<bool> {
        if self.get_profile()?.is_some() {
            return Ok(false);
        }
        if profile.name.trim().is_empty() {
            bail!("Imported profile name must not be empty");
        }
        // Keep the original timestamps; fall back when the export predates updated_at
        let updated_at = if profile.updated_at.is_empty() {
            profile.created_at.clone()
        } else {
            profile.updated_at.clone()
        };
        self.conn.execute(
            "INSERT INTO profile (id, name, age, gender, weight_kg, height_cm, created_at, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                profile.name,
                profile.age,
                profile.gender,
                profile.weight_kg,
                profile.height_cm,
                profile.created_at,
                updated_at,
            ],
        )?;
        for goal in &profile.goals {
            self.add_goal(goal)?;
        }
        Ok(true)
    }

    fn import_streak(&self, record: &StreakRecord) -> Result<bool> {
        if self.get_streak()?.is_some() {
            return Ok(false);
        }
        DateTime::parse_from_rfc3339(&record.started_at).with_context(|| {
            format!("Invalid imported streak start '{}'", record.started_at)
        })?;
        let updated_at = if record.updated_at.is_empty() {
            record.started_at.clone()
        } else {
            record.updated_at.clone()
        };
        self.conn.execute(
            "INSERT INTO streak (id, started_at, longest_streak, relapses, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![
                record.started_at,
                record.longest_streak,
                record.relapses,
                updated_at,
            ],
        )?;
        Ok(true)
    }

    fn uuid_exists(&self, table: &str, uuid: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE uuid = ?1"),
            params![uuid],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn import_meals(&self, meals: &[Meal]) -> Result<i64> {
        let mut count: i64 = 0;
        for meal in meals {
            if !meal.uuid.is_empty() && self.uuid_exists("meals", &meal.uuid)? {
                continue;
            }
            validate_import_meal(meal)?;
            let uuid = if meal.uuid.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                meal.uuid.clone()
            };
            self.conn.execute(
                "INSERT INTO meals (uuid, name, date, calories, protein_g, carbs_g, fats_g, notes, recipe, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    uuid,
                    meal.name,
                    meal.date,
                    meal.calories,
                    meal.protein_g,
                    meal.carbs_g,
                    meal.fats_g,
                    meal.notes,
                    meal.recipe,
                    meal.created_at,
                ],
            )?;
            count += 1;
        }
        Ok(count)
    }

    fn import_exercises(&self, exercises: &[Exercise]) -> Result<i64> {
        let mut count: i64 = 0;
        for exercise in exercises {
            if !exercise.uuid.is_empty() && self.uuid_exists("exercises", &exercise.uuid)? {
                continue;
            }
            validate_import_exercise(exercise)?;
            let uuid = if exercise.uuid.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                exercise.uuid.clone()
            };
            let updated_at = if exercise.updated_at.is_empty() {
                exercise.created_at.clone()
            } else {
                exercise.updated_at.clone()
            };
            self.conn.execute(
                "INSERT INTO exercises (uuid, name, category, duration_min, calories, completed, date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    uuid,
                    exercise.name,
                    exercise.category,
                    exercise.duration_min,
                    exercise.calories,
                    exercise.completed,
                    exercise.date,
                    exercise.created_at,
                    updated_at,
                ],
            )?;
            count += 1;
        }
        Ok(count)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn import_routines(&self, routines: &[SkincareRoutine]) -> Result<i64> {
        let mut count: i64 = 0;
        for routine in routines {
            if !routine.uuid.is_empty() && self.uuid_exists("skincare_routines", &routine.uuid)? {
                continue;
            }
            validate_import_routine(routine)?;
            let uuid = if routine.uuid.is_empty() {
                Uuid::new_v4().to_string()
            } else {
                routine.uuid.clone()
            };
            let updated_at = if routine.updated_at.is_empty() {
                routine.created_at.clone()
            } else {
                routine.updated_at.clone()
            };
            self.conn.execute(
                "INSERT INTO skincare_routines (uuid, name, time_of_day, completed, date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    uuid,
                    routine.name,
                    routine.time_of_day,
                    routine.completed,
                    routine.date,
                    routine.created_at,
                    updated_at,
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            for (position, product) in routine.products.iter().enumerate() {
                self.conn.execute(
                    "INSERT INTO skincare_products (routine_id, position, name) VALUES (?1, ?2, ?3)",
                    params![id, position as i64, product],
                )?;
            }
            count += 1;
        }
        Ok(count)
    }
}
