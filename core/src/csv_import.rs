use std::collections::HashSet;
use std::io::Read;

use anyhow::{Context, Result, bail};

use crate::db::Database;
use crate::models::{NewMeal, validate_new_meal};

/// A single row parsed from a meal-history CSV.
#[derive(Debug, Clone)]
pub struct CsvMealRow {
    pub date: String,
    pub name: String,
    pub calories: Option<f64>,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub notes: Option<String>,
}

/// Summary of what a CSV import would do / did.
#[derive(Debug, Clone)]
pub struct CsvImportSummary {
    pub rows_parsed: usize,
    pub meals_imported: usize,
    pub rows_skipped: usize,
    pub dates_spanned: usize,
}

/// Parse a meal-history CSV from any reader.
///
/// Expected header:
/// `Date,Meal,Calories,Protein,Carbs,Fats,Notes`
///
/// Column order is free and the header match is case-insensitive. Columns
/// after Calories are optional.
pub fn parse_meals_csv<R: Read>(reader: R) -> Result<Vec<CsvMealRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let required = ["Date", "Meal", "Calories"];
    for name in &required {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(name)) {
            bail!("Missing required column: {name}");
        }
    }

    // Column index map (case-insensitive)
    let col =
        |name: &str| -> Option<usize> { headers.iter().position(|h| h.eq_ignore_ascii_case(name)) };

    let idx_date = col("Date").context("Missing 'Date' column")?;
    let idx_meal = col("Meal").context("Missing 'Meal' column")?;
    let idx_cal = col("Calories").context("Missing 'Calories' column")?;
    let idx_protein = col("Protein");
    let idx_carbs = col("Carbs");
    let idx_fats = col("Fats");
    let idx_notes = col("Notes");

    let mut rows = Vec::new();

    for (line_num, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", line_num + 2))?;

        let date = record.get(idx_date).unwrap_or("").trim().to_string();
        let name = record.get(idx_meal).unwrap_or("").trim().to_string();

        if date.is_empty() || name.is_empty() {
            continue; // skip blank rows
        }

        let parse_f64 = |idx: Option<usize>| -> f64 {
            idx.and_then(|i| record.get(i))
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(0.0)
        };

        let calories = record
            .get(idx_cal)
            .and_then(|v| v.trim().parse::<f64>().ok());

        let notes = idx_notes
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string);

        rows.push(CsvMealRow {
            date,
            name,
            calories,
            protein: parse_f64(idx_protein),
            carbs: parse_f64(idx_carbs),
            fats: parse_f64(idx_fats),
            notes,
        });
    }

    Ok(rows)
}

/// Normalize a CSV date to YYYY-MM-DD format.
///
/// Accepts `YYYY-MM-DD`, `M/D/YYYY`, and `D/M/YYYY`.
fn normalize_date(raw: &str) -> Result<chrono::NaiveDate> {
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Ok(d);
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return Ok(d);
    }
    bail!("Cannot parse date: '{raw}'")
}

/// Import parsed meal rows into the database.
///
/// Rows with an unparseable date, a missing calorie value, or values that
/// fail validation are skipped and counted. When `dry_run` is true, no data
/// is written.
pub fn import_meal_rows(
    db: &Database,
    rows: &[CsvMealRow],
    dry_run: bool,
) -> Result<CsvImportSummary> {
    let mut meals_imported: usize = 0;
    let mut rows_skipped: usize = 0;
    let mut dates: HashSet<String> = HashSet::new();

    for row in rows {
        let Ok(date) = normalize_date(&row.date) else {
            rows_skipped += 1;
            continue;
        };
        let Some(calories) = row.calories else {
            rows_skipped += 1;
            continue;
        };

        let meal = NewMeal {
            name: row.name.clone(),
            date,
            calories,
            protein_g: row.protein,
            carbs_g: row.carbs,
            fats_g: row.fats,
            notes: row.notes.clone(),
            recipe: None,
        };
        if validate_new_meal(&meal).is_err() {
            rows_skipped += 1;
            continue;
        }

        if !dry_run {
            db.insert_meal(&meal)?;
        }
        dates.insert(date.format("%Y-%m-%d").to_string());
        meals_imported += 1;
    }

    Ok(CsvImportSummary {
        rows_parsed: rows.len(),
        meals_imported,
        rows_skipped,
        dates_spanned: dates.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE_CSV: &str = "\
Date,Meal,Calories,Protein,Carbs,Fats,Notes
2024-06-15,Oatmeal,350,12,60,7,with berries
2024-06-15,Chicken Wrap,550,35,45,20,
2024-06-15,Stir Fry,620,28,70,22,extra tofu
2024-06-16,Greek Yogurt,150,17,6,0.7,
2024-06-16,Salmon Bowl,480,32,40,18,
";

    #[test]
    fn test_parse_meals_csv_basic() {
        let rows = parse_meals_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].date, "2024-06-15");
        assert_eq!(rows[0].name, "Oatmeal");
        assert!((rows[0].calories.unwrap() - 350.0).abs() < f64::EPSILON);
        assert!((rows[0].protein - 12.0).abs() < f64::EPSILON);
        assert!((rows[0].carbs - 60.0).abs() < f64::EPSILON);
        assert!((rows[0].fats - 7.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].notes.as_deref(), Some("with berries"));

        // Empty notes become None
        assert!(rows[1].notes.is_none());
        assert_eq!(rows[4].name, "Salmon Bowl");
    }

    #[test]
    fn test_parse_meals_csv_missing_required_column() {
        let bad_csv = "Date,Calories\n2024-06-15,100\n";
        let result = parse_meals_csv(bad_csv.as_bytes());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Meal"));
    }

    #[test]
    fn test_parse_meals_csv_minimal_columns() {
        let csv = "\
Date,Meal,Calories
2024-06-15,Chicken,165
";
        let rows = parse_meals_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].protein - 0.0).abs() < f64::EPSILON);
        assert!(rows[0].notes.is_none());
    }

    #[test]
    fn test_parse_meals_csv_reordered_columns() {
        let csv = "\
Meal,Calories,Date
Chicken,165,2024-06-15
";
        let rows = parse_meals_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Chicken");
        assert_eq!(rows[0].date, "2024-06-15");
    }

    #[test]
    fn test_parse_meals_csv_skips_blank_rows() {
        let csv = "\
Date,Meal,Calories
2024-06-15,Chicken,165
,,
2024-06-15,Rice,130
";
        let rows = parse_meals_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_normalize_date_iso() {
        assert_eq!(
            normalize_date("2024-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_normalize_date_us_format() {
        assert_eq!(
            normalize_date("6/15/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_normalize_date_invalid() {
        assert!(normalize_date("not-a-date").is_err());
    }

    #[test]
    fn test_import_dry_run_writes_nothing() {
        let db = Database::open_in_memory().unwrap();
        let rows = parse_meals_csv(SAMPLE_CSV.as_bytes()).unwrap();

        let summary = import_meal_rows(&db, &rows, true).unwrap();
        assert_eq!(summary.rows_parsed, 5);
        assert_eq!(summary.meals_imported, 5);
        assert_eq!(summary.rows_skipped, 0);
        assert_eq!(summary.dates_spanned, 2);

        let day = db
            .get_meals_for_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .unwrap();
        assert!(day.is_empty());
    }

    #[test]
    fn test_import_actual() {
        let db = Database::open_in_memory().unwrap();
        let rows = parse_meals_csv(SAMPLE_CSV.as_bytes()).unwrap();

        let summary = import_meal_rows(&db, &rows, false).unwrap();
        assert_eq!(summary.meals_imported, 5);

        let day = db
            .get_meals_for_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .unwrap();
        assert_eq!(day.len(), 3);
        assert_eq!(day[0].name, "Oatmeal");
        assert_eq!(day[0].notes.as_deref(), Some("with berries"));
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let db = Database::open_in_memory().unwrap();
        let csv = "\
Date,Meal,Calories
2024-06-15,Chicken,165
June 15,Mystery,100
2024-06-16,No Calories,
2024-06-17,Negative,-50
";
        let rows = parse_meals_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);

        let summary = import_meal_rows(&db, &rows, false).unwrap();
        assert_eq!(summary.meals_imported, 1);
        assert_eq!(summary.rows_skipped, 3);
        assert_eq!(summary.dates_spanned, 1);
    }
}
