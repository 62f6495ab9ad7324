use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::from_row::get_timestamp_millis;
use super::{convert_weight, ExerciseCategory, FromSqliteRow, Unit};
use crate::error::{AppError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One set within a workout. The unit is fixed when the set is entered and
/// never changes afterwards; sets stored before units were tracked read as kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl WorkoutSet {
    pub fn new(reps: u32, weight: f64, unit: Unit) -> Self {
        Self { reps, weight, unit }
    }

    pub fn is_blank(&self) -> bool {
        self.reps == 0 && self.weight == 0.0
    }

    pub fn weight_in(&self, unit: Unit) -> f64 {
        convert_weight(self.weight, self.unit, unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub exercise_id: String,
    pub date: NaiveDate,
    pub sets: Vec<WorkoutSet>,
    pub notes: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Check that the workout can be stored and read back.
    ///
    /// Weights must be finite and non-negative, and at least one set must
    /// carry reps or weight. Blank sets are tolerated here; the store drops
    /// them on write.
    pub fn validate(&self) -> Result<()> {
        if self.exercise_id.trim().is_empty() {
            return Err(AppError::Validation("No exercise selected".to_string()));
        }

        if let Some(bad) = self
            .sets
            .iter()
            .find(|s| !s.weight.is_finite() || s.weight < 0.0)
        {
            return Err(AppError::Validation(format!(
                "Invalid weight: {}",
                bad.weight
            )));
        }

        if self.sets.iter().all(WorkoutSet::is_blank) {
            return Err(AppError::Validation(
                "Record at least one set".to_string(),
            ));
        }

        Ok(())
    }

    /// Sets worth persisting, in entry order.
    pub fn recorded_sets(&self) -> Vec<WorkoutSet> {
        self.sets.iter().copied().filter(|s| !s.is_blank()).collect()
    }

    /// Heaviest set in `unit`, or 0 when there are no sets.
    pub fn max_weight(&self, unit: Unit) -> f64 {
        self.sets
            .iter()
            .map(|s| s.weight_in(unit))
            .fold(0.0, f64::max)
    }
}

fn sets_from_row(row: &Row, column: &str) -> rusqlite::Result<Vec<WorkoutSet>> {
    let idx = row.as_ref().column_index(column)?;
    let json: String = row.get(idx)?;
    serde_json::from_str(&json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            exercise_id: row.get("exercise_id")?,
            date: row.get("date")?,
            sets: sets_from_row(row, "sets")?,
            notes: row.get("notes")?,
            created_at: get_timestamp_millis(row, "created_at")?,
        })
    }
}

/// A workout joined with the exercise it references, for history listings.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutWithExercise {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercise_name: Option<String>,
    pub exercise_category: Option<ExerciseCategory>,
}

impl FromSqliteRow for WorkoutWithExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let category: Option<String> = row.get("exercise_category")?;
        Ok(Self {
            workout: Workout::from_row(row)?,
            exercise_name: row.get("exercise_name")?,
            exercise_category: category.as_deref().map(ExerciseCategory::parse),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkout {
    pub exercise_id: String,
    pub date: NaiveDate,
    pub sets: Vec<WorkoutSet>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateWorkout {
    /// Drop blank sets, validate the rest and assign identity.
    pub fn into_workout(self) -> Result<Workout> {
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut workout = Workout {
            id: Uuid::new_v4().to_string(),
            exercise_id: self.exercise_id,
            date: self.date,
            sets: self.sets,
            notes,
            created_at: Utc::now(),
        };
        workout.validate()?;
        workout.sets = workout.recorded_sets();
        Ok(workout)
    }
}

/// Parse a `YYYY-MM-DD` date typed by the user.
pub fn parse_workout_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", input)))
}

/// Default date for a new entry.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn create(sets: Vec<WorkoutSet>) -> CreateWorkout {
        CreateWorkout {
            exercise_id: "ex1".to_string(),
            date: date("2024-01-03"),
            sets,
            notes: None,
        }
    }

    #[test]
    fn test_into_workout_discards_blank_sets() {
        let workout = create(vec![
            WorkoutSet::new(5, 100.0, Unit::Kg),
            WorkoutSet::new(0, 0.0, Unit::Kg),
            WorkoutSet::new(8, 0.0, Unit::Kg),
        ])
        .into_workout()
        .unwrap();

        assert_eq!(
            workout.sets,
            vec![
                WorkoutSet::new(5, 100.0, Unit::Kg),
                WorkoutSet::new(8, 0.0, Unit::Kg),
            ]
        );
    }

    #[test]
    fn test_into_workout_rejects_only_blank_sets() {
        let result = create(vec![WorkoutSet::new(0, 0.0, Unit::Kg)]).into_workout();
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = create(vec![]).into_workout();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_into_workout_rejects_negative_weight() {
        let result = create(vec![WorkoutSet::new(5, -10.0, Unit::Kg)]).into_workout();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_into_workout_requires_exercise() {
        let mut input = create(vec![WorkoutSet::new(5, 100.0, Unit::Kg)]);
        input.exercise_id = " ".to_string();
        assert!(matches!(input.into_workout(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_into_workout_trims_notes() {
        let mut input = create(vec![WorkoutSet::new(5, 100.0, Unit::Kg)]);
        input.notes = Some("   ".to_string());
        assert_eq!(input.clone().into_workout().unwrap().notes, None);

        input.notes = Some(" felt strong ".to_string());
        assert_eq!(
            input.into_workout().unwrap().notes.as_deref(),
            Some("felt strong")
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_weight() {
        let mut workout = create(vec![WorkoutSet::new(5, 100.0, Unit::Kg)])
            .into_workout()
            .unwrap();

        workout.sets.push(WorkoutSet::new(5, f64::NAN, Unit::Kg));
        assert!(matches!(workout.validate(), Err(AppError::Validation(_))));

        workout.sets.pop();
        workout.sets.push(WorkoutSet::new(5, f64::INFINITY, Unit::Lbs));
        assert!(matches!(workout.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_only_blank_sets() {
        let mut workout = create(vec![WorkoutSet::new(5, 100.0, Unit::Kg)])
            .into_workout()
            .unwrap();
        workout.sets = vec![WorkoutSet::new(0, 0.0, Unit::Kg)];

        assert!(matches!(workout.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_recorded_sets_skip_blanks() {
        let mut workout = create(vec![WorkoutSet::new(5, 100.0, Unit::Kg)])
            .into_workout()
            .unwrap();
        workout.sets = vec![
            WorkoutSet::new(0, 0.0, Unit::Kg),
            WorkoutSet::new(3, 90.0, Unit::Kg),
        ];

        assert!(workout.validate().is_ok());
        assert_eq!(workout.recorded_sets(), vec![WorkoutSet::new(3, 90.0, Unit::Kg)]);
    }

    #[test]
    fn test_parse_workout_date() {
        assert_eq!(parse_workout_date("2024-01-03").unwrap(), date("2024-01-03"));
        assert_eq!(parse_workout_date(" 2024-02-29 ").unwrap(), date("2024-02-29"));
        assert!(matches!(
            parse_workout_date("2023-02-29"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_workout_date("yesterday"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_set_without_unit_reads_as_kg() {
        let set: WorkoutSet = serde_json::from_str(r#"{"reps":5,"weight":60}"#).unwrap();
        assert_eq!(set, WorkoutSet::new(5, 60.0, Unit::Kg));
    }

    #[test]
    fn test_max_weight_normalizes_units() {
        let workout = create(vec![
            WorkoutSet::new(5, 100.0, Unit::Kg),
            WorkoutSet::new(3, 225.0, Unit::Lbs),
        ])
        .into_workout()
        .unwrap();

        // 225 lbs = 102.1 kg
        assert_eq!(workout.max_weight(Unit::Kg), 102.1);
        assert_eq!(workout.max_weight(Unit::Lbs), 225.0);
    }

    #[test]
    fn test_max_weight_of_empty_sets_is_zero() {
        let workout = Workout {
            id: "w".to_string(),
            exercise_id: "e".to_string(),
            date: date("2024-01-01"),
            sets: vec![],
            notes: None,
            created_at: Utc::now(),
        };
        assert_eq!(workout.max_weight(Unit::Kg), 0.0);
    }
}
