use chrono::NaiveDate;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{CreateWorkout, FromSqliteRow, Workout, WorkoutWithExercise};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ?")?;
            let result = stmt.query_row([&id], Workout::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// All workouts, newest date first; within a date, most recently created first.
    pub async fn find_all(&self) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM workouts ORDER BY date DESC, created_at DESC")?;
            let workouts = stmt
                .query_map([], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Same order as `find_all`, with the referenced exercise's name and category.
    pub async fn find_all_with_exercise(&self) -> Result<Vec<WorkoutWithExercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT w.*, e.name AS exercise_name, e.category AS exercise_category
                 FROM workouts w
                 LEFT JOIN exercises e ON w.exercise_id = e.id
                 ORDER BY w.date DESC, w.created_at DESC",
            )?;
            let workouts = stmt
                .query_map([], WorkoutWithExercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Workouts for one exercise in chronological order, as progress charts expect.
    pub async fn find_by_exercise(&self, exercise_id: &str) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        let exercise_id = exercise_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM workouts WHERE exercise_id = ? ORDER BY date ASC, created_at ASC",
            )?;
            let workouts = stmt
                .query_map([&exercise_id], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM workouts WHERE date = ? ORDER BY created_at DESC")?;
            let workouts = stmt
                .query_map([date], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Validate the input, then store it under a fresh id.
    pub async fn create(&self, input: CreateWorkout) -> Result<Workout> {
        let workout = input.into_workout()?;
        self.insert(&workout).await?;
        Ok(workout)
    }

    /// Store a workout that already carries its id.
    ///
    /// Blank sets are dropped and the rest written as one JSON array. Fails
    /// with `Validation` before touching the store when `Workout::validate`
    /// rejects it, `DuplicateKey` when the id is taken and `NotFound` when
    /// the exercise does not exist.
    pub async fn insert(&self, workout: &Workout) -> Result<()> {
        workout.validate()?;

        let recorded = workout.recorded_sets();
        let sets = serde_json::to_string(&recorded)?;
        let set_count = recorded.len();
        let workout = workout.clone();
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workouts (id, exercise_id, date, sets, notes, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    workout.id,
                    workout.exercise_id,
                    workout.date,
                    sets,
                    workout.notes,
                    workout.created_at.timestamp_millis()
                ],
            )
            .map_err(|e| AppError::from_insert(e, "Workout", &workout.id))?;
            tracing::debug!(
                "Created workout {} for exercise {} on {} ({} sets)",
                workout.id,
                workout.exercise_id,
                workout.date,
                set_count
            );
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Returns whether a row was removed; deleting a missing workout is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workouts WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
