use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{CreateExercise, Exercise, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
            let result = stmt.query_row([&id], Exercise::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// All exercises, alphabetical by name.
    pub async fn find_all(&self) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises ORDER BY name, created_at")?;
            let exercises = stmt
                .query_map([], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Validate the input, then store it under a fresh id.
    pub async fn create(&self, input: CreateExercise) -> Result<Exercise> {
        let exercise = input.into_exercise()?;
        self.insert(&exercise).await?;
        Ok(exercise)
    }

    /// Store an exercise that already carries its id. Fails with
    /// `DuplicateKey` when the id is taken.
    pub async fn insert(&self, exercise: &Exercise) -> Result<()> {
        let exercise = exercise.clone();
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, name, category, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![
                    exercise.id,
                    exercise.name,
                    exercise.category.as_str(),
                    exercise.created_at.timestamp_millis()
                ],
            )
            .map_err(|e| AppError::from_insert(e, "Exercise", &exercise.id))?;
            tracing::debug!("Created exercise {} ({})", exercise.id, exercise.name);
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete an exercise together with every workout that references it.
    ///
    /// Both deletes run in one transaction; either all rows go or none do.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let workouts = tx.execute("DELETE FROM workouts WHERE exercise_id = ?", [&id])?;
            let rows = tx.execute("DELETE FROM exercises WHERE id = ?", [&id])?;
            tx.commit()?;

            if rows > 0 {
                tracing::info!("Deleted exercise {} and {} workouts", id, workouts);
            }
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
