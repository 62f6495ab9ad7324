use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::from_row::get_timestamp_millis;
use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    #[default]
    Other,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 7] = [
        ExerciseCategory::Chest,
        ExerciseCategory::Back,
        ExerciseCategory::Legs,
        ExerciseCategory::Shoulders,
        ExerciseCategory::Arms,
        ExerciseCategory::Core,
        ExerciseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Chest => "chest",
            ExerciseCategory::Back => "back",
            ExerciseCategory::Legs => "legs",
            ExerciseCategory::Shoulders => "shoulders",
            ExerciseCategory::Arms => "arms",
            ExerciseCategory::Core => "core",
            ExerciseCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "chest" => ExerciseCategory::Chest,
            "back" => ExerciseCategory::Back,
            "legs" => ExerciseCategory::Legs,
            "shoulders" => ExerciseCategory::Shoulders,
            "arms" => ExerciseCategory::Arms,
            "core" => ExerciseCategory::Core,
            _ => ExerciseCategory::Other,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseCategory::Chest => "胸部",
            ExerciseCategory::Back => "背部",
            ExerciseCategory::Legs => "腿部",
            ExerciseCategory::Shoulders => "肩部",
            ExerciseCategory::Arms => "手臂",
            ExerciseCategory::Core => "核心",
            ExerciseCategory::Other => "其他",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let category: String = row.get("category")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: ExerciseCategory::parse(&category),
            created_at: get_timestamp_millis(row, "created_at")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub category: ExerciseCategory,
}

impl CreateExercise {
    /// Validate user input and assign identity.
    pub fn into_exercise(self) -> Result<Exercise> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Exercise name cannot be empty".to_string(),
            ));
        }

        Ok(Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: self.category,
            created_at: Utc::now(),
        })
    }
}
