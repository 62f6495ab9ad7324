#![allow(dead_code)]

use chrono::{DateTime, NaiveDate};

use fitlog::db::{create_memory_pool, DbPool};
use fitlog::migrations::run_migrations_for_tests;
use fitlog::models::{
    CreateExercise, CreateWorkout, Exercise, ExerciseCategory, Unit, Workout, WorkoutSet,
};
use fitlog::App;

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app() -> App {
    App::new(setup_test_db())
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn kg(reps: u32, weight: f64) -> WorkoutSet {
    WorkoutSet::new(reps, weight, Unit::Kg)
}

// Test data creation helpers
pub async fn create_test_exercise(app: &App, name: &str, category: ExerciseCategory) -> Exercise {
    app.exercise_repo
        .create(CreateExercise {
            name: name.to_string(),
            category,
        })
        .await
        .unwrap()
}

pub async fn create_test_workout(
    app: &App,
    exercise_id: &str,
    day: &str,
    sets: Vec<WorkoutSet>,
) -> Workout {
    app.workout_repo
        .create(CreateWorkout {
            exercise_id: exercise_id.to_string(),
            date: date(day),
            sets,
            notes: None,
        })
        .await
        .unwrap()
}

/// Insert a workout with a fixed creation time so ordering is deterministic.
pub async fn insert_test_workout(
    app: &App,
    id: &str,
    exercise_id: &str,
    day: &str,
    created_at_millis: i64,
) -> Workout {
    let workout = Workout {
        id: id.to_string(),
        exercise_id: exercise_id.to_string(),
        date: date(day),
        sets: vec![kg(5, 100.0)],
        notes: None,
        created_at: DateTime::from_timestamp_millis(created_at_millis).unwrap(),
    };
    app.workout_repo.insert(&workout).await.unwrap();
    workout
}
