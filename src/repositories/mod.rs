pub mod exercise_repo;
pub mod settings_repo;
pub mod workout_repo;

pub use exercise_repo::ExerciseRepository;
pub use settings_repo::SettingsRepository;
pub use workout_repo::WorkoutRepository;
