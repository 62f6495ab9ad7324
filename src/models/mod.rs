pub mod exercise;
pub mod from_row;
pub mod settings;
pub mod unit;
pub mod workout;

pub use exercise::{CreateExercise, Exercise, ExerciseCategory};
pub use from_row::FromSqliteRow;
pub use settings::Settings;
pub use unit::{convert_weight, round_to_tenth, Unit, KG_TO_LBS, LBS_TO_KG};
pub use workout::{
    parse_workout_date, today, CreateWorkout, Workout, WorkoutSet, WorkoutWithExercise,
    DATE_FORMAT,
};
