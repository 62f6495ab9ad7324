//! Local persistence and statistics for a personal workout log.
//!
//! Exercises and workouts live in SQLite; [`aggregation`] turns a list of
//! workouts into volume, trend and summary figures for display.

pub mod aggregation;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod version;

pub use app::{App, ExerciseProgress};
pub use error::{AppError, ErrorKind, Result};
