use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::aggregation::{self, ChartSeries, SummaryStats, DEFAULT_CHART_POINTS};
use crate::config::Config;
use crate::db::{self, DbPool};
use crate::error::{AppError, Result};
use crate::models::Exercise;
use crate::repositories::{ExerciseRepository, SettingsRepository, WorkoutRepository};
use crate::version::GIT_VERSION;

/// Install the global tracing subscriber. Later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitlog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Handles the presentation layer talks to.
#[derive(Clone)]
pub struct App {
    pub exercise_repo: ExerciseRepository,
    pub workout_repo: WorkoutRepository,
    pub settings_repo: SettingsRepository,
}

/// Everything the per-exercise progress view shows.
#[derive(Debug, Clone)]
pub struct ExerciseProgress {
    pub exercise: Exercise,
    pub chart: ChartSeries,
    pub stats: Option<SummaryStats>,
}

impl App {
    pub fn new(pool: DbPool) -> Self {
        Self {
            exercise_repo: ExerciseRepository::new(pool.clone()),
            workout_repo: WorkoutRepository::new(pool.clone()),
            settings_repo: SettingsRepository::new(pool),
        }
    }

    /// Open the process-wide store described by the environment (and `.env`).
    /// Repeated calls share the same database.
    pub fn init() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::init_with(&Config::from_env())
    }

    pub fn init_with(config: &Config) -> anyhow::Result<Self> {
        tracing::info!("Starting fitlog {}", GIT_VERSION);
        let pool = db::shared_pool(config)?;
        Ok(Self::new(pool))
    }

    /// Chart and statistics for one exercise in the user's display unit.
    pub async fn exercise_progress(&self, exercise_id: &str) -> Result<ExerciseProgress> {
        let exercise = self
            .exercise_repo
            .find_by_id(exercise_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;
        let workouts = self.workout_repo.find_by_exercise(exercise_id).await?;
        let unit = self.settings_repo.load().await.default_unit;

        Ok(ExerciseProgress {
            exercise,
            chart: aggregation::chart_series(&workouts, unit, DEFAULT_CHART_POINTS),
            stats: aggregation::summary_stats(&workouts, unit),
        })
    }
}
