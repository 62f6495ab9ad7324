use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Settings, Unit};

/// Key the settings object is stored under in the `settings` table.
pub const SETTINGS_KEY: &str = "fitlog:settings";

#[derive(Clone)]
pub struct SettingsRepository {
    pool: DbPool,
}

impl SettingsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load the stored settings.
    ///
    /// Never fails: a missing, unreadable or malformed value yields the
    /// defaults and is logged.
    pub async fn load(&self) -> Settings {
        match self.load_raw().await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring malformed settings: {}", e);
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("Error loading settings: {}", e);
                Settings::default()
            }
        }
    }

    async fn load_raw(&self) -> Result<Option<String>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let value = conn
                .query_row(
                    "SELECT value FROM settings WHERE key = ?",
                    [SETTINGS_KEY],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Persist the settings. Failures are logged and returned to the caller.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        let result = self.save_inner(settings).await;
        if let Err(ref e) = result {
            tracing::error!("Error saving settings: {}", e);
        }
        result
    }

    async fn save_inner(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![SETTINGS_KEY, json],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Switch the display unit. Recorded sets are not converted.
    pub async fn update_unit(&self, unit: Unit) -> Result<Settings> {
        let mut settings = self.load().await;
        if settings.default_unit == unit {
            return Ok(settings);
        }

        settings.default_unit = unit;
        self.save(&settings).await?;
        tracing::info!("Default unit changed to {}", unit);
        Ok(settings)
    }
}
