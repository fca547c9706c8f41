use sqlx::SqlitePool;
use tracing::warn;

pub const SOUND_ENABLED_KEY: &str = "sound-enabled";

/// Per-player key/value preferences
#[derive(Clone)]
pub struct PreferenceStore {
    pool: SqlitePool,
}

impl PreferenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: &str, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM preferences WHERE user_id = ? AND key = ?")
                .bind(user_id)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    pub async fn set(&self, user_id: &str, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO preferences (user_id, key, value) VALUES (?, ?, ?) \
             ON CONFLICT (user_id, key) DO UPDATE SET value = excluded.value",
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sound is on unless the player turned it off. Storage failures fall back to on.
    pub async fn sound_enabled(&self, user_id: &str) -> bool {
        match self.get(user_id, SOUND_ENABLED_KEY).await {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                warn!(user_id, %value, "Ignoring malformed sound preference");
                true
            }),
            Ok(None) => true,
            Err(err) => {
                warn!(user_id, %err, "Failed to load sound preference");
                true
            }
        }
    }

    pub async fn set_sound_enabled(&self, user_id: &str, enabled: bool) -> Result<(), sqlx::Error> {
        self.set(user_id, SOUND_ENABLED_KEY, if enabled { "true" } else { "false" })
            .await
    }
}
