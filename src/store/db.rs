//! Participant database operations
//!
//! SQLite-backed local store for known participants and their room state.

use crate::store::error::StoreError;
use crate::store::local::LocalStore;
use crate::store::models::StoredParticipant;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

const SELECT_PARTICIPANT: &str = "SELECT id, name, token, extra_data, room_id, room_name, room_live, sort_order, updated_at FROM participants";

/// Database connection pool for participant records
pub struct ParticipantDb {
    pool: SqlitePool,
}

impl ParticipantDb {
    /// Initialize database connection pool
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(ParticipantDb)` if successful
    /// * `Err(StoreError)` if connection or migration failed
    pub async fn new(db_path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = PathBuf::from(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_path);

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_participants.sql");

        // Strip comments, then execute statement by statement
        let mut cleaned_sql = String::new();
        for line in migration_sql.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }
            let without_comments = match trimmed.find("--") {
                Some(comment_pos) => &trimmed[..comment_pos],
                None => trimmed,
            };
            cleaned_sql.push_str(without_comments.trim());
            cleaned_sql.push(' ');
        }

        for statement in cleaned_sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await.map_err(|e| {
                StoreError::InvalidData(format!(
                    "Migration failed: {} - Statement: {}",
                    e,
                    statement.chars().take(100).collect::<String>()
                ))
            })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get all participants, in roster order
    pub async fn get_participants(&self) -> Result<Vec<StoredParticipant>, StoreError> {
        let participants = sqlx::query_as::<_, StoredParticipant>(&format!(
            "{} ORDER BY sort_order ASC, id ASC",
            SELECT_PARTICIPANT
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = participants.len(), "Fetched participants");
        Ok(participants)
    }

    /// Get a participant by ID
    pub async fn get_participant(&self, id: &str) -> Result<Option<StoredParticipant>, StoreError> {
        let participant =
            sqlx::query_as::<_, StoredParticipant>(&format!("{} WHERE id = ?", SELECT_PARTICIPANT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(participant)
    }

    /// Insert a participant or replace the existing record with the same ID
    pub async fn upsert_participant(&self, participant: &StoredParticipant) -> Result<(), StoreError> {
        if serde_json::from_str::<serde_json::Value>(&participant.extra_data)
            .map(|v| !v.is_object())
            .unwrap_or(true)
        {
            return Err(StoreError::InvalidData(format!(
                "extra_data of participant {} is not a JSON object",
                participant.id
            )));
        }

        let updated_at = chrono::Utc::now().timestamp();
        sqlx::query(
            "INSERT INTO participants (id, name, token, extra_data, room_id, room_name, room_live, sort_order, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, token = excluded.token, \
             extra_data = excluded.extra_data, room_id = excluded.room_id, room_name = excluded.room_name, \
             room_live = excluded.room_live, sort_order = excluded.sort_order, updated_at = excluded.updated_at",
        )
        .bind(&participant.id)
        .bind(&participant.name)
        .bind(&participant.token)
        .bind(&participant.extra_data)
        .bind(&participant.room_id)
        .bind(&participant.room_name)
        .bind(participant.room_live)
        .bind(participant.sort_order)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Upserted participant: {}", participant.id);
        Ok(())
    }

    /// Delete a participant by ID
    pub async fn delete_participant(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM participants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted participant: {}", id);
        Ok(())
    }
}

#[async_trait]
impl LocalStore for ParticipantDb {
    async fn get_all_participants(&self) -> Result<Vec<StoredParticipant>, StoreError> {
        self.get_participants().await
    }
}
