use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use sentiment_types::{StatusCheck, StatusCheckCreate};

use crate::db::DbPool;

/// Maximum number of entries a single listing returns
pub const STATUS_LIST_CAP: i64 = 1000;

/// Append-only log of client status checks
pub trait StatusStore: Send + Sync {
    /// Record a new status check and return it with its generated id and timestamp
    fn append(&self, input: &StatusCheckCreate) -> Result<StatusCheck>;

    /// Entries in insertion order, at most `limit` of them
    fn list(&self, limit: i64) -> Result<Vec<StatusCheck>>;
}

/// SQLite-backed status log
pub struct SqliteStatusStore {
    pool: DbPool,
}

impl SqliteStatusStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StatusStore for SqliteStatusStore {
    fn append(&self, input: &StatusCheckCreate) -> Result<StatusCheck> {
        let check = StatusCheck {
            id: Uuid::new_v4(),
            client_name: input.client_name.clone(),
            timestamp: Utc::now(),
        };

        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
            (
                check.id.to_string(),
                &check.client_name,
                check.timestamp.to_rfc3339(),
            ),
        )
        .context("Failed to insert status check")?;

        tracing::info!("Recorded status check {} for {}", check.id, check.client_name);
        Ok(check)
    }

    fn list(&self, limit: i64) -> Result<Vec<StatusCheck>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, client_name, timestamp FROM status_checks ORDER BY rowid LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([limit.min(STATUS_LIST_CAP)], |row| {
                Ok((
                    row.get::<_, String>("id")?,
                    row.get::<_, String>("client_name")?,
                    row.get::<_, String>("timestamp")?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list status checks")?;

        rows.into_iter()
            .map(|(id, client_name, timestamp)| -> Result<StatusCheck> {
                Ok(StatusCheck {
                    id: Uuid::parse_str(&id)
                        .with_context(|| format!("Invalid status check id '{}'", id))?,
                    client_name,
                    timestamp: DateTime::parse_from_rfc3339(&timestamp)
                        .with_context(|| format!("Invalid status check timestamp '{}'", timestamp))?
                        .with_timezone(&Utc),
                })
            })
            .collect()
    }
}
