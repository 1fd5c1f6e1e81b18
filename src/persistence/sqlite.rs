//! SQLite implementation of the state-change log.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::models::StateChangeEvent;
use crate::error::SwitchifierError;

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS switch_state_change(
    timestamp INTEGER NOT NULL PRIMARY KEY,
    interval INTEGER NOT NULL,
    state BOOLEAN NOT NULL
)";

/// SQLite-backed state-change log using a single-connection `sqlx::SqlitePool`.
///
/// The pool never opens a second connection: concurrent callers queue for
/// the one connection, so no reader can observe a half-applied insert.
#[derive(Debug, Clone)]
pub struct SqliteEventLog {
    pool: SqlitePool,
}

impl SqliteEventLog {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] if the database cannot be
    /// opened.
    pub async fn connect(path: &Path, timeout: Duration) -> Result<Self, SwitchifierError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// The data lives as long as the returned log (and its clones).
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] if SQLite cannot be opened.
    pub async fn in_memory() -> Result<Self, SwitchifierError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // Dropping the only connection would drop the database with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Creates the `switch_state_change` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] on database failure.
    pub async fn run_schema_update(&self) -> Result<(), SwitchifierError> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Loads the most recent state change, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] on database failure.
    pub async fn latest_event(&self) -> Result<Option<StateChangeEvent>, SwitchifierError> {
        let event = sqlx::query_as::<_, StateChangeEvent>(
            "SELECT timestamp, interval, state FROM switch_state_change \
             ORDER BY timestamp DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Appends a state change in a single atomic insert.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] on database failure,
    /// including a duplicate `timestamp`.
    pub async fn append_event(&self, event: &StateChangeEvent) -> Result<(), SwitchifierError> {
        sqlx::query("INSERT INTO switch_state_change (timestamp, interval, state) VALUES (?, ?, ?)")
            .bind(event.timestamp)
            .bind(event.interval)
            .bind(event.state)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the number of stored state changes.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] on database failure.
    pub async fn count_events(&self) -> Result<i64, SwitchifierError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM switch_state_change")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Loads every stored state change in timestamp order.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] on database failure.
    pub async fn all_events(&self) -> Result<Vec<StateChangeEvent>, SwitchifierError> {
        let events = sqlx::query_as::<_, StateChangeEvent>(
            "SELECT timestamp, interval, state FROM switch_state_change ORDER BY timestamp ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Checks that the database answers queries.
    ///
    /// # Errors
    ///
    /// Returns a [`SwitchifierError::Storage`] if it does not.
    pub async fn ping(&self) -> Result<(), SwitchifierError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool. Every later call fails with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn make_log() -> SqliteEventLog {
        let Ok(log) = SqliteEventLog::in_memory().await else {
            panic!("in-memory sqlite");
        };
        let Ok(()) = log.run_schema_update().await else {
            panic!("schema");
        };
        log
    }

    fn event(timestamp: i64, interval: i64, state: bool) -> StateChangeEvent {
        StateChangeEvent {
            timestamp,
            interval,
            state,
        }
    }

    #[tokio::test]
    async fn schema_update_is_idempotent() {
        let log = make_log().await;
        assert!(log.run_schema_update().await.is_ok());
        assert!(log.run_schema_update().await.is_ok());
    }

    #[tokio::test]
    async fn empty_log_has_no_latest_event() {
        let log = make_log().await;
        let Ok(latest) = log.latest_event().await else {
            panic!("query failed");
        };
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn latest_event_is_max_timestamp() {
        let log = make_log().await;
        // Inserted out of order on purpose.
        for e in [event(30, 10, true), event(10, 0, true), event(20, 10, false)] {
            let Ok(()) = log.append_event(&e).await else {
                panic!("insert failed");
            };
        }
        let Ok(Some(latest)) = log.latest_event().await else {
            panic!("expected an event");
        };
        assert_eq!(latest, event(30, 10, true));
    }

    #[tokio::test]
    async fn duplicate_timestamp_is_a_storage_error() {
        let log = make_log().await;
        let Ok(()) = log.append_event(&event(42, 0, true)).await else {
            panic!("first insert failed");
        };
        let result = log.append_event(&event(42, 0, false)).await;
        assert!(matches!(result, Err(SwitchifierError::Storage(_))));

        let Ok(count) = log.count_events().await else {
            panic!("count failed");
        };
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn all_events_are_ordered_by_timestamp() {
        let log = make_log().await;
        for e in [event(2, 1, false), event(1, 0, true), event(3, 1, true)] {
            let Ok(()) = log.append_event(&e).await else {
                panic!("insert failed");
            };
        }
        let Ok(events) = log.all_events().await else {
            panic!("query failed");
        };
        let timestamps: Vec<i64> = events.iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn closed_log_reports_storage_errors() {
        let log = make_log().await;
        log.close().await;
        assert!(matches!(log.ping().await, Err(SwitchifierError::Storage(_))));
        assert!(matches!(
            log.latest_event().await,
            Err(SwitchifierError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("switchifier.db");

        let Ok(log) = SqliteEventLog::connect(&path, Duration::from_secs(5)).await else {
            panic!("connect");
        };
        let Ok(()) = log.run_schema_update().await else {
            panic!("schema");
        };
        let Ok(()) = log.append_event(&event(7, 0, true)).await else {
            panic!("insert");
        };
        log.close().await;

        let Ok(reopened) = SqliteEventLog::connect(&path, Duration::from_secs(5)).await else {
            panic!("reconnect");
        };
        let Ok(()) = reopened.run_schema_update().await else {
            panic!("schema on reopen");
        };
        let Ok(Some(latest)) = reopened.latest_event().await else {
            panic!("expected persisted event");
        };
        assert_eq!(latest, event(7, 0, true));
    }
}
