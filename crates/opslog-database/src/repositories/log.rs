//! Log repository implementation.

use chrono::Local;
use sqlx::SqlitePool;

use opslog_core::error::{AppError, ErrorKind};
use opslog_core::result::AppResult;
use opslog_entity::log::{LogFilter, LogRecord, NewLogRecord};

/// Store-assigned timestamp format.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Repository for operation log entries.
///
/// Each operation is a single SQL statement; SQLite's own statement
/// serialization makes inserts and deletes atomic without an application
/// lock.
#[derive(Debug, Clone)]
pub struct LogRepository {
    pool: SqlitePool,
}

impl LogRepository {
    /// Create a new log repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated log entry.
    ///
    /// The timestamp is assigned here from the local clock; callers never
    /// supply one. Returns the fully hydrated row, including the assigned
    /// id and timestamp.
    pub async fn insert(&self, new: &NewLogRecord) -> AppResult<LogRecord> {
        let datetime = Local::now().format(TIMESTAMP_FORMAT).to_string();

        sqlx::query_as::<_, LogRecord>(
            "INSERT INTO Logs (Datetime, Type, Input, Output, Info, Size, Success) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&datetime)
        .bind(&new.log_type)
        .bind(&new.input)
        .bind(&new.output)
        .bind(&new.info)
        .bind(new.size)
        .bind(new.success)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert log entry", e))
    }

    /// List log entries matching every present criterion.
    ///
    /// Criteria are ANDed into a dynamic WHERE clause; every value is a
    /// bound parameter except `limit`, which is already validated as an
    /// integer and embedded after the ordering clause. Results are ordered
    /// by the stored timestamp descending with the store's natural
    /// tie-break. An empty result is a success, not an error.
    pub async fn list(&self, filter: &LogFilter) -> AppResult<Vec<LogRecord>> {
        let mut conditions: Vec<&str> = Vec::new();

        if filter.datetime.is_some() {
            conditions.push("Datetime LIKE ?");
        }
        if filter.log_type.is_some() {
            conditions.push("Type = ?");
        }
        if filter.input.is_some() {
            conditions.push("Input LIKE ?");
        }
        if filter.output.is_some() {
            conditions.push("Output LIKE ?");
        }
        if filter.min_size.is_some() {
            conditions.push("Size >= ?");
        }
        if filter.max_size.is_some() {
            conditions.push("Size <= ?");
        }
        if filter.success.is_some() {
            conditions.push("Success = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = filter
            .limit
            .map(|n| format!(" LIMIT {n}"))
            .unwrap_or_default();

        let sql =
            format!("SELECT * FROM Logs{where_clause} ORDER BY Datetime DESC{limit_clause}");

        // Binds must follow the condition order above.
        let mut query = sqlx::query_as::<_, LogRecord>(&sql);
        if let Some(v) = &filter.datetime {
            query = query.bind(format!("%{v}%"));
        }
        if let Some(v) = &filter.log_type {
            query = query.bind(v.clone());
        }
        if let Some(v) = &filter.input {
            query = query.bind(format!("%{v}%"));
        }
        if let Some(v) = &filter.output {
            query = query.bind(format!("%{v}%"));
        }
        if let Some(v) = filter.min_size {
            query = query.bind(v);
        }
        if let Some(v) = filter.max_size {
            query = query.bind(v);
        }
        if let Some(v) = filter.success {
            query = query.bind(v);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list log entries", e))
    }

    /// Delete the log entry with the given id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM Logs WHERE ID = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete log entry", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Log entry {id} not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use opslog_core::config::DatabaseConfig;
    use opslog_core::error::ErrorKind;

    async fn repo() -> LogRepository {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        let pool = crate::connection::create_pool(&config).await.unwrap();
        crate::schema::init_schema(&pool).await.unwrap();
        LogRepository::new(pool)
    }

    fn entry(log_type: &str, input: &str, size: i64, success: bool) -> NewLogRecord {
        NewLogRecord {
            log_type: log_type.to_string(),
            input: input.to_string(),
            output: format!("{input}.out"),
            info: "processed".to_string(),
            size,
            success,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_formatted_timestamp() {
        let repo = repo().await;
        let record = repo.insert(&entry("HASH", "/in/a", 10, true)).await.unwrap();

        assert!(record.id > 0);
        assert!(NaiveDateTime::parse_from_str(&record.datetime, "%d/%m/%Y %H:%M").is_ok());
        assert_eq!(record.log_type, "HASH");
        assert!(record.success);
    }

    #[tokio::test]
    async fn ids_increase_monotonically() {
        let repo = repo().await;
        let first = repo.insert(&entry("HASH", "/in/a", 1, true)).await.unwrap();
        let second = repo.insert(&entry("HASH", "/in/b", 2, true)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_without_filters_returns_everything() {
        let repo = repo().await;
        for i in 0..4 {
            repo.insert(&entry("HASH", &format!("/in/{i}"), i, true))
                .await
                .unwrap();
        }
        let all = repo.list(&LogFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn filters_compose_with_and() {
        let repo = repo().await;
        repo.insert(&entry("HASH", "/in/a", 5, true)).await.unwrap();
        repo.insert(&entry("HASH", "/in/b", 15, false)).await.unwrap();
        repo.insert(&entry("DELETE", "/in/c", 15, true)).await.unwrap();

        let filter = LogFilter {
            log_type: Some("HASH".to_string()),
            min_size: Some(10),
            ..Default::default()
        };
        let matched = repo.list(&filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].input, "/in/b");
    }

    #[tokio::test]
    async fn size_bounds_are_inclusive() {
        let repo = repo().await;
        for size in [9, 10, 15, 20, 21] {
            repo.insert(&entry("HASH", &format!("/in/{size}"), size, true))
                .await
                .unwrap();
        }
        let filter = LogFilter {
            min_size: Some(10),
            max_size: Some(20),
            ..Default::default()
        };
        let matched = repo.list(&filter).await.unwrap();
        let sizes: Vec<i64> = matched.iter().map(|r| r.size).collect();
        assert_eq!(matched.len(), 3);
        assert!(sizes.iter().all(|s| (10..=20).contains(s)));
    }

    #[tokio::test]
    async fn success_and_substring_filters() {
        let repo = repo().await;
        repo.insert(&entry("HASH", "/data/alpha", 1, true)).await.unwrap();
        repo.insert(&entry("HASH", "/data/beta", 1, false)).await.unwrap();

        let filter = LogFilter {
            success: Some(false),
            ..Default::default()
        };
        let failed = repo.list(&filter).await.unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].input, "/data/beta");

        let filter = LogFilter {
            input: Some("alph".to_string()),
            ..Default::default()
        };
        let matched = repo.list(&filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].input, "/data/alpha");
    }

    async fn insert_at(repo: &LogRepository, datetime: &str, input: &str) {
        sqlx::query(
            "INSERT INTO Logs (Datetime, Type, Input, Output, Info, Size, Success) \
             VALUES (?, 'HASH', ?, ?, 'processed', 1, 1)",
        )
        .bind(datetime)
        .bind(input)
        .bind(format!("{input}.out"))
        .execute(&repo.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn datetime_filter_matches_substrings_of_the_stored_timestamp() {
        let repo = repo().await;
        insert_at(&repo, "01/03/2026 09:00", "/in/a").await;
        insert_at(&repo, "02/03/2026 10:30", "/in/b").await;
        insert_at(&repo, "15/04/2026 10:30", "/in/c").await;

        let filter = LogFilter {
            datetime: Some("/03/2026".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.list(&filter).await.unwrap().len(), 2);

        let filter = LogFilter {
            datetime: Some("02/03/2026 10".to_string()),
            ..Default::default()
        };
        let matched = repo.list(&filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].input, "/in/b");
    }

    #[tokio::test]
    async fn list_orders_by_timestamp_descending() {
        let repo = repo().await;
        // Inserted out of order on purpose.
        insert_at(&repo, "02/03/2026 10:30", "/in/b").await;
        insert_at(&repo, "03/03/2026 08:15", "/in/c").await;
        insert_at(&repo, "01/03/2026 09:00", "/in/a").await;

        let all = repo.list(&LogFilter::default()).await.unwrap();
        let stamps: Vec<&str> = all.iter().map(|r| r.datetime.as_str()).collect();
        assert_eq!(
            stamps,
            vec!["03/03/2026 08:15", "02/03/2026 10:30", "01/03/2026 09:00"]
        );
    }

    #[tokio::test]
    async fn limit_caps_rows_after_ordering() {
        let repo = repo().await;
        for i in 0..5 {
            repo.insert(&entry("HASH", &format!("/in/{i}"), i, true))
                .await
                .unwrap();
        }
        let filter = LogFilter {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(repo.list(&filter).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_permanently_and_missing_id_is_not_found() {
        let repo = repo().await;
        let record = repo.insert(&entry("HASH", "/in/a", 1, true)).await.unwrap();

        repo.delete(record.id).await.unwrap();
        assert!(repo.list(&LogFilter::default()).await.unwrap().is_empty());

        let err = repo.delete(record.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
