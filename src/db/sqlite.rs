use crate::db::models::{DepartmentCount, GradeCount, NewRecord, Record, StatsSnapshot};
use crate::db::schema::{RECORDS_ADD_GRADE, RECORDS_COLUMNS, RECORDS_INIT};
use crate::error::DeskError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool for `database_url`, creating the database file when missing.
///
/// In-memory databases are pinned to a single long-lived connection, otherwise
/// every pooled connection would see its own empty database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, DeskError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new().connect_with(options).await?
    };
    info!(database_url = %database_url, "record store connected");
    Ok(pool)
}

/// Accessor for the `records` table. Every operation is a single statement
/// (or a handful of independent reads) with no wrapping transaction.
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the table if absent. Safe to call any number of times.
    pub async fn ensure_schema(&self) -> Result<(), DeskError> {
        sqlx::query(RECORDS_INIT.trim()).execute(&self.pool).await?;
        Ok(())
    }

    /// Add the `grade` column to tables created before it existed.
    /// Returns whether the column had to be added.
    pub async fn ensure_grade_column(&self) -> Result<bool, DeskError> {
        let columns: Vec<(String,)> = sqlx::query_as(RECORDS_COLUMNS)
            .fetch_all(&self.pool)
            .await?;
        if columns.iter().any(|(name,)| name == "grade") {
            return Ok(false);
        }
        sqlx::query(RECORDS_ADD_GRADE).execute(&self.pool).await?;
        info!("added missing grade column to records");
        Ok(true)
    }

    /// All records, newest first. Rows sharing a creation second fall back to id order.
    pub async fn list(&self) -> Result<Vec<Record>, DeskError> {
        let records = sqlx::query_as::<_, Record>(
            r#"SELECT id, date, grade, department, content,
                      CAST(created_at AS TEXT) AS created_at
               FROM records ORDER BY records.created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Insert a validated record and return the id assigned by the store.
    pub async fn create(&self, record: &NewRecord) -> Result<i64, DeskError> {
        let result = sqlx::query(
            "INSERT INTO records (date, grade, department, content) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.date)
        .bind(record.grade.as_str())
        .bind(&record.department)
        .bind(&record.content)
        .execute(&self.pool)
        .await?;
        let id = result.last_insert_rowid();
        debug!(id, department = %record.department, "record inserted");
        Ok(id)
    }

    /// Delete by id. Deleting an id that does not exist is not an error;
    /// the number of affected rows is returned for logging only.
    pub async fn delete(&self, id: i64) -> Result<u64, DeskError> {
        let result = sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, affected = result.rows_affected(), "record delete executed");
        Ok(result.rows_affected())
    }

    /// Aggregate counts. `today` is compared verbatim against the `date` column.
    pub async fn stats(&self, today: &str) -> Result<StatsSnapshot, DeskError> {
        let total: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) AS count FROM records")
            .fetch_optional(&self.pool)
            .await?;

        let today_count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) AS count FROM records WHERE date = ?")
                .bind(today)
                .fetch_optional(&self.pool)
                .await?;

        let by_department = sqlx::query_as::<_, DepartmentCount>(
            "SELECT department, COUNT(*) AS count FROM records GROUP BY department",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_grade = sqlx::query_as::<_, GradeCount>(
            "SELECT grade, COUNT(*) AS count FROM records WHERE grade IS NOT NULL GROUP BY grade",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(StatsSnapshot {
            total: total.unwrap_or_default(),
            today: today_count.unwrap_or_default(),
            by_department,
            by_grade,
        })
    }
}
