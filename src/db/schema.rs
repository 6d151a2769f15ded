//! SQL DDL for the `records` table.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, so ids are never reused
/// - `grade` nullable; rows written before the column existed carry NULL
/// - `created_at` defaulted by the store at insert time
pub const RECORDS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    grade TEXT NULL,
    department TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Brings a legacy table (created without `grade`) up to the current shape.
pub const RECORDS_ADD_GRADE: &str = "ALTER TABLE records ADD COLUMN grade TEXT";

/// Column introspection used to decide whether `RECORDS_ADD_GRADE` is needed.
pub const RECORDS_COLUMNS: &str = "SELECT name FROM pragma_table_info('records')";
