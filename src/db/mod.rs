//! Database module: models, schema and the record store accessor.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and aggregates
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction and the `RecordStore` accessor

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DepartmentCount, Grade, GradeCount, NewRecord, Record, StatsSnapshot};
pub use schema::{RECORDS_ADD_GRADE, RECORDS_INIT};
pub use sqlite::{RecordStore, SqlitePool, connect};
