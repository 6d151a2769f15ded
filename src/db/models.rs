use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Field names a create request must carry, in the order reported to clients.
pub const REQUIRED_FIELDS: [&str; 4] = ["date", "grade", "department", "content"];

/// A persisted record row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Record {
    pub id: i64,
    pub date: String,
    pub grade: Option<String>,
    pub department: String,
    pub content: String,
    /// Store text as written by `CURRENT_TIMESTAMP`; legacy rows may carry NULL.
    pub created_at: Option<String>,
}

/// The two grade values accepted on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    SeniorOne,
    SeniorTwo,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::SeniorOne => "高一",
            Grade::SeniorTwo => "高二",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "高一" => Ok(Grade::SeniorOne),
            "高二" => Ok(Grade::SeniorTwo),
            _ => Err(()),
        }
    }
}

/// A validated record ready for insertion. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: String,
    pub grade: Grade,
    pub department: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct GradeCount {
    pub grade: String,
    pub count: i64,
}

/// Aggregate counts over the whole table.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: i64,
    pub today: i64,
    pub by_department: Vec<DepartmentCount>,
    pub by_grade: Vec<GradeCount>,
}
