//! Wire types for the JSON API: request schemas and response payloads.

pub mod login;
pub mod records;

pub use login::{LoginRequest, LoginResponse};
pub use records::{
    CreateRecordRequest, CreatedResponse, HealthResponse, InitResponse, RecordList,
    SuccessResponse,
};
