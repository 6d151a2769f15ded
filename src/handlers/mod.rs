pub mod health;
pub mod login;
pub mod records;

pub use health::health;
pub use login::login;
pub use records::{create_record, delete_record, init_schema, list_records, stats};
