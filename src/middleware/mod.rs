pub mod cors;
pub mod json_body;

pub use cors::cors;
pub use json_body::JsonBody;
