pub mod accounts;

pub use accounts::{AccountDirectory, StaticAccounts};
