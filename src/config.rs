use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::DeskError;
use crate::service::accounts::default_accounts;

/// Environment variable prefix, e.g. `DESK_DATABASE_URL`.
pub const ENV_PREFIX: &str = "DESK_";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    /// SQLite url. When unset the service runs without a bound store.
    pub database_url: Option<String>,
    /// Directory served for every non-API path.
    pub static_dir: Option<PathBuf>,
    pub loglevel: String,
    pub accounts: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: None,
            static_dir: None,
            loglevel: "info".to_string(),
            accounts: default_accounts(),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml` if present, then `DESK_*` environment variables.
    pub fn load() -> Result<Self, DeskError> {
        Self::figment(Figment::from(Serialized::defaults(Config::default())))
            .extract()
            .map_err(DeskError::from)
    }

    fn figment(base: Figment) -> Figment {
        base.merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
