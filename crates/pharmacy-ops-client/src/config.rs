//! Client configuration.
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults (`http://localhost:8000`, 10 s timeout)
//! 2. `config/pharmacy-ops.{toml,json,yaml,...}` if present
//! 3. `PHARMACY_OPS__*` environment variables, e.g. `PHARMACY_OPS__BASE_URL`

use std::time::Duration;

use serde::Deserialize;

const CONFIG_FILE: &str = "config/pharmacy-ops";
const ENV_PREFIX: &str = "PHARMACY_OPS";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Row limit sent with inventory and drug queries
    #[serde(default = "default_inventory_limit")]
    pub inventory_limit: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_inventory_limit() -> u32 {
    1000
}

fn default_user_agent() -> String {
    concat!("pharmacy-ops/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            inventory_limit: default_inventory_limit(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load from the optional config file and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Self::from_config(s)
    }

    /// Deserialize from an already built source stack.
    pub fn from_config(s: config::Config) -> Result<Self, config::ConfigError> {
        s.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
