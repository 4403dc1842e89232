// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig};

/// Default config file, looked up without extension
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the config file
    /// (optional), then `RECORDS_`-prefixed environment variables using `__`
    /// as the section separator, e.g. `RECORDS_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.request_timeout", 30)?
            .set_default("http.server_name", "record-query/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.pretty_json", false)?
            .set_default("health.enabled", true)?
            .set_default("health.liveness_path", "/healthz")?
            .set_default("health.readiness_path", "/readyz")?
            .set_default("query.zero_is_unset", true)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("RECORDS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the path given as the first CLI argument, or the default
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
