// Configuration module entry point
// Layered configuration (defaults, file, environment) and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use config::builder::DefaultState;
use config::{ConfigBuilder, Map};

use crate::error::Error;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig};

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the specified file path (without extension),
    /// then apply `SERVER_*` environment variables and finally `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(config_path, None, std::env::var("PORT").ok())
    }

    /// Layering behind `load_from`. `env` replaces the process environment
    /// when given; an empty or blank `port` counts as unset.
    fn load_layered(
        config_path: &str,
        env: Option<Map<String, String>>,
        port: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let port = port
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let settings = Self::builder_with_defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .set_override_option("server.port", port)?
            .build()?;

        settings.try_deserialize()
    }

    /// Built-in defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::builder_with_defaults()?.build()?.try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default(
                "http.server_name",
                concat!("calculator-api/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.api_prefix", "/api")?
            .set_default("routes.health.enabled", true)?
            .set_default("routes.health.path", "/health")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|source| Error::Address { addr, source })
    }
}
