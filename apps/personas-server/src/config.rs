//! Layered server configuration.
//!
//! Sources are merged in order: built-in defaults, the YAML file passed with
//! `--config`, environment variables prefixed `APP__` (nested keys split on
//! `__`, e.g. `APP__SERVER__PORT=9000`), then command-line overrides.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use personas::config::{DatabaseConfig, PersonasConfig};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub personas: PersonasConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// # Errors
    /// Returns an error if `bind_addr` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `personas=debug,sea_orm=warn`.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Cross-origin access for browser front-ends. Open to every origin unless
/// narrowed; credentials are never allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// `["*"]` or explicit origins such as `http://localhost:5173`.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: default_origins(),
            max_age_seconds: default_max_age(),
        }
    }
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_true() -> bool {
    true
}

fn default_origins() -> Vec<String> {
    vec!["*".to_owned()]
}

fn default_max_age() -> u64 {
    600
}

/// Overrides taken from the command line; `None`/`false`/`0` leave the
/// loaded value alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Load defaults, then the YAML file (if any), then `APP__*` env vars.
    ///
    /// # Errors
    /// Returns an error if the file is missing or any source fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }

        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }

        if cli.mock {
            self.database = DatabaseConfig::in_memory();
        }
    }

    /// Semantic checks that deserialization alone cannot express.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.database.max_conns == 0 {
            bail!("database.max_conns must be at least 1");
        }
        if self.personas.min_dni_length == 0 {
            bail!("personas.min_dni_length must be at least 1");
        }
        if self.personas.max_field_length < self.personas.min_dni_length {
            bail!(
                "personas.max_field_length ({}) is smaller than personas.min_dni_length ({})",
                self.personas.max_field_length,
                self.personas.min_dni_length
            );
        }
        if self.cors.enabled {
            if self.cors.allowed_origins.is_empty() {
                bail!("cors.allowed_origins must not be empty when CORS is enabled");
            }
            if let Some(bad) = self
                .cors
                .allowed_origins
                .iter()
                .find(|o| HeaderValue::from_str(o).is_err())
            {
                bail!("cors.allowed_origins contains an invalid origin: {bad:?}");
            }
        }
        Ok(())
    }

    /// Effective configuration as YAML, with database credentials masked.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        let mut printable = self.clone();
        printable.database.dsn = self.database.redacted_dsn();
        serde_saphyr::to_string(&printable)
            .map_err(|e| anyhow::anyhow!("failed to render configuration as YAML: {e}"))
    }
}
