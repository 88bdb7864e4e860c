use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Module configuration for the `personas` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonasConfig {
    #[serde(default = "default_min_dni_length")]
    pub min_dni_length: usize,
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,
}

impl Default for PersonasConfig {
    fn default() -> Self {
        Self {
            min_dni_length: default_min_dni_length(),
            max_field_length: default_max_field_length(),
        }
    }
}

impl From<&PersonasConfig> for ServiceConfig {
    fn from(cfg: &PersonasConfig) -> Self {
        Self {
            min_dni_length: cfg.min_dni_length,
            max_field_length: cfg.max_field_length,
        }
    }
}

fn default_min_dni_length() -> usize {
    8
}

fn default_max_field_length() -> usize {
    100
}

/// Database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// e.g. `sqlite://personas.db?mode=rwc` or `sqlite::memory:`
    #[serde(default = "default_dsn")]
    pub dsn: String,
    #[serde(default = "default_max_conns")]
    pub max_conns: u32,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    /// Log every SQL statement at debug level.
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: default_dsn(),
            max_conns: default_max_conns(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    pub const IN_MEMORY_DSN: &'static str = "sqlite::memory:";

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            dsn: Self::IN_MEMORY_DSN.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.dsn.starts_with("sqlite:") && self.dsn.contains(":memory:")
    }

    /// DSN with any password replaced, for logging.
    #[must_use]
    pub fn redacted_dsn(&self) -> String {
        match url::Url::parse(&self.dsn) {
            Ok(mut parsed) if parsed.password().is_some() => {
                let _ = parsed.set_password(Some("***"));
                parsed.to_string()
            }
            Ok(_) => self.dsn.clone(),
            // Unparseable but may still carry credentials.
            Err(_) if self.dsn.contains('@') => "***".to_owned(),
            Err(_) => self.dsn.clone(),
        }
    }
}

fn default_dsn() -> String {
    "sqlite://personas.db?mode=rwc".to_owned()
}

fn default_max_conns() -> u32 {
    5
}

fn default_acquire_timeout_ms() -> u64 {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_defaults() {
        let svc = ServiceConfig::from(&PersonasConfig::default());
        assert_eq!(svc.min_dni_length, 8);
        assert_eq!(svc.max_field_length, 100);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let cfg: PersonasConfig = serde_json::from_value(serde_json::json!({
            "max_field_length": 40
        }))
        .unwrap();
        assert_eq!(cfg.min_dni_length, 8);
        assert_eq!(cfg.max_field_length, 40);
    }

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(!DatabaseConfig::default().is_in_memory());
    }

    #[test]
    fn redacts_password_in_dsn() {
        let cfg = DatabaseConfig {
            dsn: "postgres://app:s3cret@db:5432/personas".to_owned(),
            ..DatabaseConfig::default()
        };
        assert_eq!(cfg.redacted_dsn(), "postgres://app:***@db:5432/personas");
        assert_eq!(
            DatabaseConfig::default().redacted_dsn(),
            "sqlite://personas.db?mode=rwc"
        );
    }

    #[test]
    fn at_sign_outside_userinfo_is_left_alone() {
        let dsn = "postgres://db:5432/personas?application_name=ops@team";
        let cfg = DatabaseConfig {
            dsn: dsn.to_owned(),
            ..DatabaseConfig::default()
        };
        assert_eq!(cfg.redacted_dsn(), dsn);
        assert_eq!(
            DatabaseConfig::in_memory().redacted_dsn(),
            DatabaseConfig::IN_MEMORY_DSN
        );
    }
}
