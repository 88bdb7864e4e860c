use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use personas_sdk::PersonasApi;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::api::rest::routes;
use crate::config::{DatabaseConfig, PersonasConfig};
use crate::domain::repo::PersonasRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::db::connect_and_migrate;
use crate::infra::storage::sea_orm_repo::SeaOrmPersonasRepository;
use crate::local_client::PersonasLocalClient;

/// Composition root: wires the repository, the domain service and the
/// transports that sit on top of it.
#[derive(Clone)]
pub struct Personas {
    service: Arc<Service>,
}

impl Personas {
    /// Connect to the configured database, apply migrations and build the
    /// service on a `SeaORM` repository.
    ///
    /// # Errors
    /// Fails when the database is unreachable or a migration fails.
    pub async fn init(db_cfg: &DatabaseConfig, cfg: &PersonasConfig) -> anyhow::Result<Self> {
        let db = connect_and_migrate(db_cfg)
            .await
            .with_context(|| format!("failed to open database '{}'", db_cfg.redacted_dsn()))?;
        let repo = Arc::new(SeaOrmPersonasRepository::new(db));
        let stored = repo
            .count()
            .await
            .context("failed to count stored personas")?;
        info!(stored, "Personas storage ready");
        Ok(Self::with_repository(repo, cfg))
    }

    #[must_use]
    pub fn from_connection(db: DatabaseConnection, cfg: &PersonasConfig) -> Self {
        Self::with_repository(Arc::new(SeaOrmPersonasRepository::new(db)), cfg)
    }

    #[must_use]
    pub fn with_repository(repo: Arc<dyn PersonasRepository>, cfg: &PersonasConfig) -> Self {
        let service_cfg = ServiceConfig::from(cfg);
        info!(
            min_dni_length = service_cfg.min_dni_length,
            max_field_length = service_cfg.max_field_length,
            "Personas module initialized"
        );
        Self {
            service: Arc::new(Service::new(repo, service_cfg)),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Client for in-process callers.
    #[must_use]
    pub fn client(&self) -> Arc<dyn PersonasApi> {
        Arc::new(PersonasLocalClient::new(self.service()))
    }

    /// Mount `/api/personas` on `router`.
    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.service())
    }
}
