//! Local implementation of `PersonasApi`.
//!
//! Delegates to the domain service and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use personas_sdk::{Persona, PersonaDraft, PersonasApi, PersonasError};

use crate::domain::service::Service;

/// In-process client over the domain service.
pub struct PersonasLocalClient {
    service: Arc<Service>,
}

impl PersonasLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PersonasApi for PersonasLocalClient {
    async fn get_persona(&self, id: i64) -> Result<Persona, PersonasError> {
        self.service.get_persona(id).await.map_err(Into::into)
    }

    async fn list_personas(&self) -> Result<Vec<Persona>, PersonasError> {
        self.service.list_personas().await.map_err(Into::into)
    }

    async fn create_persona(&self, draft: PersonaDraft) -> Result<Persona, PersonasError> {
        self.service
            .create_persona(&draft)
            .await
            .map_err(Into::into)
    }

    async fn update_persona(
        &self,
        id: i64,
        draft: PersonaDraft,
    ) -> Result<Persona, PersonasError> {
        self.service
            .update_persona(id, &draft)
            .await
            .map_err(Into::into)
    }

    async fn delete_persona(&self, id: i64) -> Result<(), PersonasError> {
        self.service.delete_persona(id).await.map_err(Into::into)
    }
}
