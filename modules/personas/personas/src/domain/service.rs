use std::sync::Arc;

use personas_sdk::{NewPersona, Persona, PersonaDraft};

use super::error::DomainError;
use super::repo::PersonasRepository;
use super::validation::validate_draft;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_dni_length: usize,
    pub max_field_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_dni_length: 8,
            max_field_length: 100,
        }
    }
}

/// Request-scoped orchestration over the persona store.
///
/// Holds no state between calls; every operation performs at most one
/// store mutation.
pub struct Service {
    repo: Arc<dyn PersonasRepository>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(repo: Arc<dyn PersonasRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// # Errors
    /// Returns [`DomainError::Validation`] when the draft breaks a field rule.
    pub fn validate(&self, draft: &PersonaDraft) -> Result<NewPersona, DomainError> {
        validate_draft(draft, &self.config)
    }

    /// # Errors
    /// Validation, duplicate `dni`, or store failure.
    pub async fn create_persona(&self, draft: &PersonaDraft) -> Result<Persona, DomainError> {
        tracing::info!("Creating new persona");

        let new_persona = self.validate(draft)?;
        let id = self.repo.create(&new_persona).await?;

        tracing::info!(persona_id = id, "Successfully created persona");
        Ok(new_persona.with_id(id))
    }

    /// # Errors
    /// Store failure.
    pub async fn list_personas(&self) -> Result<Vec<Persona>, DomainError> {
        tracing::debug!("Listing personas");

        let personas = self.repo.list().await?;

        tracing::debug!("Successfully listed {} personas", personas.len());
        Ok(personas)
    }

    /// # Errors
    /// [`DomainError::NotFound`] or store failure.
    pub async fn get_persona(&self, id: i64) -> Result<Persona, DomainError> {
        tracing::debug!(persona_id = id, "Getting persona by id");

        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// Full replace of every field but `id`. Runs the same validation as create.
    ///
    /// # Errors
    /// Validation, [`DomainError::NotFound`], duplicate `dni`, or store failure.
    pub async fn update_persona(
        &self,
        id: i64,
        draft: &PersonaDraft,
    ) -> Result<Persona, DomainError> {
        tracing::info!(persona_id = id, "Updating persona");

        let replacement = self.validate(draft)?;
        self.repo.update(id, &replacement).await?;

        tracing::info!(persona_id = id, "Successfully updated persona");
        Ok(replacement.with_id(id))
    }

    /// # Errors
    /// [`DomainError::NotFound`] or store failure.
    pub async fn delete_persona(&self, id: i64) -> Result<(), DomainError> {
        tracing::info!(persona_id = id, "Deleting persona");

        self.repo.delete(id).await?;

        tracing::info!(persona_id = id, "Successfully deleted persona");
        Ok(())
    }
}
