//! `PersonasApi` trait definition.

use async_trait::async_trait;

use crate::errors::PersonasError;
use crate::models::{Persona, PersonaDraft};

/// Public API trait for the `personas` module.
///
/// Drafts are validated by the implementation; callers pass raw field sets.
#[async_trait]
pub trait PersonasApi: Send + Sync {
    /// Get a persona by ID.
    async fn get_persona(&self, id: i64) -> Result<Persona, PersonasError>;

    /// List all personas in insertion order.
    async fn list_personas(&self) -> Result<Vec<Persona>, PersonasError>;

    /// Create a new persona and return it with its assigned ID.
    async fn create_persona(&self, draft: PersonaDraft) -> Result<Persona, PersonasError>;

    /// Replace every field of an existing persona.
    async fn update_persona(&self, id: i64, draft: PersonaDraft)
    -> Result<Persona, PersonasError>;

    /// Delete a persona by ID.
    async fn delete_persona(&self, id: i64) -> Result<(), PersonasError>;
}
