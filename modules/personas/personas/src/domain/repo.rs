use async_trait::async_trait;
use personas_sdk::{NewPersona, Persona};

use super::error::DomainError;

/// Persistence port for persona records.
///
/// Implementations own the uniqueness constraint on `dni`: a duplicate
/// must come back as [`DomainError::DniAlreadyExists`] from `create` or
/// `update`, never be detected by the caller beforehand.
#[async_trait]
pub trait PersonasRepository: Send + Sync {
    /// Insert a new record and return the id assigned by the store.
    async fn create(&self, persona: &NewPersona) -> Result<i64, DomainError>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Persona>, DomainError>;

    async fn get(&self, id: i64) -> Result<Option<Persona>, DomainError>;

    /// Replace every mutable field. `NotFound` when no row has `id`.
    async fn update(&self, id: i64, persona: &NewPersona) -> Result<(), DomainError>;

    /// Hard delete. `NotFound` when no row has `id`.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
