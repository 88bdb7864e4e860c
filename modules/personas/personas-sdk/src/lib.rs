//! Personas SDK
//!
//! Public contract of the `personas` module:
//! - `PersonasApi` - trait for in-process consumers
//! - `Persona`, `NewPersona`, `PersonaDraft`, `Gender`, `City` - data models
//! - `PersonasError` - error types

pub mod api;
pub mod errors;
pub mod models;

pub use api::PersonasApi;
pub use errors::PersonasError;
pub use models::{City, Gender, NewPersona, Persona, PersonaDraft, UnknownVariant};
