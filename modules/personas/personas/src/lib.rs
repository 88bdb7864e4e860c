//! Personas Module
//!
//! Registry of persona records (national id, names, birth date, gender and
//! city) with validation, `SQLite`/Postgres storage through `SeaORM`, and a
//! REST surface under `/api/personas`.
//!
//! ## Public API
//!
//! The public API is defined in the `personas-sdk` crate and re-exported here:
//! - `PersonasApi` - trait for in-process callers
//! - `Persona`, `NewPersona`, `PersonaDraft`, `Gender`, `City` - data models
//! - `PersonasError` - error types
//!
//! Hosts build a [`Personas`] module and either mount its router or take
//! its [`PersonasApi`] client.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use personas_sdk::{
    City, Gender, NewPersona, Persona, PersonaDraft, PersonasApi, PersonasError,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::Personas;

// === CONFIGURATION ===
pub mod config;

// === LOCAL CLIENT ===
// Local client adapter that implements PersonasApi
pub mod local_client;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
