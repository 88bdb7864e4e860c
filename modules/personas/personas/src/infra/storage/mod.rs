//! Infrastructure storage layer - database persistence.
//!
//! ## Architecture
//!
//! This module contains ALL `SeaORM`-specific code and database operations:
//! - `entity` - `SeaORM` entity for the `personas` table
//! - `mapper` - Conversions between `SeaORM` models and SDK contract types
//! - `sea_orm_repo` - `PersonasRepository` implementation
//! - `db` - connection setup and error conversion helpers
//! - `migrations/` - Database schema migrations
//!
//! ## Layering Rules
//!
//! The infrastructure layer:
//! - **Contains**: ALL `SeaORM` imports and database-specific code
//! - **Uses**: `personas_sdk` contract types as the domain model

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;
