//! REST API for the `personas` collection.
//!
//! Handlers orchestrate but don't contain business logic: they extract the
//! request, call `domain::service::Service`, and map results to `dto::*`
//! payloads or RFC 9457 `Problem` responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;
