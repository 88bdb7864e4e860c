#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)] // Not every test binary uses every helper

//! Test support utilities for `personas` integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use axum::response::Response;
use personas::config::{DatabaseConfig, PersonasConfig};
use personas::domain::service::Service;
use personas::infra::storage::db::connect_and_migrate;
use personas::{Personas, PersonaDraft};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

pub struct TestContext {
    pub db: DatabaseConnection,
    pub module: Personas,
    pub service: Arc<Service>,
}

impl TestContext {
    /// Fresh in-memory database with the schema applied.
    pub async fn new() -> Self {
        let db = connect_and_migrate(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to set up in-memory database");
        let module = Personas::from_connection(db.clone(), &PersonasConfig::default());
        let service = module.service();
        Self {
            db,
            module,
            service,
        }
    }

    pub fn router(&self) -> Router {
        self.module.register_rest(Router::new())
    }
}

pub fn ana_draft() -> PersonaDraft {
    PersonaDraft {
        dni: Some("12345678".to_owned()),
        nombres: Some("Ana".to_owned()),
        apellidos: Some("Lopez".to_owned()),
        fecha_nacimiento: Some("1990-01-01".to_owned()),
        genero: Some("Femenino".to_owned()),
        ciudad: Some("Quito".to_owned()),
    }
}

pub fn ana_json() -> Value {
    json!({
        "dni": "12345678",
        "nombres": "Ana",
        "apellidos": "Lopez",
        "fecha_nacimiento": "1990-01-01",
        "genero": "Femenino",
        "ciudad": "Quito"
    })
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
