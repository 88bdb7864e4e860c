#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for `/api/personas` over a real `SQLite` database.

mod support;

use axum::http::{StatusCode, header};
use serde_json::json;
use support::{TestContext, ana_json, body_json, empty_request, json_request};
use tower::ServiceExt;

#[tokio::test]
async fn test_full_persona_lifecycle() {
    let ctx = TestContext::new().await;
    let app = ctx.router();

    // Create
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/personas", &ana_json()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let created = body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["message"], "Persona creada exitosamente");
    assert_eq!(location, format!("/api/personas/{id}"));

    // Read back
    let resp = app
        .clone()
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let mut expected = ana_json();
    expected["id"] = json!(id);
    assert_eq!(body_json(resp).await, expected);

    // Duplicate dni
    let mut dup = ana_json();
    dup["nombres"] = json!("Beatriz");
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/personas", &dup))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "PERSONAS_DNI_CONFLICT");

    // Update
    let mut changed = ana_json();
    changed["ciudad"] = json!("Cuenca");
    let resp = app
        .clone()
        .oneshot(json_request("PUT", &location, &changed))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        "Persona actualizada exitosamente"
    );

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["ciudad"], "Cuenca");

    // Delete
    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", &location))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        "Persona eliminada exitosamente"
    );

    let resp = app
        .clone()
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(empty_request("DELETE", &location))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_create_leaves_store_unchanged() {
    let ctx = TestContext::new().await;
    let app = ctx.router();

    let mut payload = ana_json();
    payload.as_object_mut().unwrap().remove("apellidos");
    payload["genero"] = json!("Otro");

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/personas", &payload))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem = body_json(resp).await;
    assert_eq!(problem["code"], "PERSONAS_VALIDATION");
    assert_eq!(problem["instance"], "/api/personas");
    let fields: Vec<&str> = problem["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["apellidos", "genero"]);

    let resp = app
        .oneshot(empty_request("GET", "/api/personas"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn test_list_is_ordered_and_repeatable() {
    let ctx = TestContext::new().await;
    let app = ctx.router();

    for (dni, ciudad) in [("11111111", "Cuenca"), ("22222222", "Manta")] {
        let mut payload = ana_json();
        payload["dni"] = json!(dni);
        payload["ciudad"] = json!(ciudad);
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/api/personas", &payload))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let first = body_json(
        app.clone()
            .oneshot(empty_request("GET", "/api/personas"))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(empty_request("GET", "/api/personas"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
    let dnis: Vec<&str> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["dni"].as_str().unwrap())
        .collect();
    assert_eq!(dnis, vec!["11111111", "22222222"]);
}

#[tokio::test]
async fn test_update_to_taken_dni_is_rejected() {
    let ctx = TestContext::new().await;
    let app = ctx.router();

    let mut other = ana_json();
    other["dni"] = json!("87654321");
    for payload in [ana_json(), other.clone()] {
        app.clone()
            .oneshot(json_request("POST", "/api/personas", &payload))
            .await
            .unwrap();
    }

    let resp = app
        .clone()
        .oneshot(json_request("PUT", "/api/personas/2", &ana_json()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "PERSONAS_DNI_CONFLICT");

    let resp = app
        .oneshot(empty_request("GET", "/api/personas/2"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["dni"], "87654321");
}

#[tokio::test]
async fn test_update_of_missing_persona_does_not_create_it() {
    let ctx = TestContext::new().await;
    let app = ctx.router();

    let resp = app
        .clone()
        .oneshot(json_request("PUT", "/api/personas/7", &ana_json()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(empty_request("GET", "/api/personas"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}
