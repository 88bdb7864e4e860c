use std::sync::Arc;

use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use tracing::{field::Empty, info};

use super::dto::{
    CreatedResp, MSG_CREATED, MSG_DELETED, MSG_UPDATED, MessageResp, PersonaDto, PersonaReq,
};
use super::error::{
    domain_error_to_problem, json_rejection_to_problem, path_rejection_to_problem,
    update_error_to_problem,
};
use super::problem::Problem;
use crate::domain::service::Service;

type PersonasResult<T> = Result<T, Problem>;

/// List all personas
#[tracing::instrument(
    name = "personas.list_personas",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn list_personas(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> PersonasResult<Json<Vec<PersonaDto>>> {
    info!("Listing personas");

    let personas = svc
        .list_personas()
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(personas.into_iter().map(PersonaDto::from).collect()))
}

/// Get a specific persona by id
#[tracing::instrument(
    name = "personas.get_persona",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn get_persona(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> PersonasResult<Json<PersonaDto>> {
    let Path(id) = id.map_err(|r| path_rejection_to_problem(&r, uri.path()))?;
    info!("Getting persona with id: {}", id);

    let persona = svc
        .get_persona(id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(PersonaDto::from(persona)))
}

/// Create a new persona
#[tracing::instrument(
    name = "personas.create_persona",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn create_persona(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<PersonaReq>, JsonRejection>,
) -> PersonasResult<impl IntoResponse> {
    let Json(req) = body.map_err(|r| json_rejection_to_problem(&r, uri.path()))?;
    info!("Creating persona with dni: {:?}", req.dni);

    let persona = svc
        .create_persona(&req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), persona.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedResp {
            id: persona.id,
            message: MSG_CREATED.to_owned(),
        }),
    ))
}

/// Replace every field of an existing persona
#[tracing::instrument(
    name = "personas.update_persona",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn update_persona(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PersonaReq>, JsonRejection>,
) -> PersonasResult<Json<MessageResp>> {
    let Path(id) = id.map_err(|r| path_rejection_to_problem(&r, uri.path()))?;
    let Json(req) = body.map_err(|r| json_rejection_to_problem(&r, uri.path()))?;
    info!("Updating persona {}", id);

    svc.update_persona(id, &req.into())
        .await
        .map_err(|e| update_error_to_problem(&e, uri.path()))?;
    Ok(Json(MessageResp::new(MSG_UPDATED)))
}

/// Delete a persona by id
#[tracing::instrument(
    name = "personas.delete_persona",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn delete_persona(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> PersonasResult<Json<MessageResp>> {
    let Path(id) = id.map_err(|r| path_rejection_to_problem(&r, uri.path()))?;
    info!("Deleting persona: {}", id);

    svc.delete_persona(id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(MessageResp::new(MSG_DELETED)))
}
