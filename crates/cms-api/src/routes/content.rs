//! # Content Routes
//!
//! For every registered type `t`:
//!
//! | Method | Path | Storage call | Success |
//! |--------|------|--------------|---------|
//! | GET | `/api/{t}` | `list` | 200, array, `X-Total-Count` |
//! | GET | `/api/{t}/{id}` | `get` | 200, object |
//! | POST | `/api/{t}` | `create` | 201, request body echoed |
//! | PUT | `/api/{t}/{id}` | `update` | 200, request body echoed |
//! | DELETE | `/api/{t}/{id}` | `delete` | 204 |
//!
//! Writes are validated against the type's schema before storage is
//! touched. POST derives the id from the payload's id field; PUT takes it
//! from the path and ignores the payload's id field.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::header::{HeaderName, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::error::{AppError, ErrorContext};
use crate::extractors::{extract_body, extract_id, extract_object};
use crate::state::{AppState, TypeEntry};

/// `X-Total-Count` response header on list responses.
pub static X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Routes for every type, each carrying its [`TypeEntry`] as an extension.
pub fn router(types: &[Arc<TypeEntry>]) -> Router<AppState> {
    types.iter().fold(Router::new(), |router, entry| {
        let collection = format!("/api/{}", entry.def.name());
        let member = format!("{collection}/{{id}}");
        tracing::debug!(type_name = entry.def.name(), %collection, "mounting content routes");

        router.merge(
            Router::new()
                .route(&collection, get(list).post(create))
                .route(&member, get(read).put(update).delete(delete))
                .layer(Extension(Arc::clone(entry))),
        )
    })
}

/// Respond with the request body as sent.
fn echo(status: StatusCode, body: Bytes) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

async fn list(
    State(state): State<AppState>,
    Extension(entry): Extension<Arc<TypeEntry>>,
) -> Result<Response, AppError> {
    let ctx = ErrorContext::new("list", entry.def.name());
    let objects = state
        .store
        .list(&entry.def)
        .await
        .map_err(|e| ctx.storage(e))?;

    let count = HeaderValue::from(objects.len());
    Ok(([(X_TOTAL_COUNT.clone(), count)], Json(objects)).into_response())
}

async fn read(
    State(state): State<AppState>,
    Extension(entry): Extension<Arc<TypeEntry>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let ctx = ErrorContext::new("get", entry.def.name());
    let id = extract_id(id, &ctx)?;
    let ctx = ctx.with_id(&id);

    let object = state
        .store
        .get(&entry.def, &id)
        .await
        .map_err(|e| ctx.storage(e))?;
    Ok(Json(object).into_response())
}

async fn create(
    State(state): State<AppState>,
    Extension(entry): Extension<Arc<TypeEntry>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let ctx = ErrorContext::new("create", entry.def.name());
    let body = extract_body(body, &ctx)?;
    let object = extract_object(&body, &entry, &ctx)?;
    let id = entry.def.object_id(&object).map_err(|e| ctx.malformed(e))?;
    let ctx = ctx.with_id(&id);

    state
        .store
        .create(&entry.def, &id, object)
        .await
        .map_err(|e| ctx.storage(e))?;

    tracing::debug!(type_name = entry.def.name(), %id, "object created");
    Ok(echo(StatusCode::CREATED, body))
}

async fn update(
    State(state): State<AppState>,
    Extension(entry): Extension<Arc<TypeEntry>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let ctx = ErrorContext::new("update", entry.def.name());
    let id = extract_id(id, &ctx)?;
    let ctx = ctx.with_id(&id);
    let body = extract_body(body, &ctx)?;
    let object = extract_object(&body, &entry, &ctx)?;

    state
        .store
        .update(&entry.def, &id, object)
        .await
        .map_err(|e| ctx.storage(e))?;

    tracing::debug!(type_name = entry.def.name(), %id, "object updated");
    Ok(echo(StatusCode::OK, body))
}

async fn delete(
    State(state): State<AppState>,
    Extension(entry): Extension<Arc<TypeEntry>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let ctx = ErrorContext::new("delete", entry.def.name());
    let id = extract_id(id, &ctx)?;
    let ctx = ctx.with_id(&id);

    state
        .store
        .delete(&entry.def, &id)
        .await
        .map_err(|e| ctx.storage(e))?;

    tracing::debug!(type_name = entry.def.name(), %id, "object deleted");
    Ok(StatusCode::NO_CONTENT)
}
