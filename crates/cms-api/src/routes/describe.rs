//! # Type Introspection
//!
//! `GET /api/describe` returns every registered type with its id field and
//! the schema text exactly as configured, in registration order.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cms_core::TypeDef;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct DescribeResponse<'a> {
    types: Vec<&'a TypeDef>,
}

pub async fn describe(State(state): State<AppState>) -> Response {
    let types = state.types.iter().map(|entry| &entry.def).collect();
    Json(DescribeResponse { types }).into_response()
}
