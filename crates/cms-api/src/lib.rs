//! # cms-api: Axum Service for the Content API
//!
//! Turns a set of declared content types into REST endpoints. Each type gets
//! list/get/create/update/delete routes under `/api/{type}`; writes are
//! gated by the type's JSON Schema and persisted through a pluggable
//! [`cms_store::StorageProvider`].
//!
//! ## API Surface
//!
//! | Path                 | Module                 |
//! |----------------------|------------------------|
//! | `/`                  | liveness, empty 200    |
//! | `/api/{type}[/{id}]` | [`routes::content`]    |
//! | `/api/describe`      | [`routes::describe`]   |
//! | `/admin/*`           | [`admin`]              |
//!
//! ## Layers (outermost first)
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → Handler
//! ```

pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route("/api/describe", get(routes::describe::describe))
        .merge(routes::content::router(&state.types))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes));

    let mut app = api.with_state(state.clone());
    if let Some(dir) = &state.config.admin_assets {
        app = app.nest_service("/admin", admin::service(dir));
    }

    app.layer(TraceLayer::new_for_http())
}

async fn root() -> StatusCode {
    StatusCode::OK
}
