//! Route handlers. One handler per document kind, all delegating to
//! the shared emission pipeline.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::core::{DocumentKind, EmisionError, RawDocument, ValidationError};

use super::error::ApiError;
use super::response::success_body;
use super::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/factura", post(post_factura))
        .route("/api/boleta", post(post_boleta))
        .route("/api/nota-credito", post(post_nota_credito))
        .route("/api/nota-debito", post(post_nota_debito))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn post_factura(
    State(state): State<AppState>,
    payload: Result<Json<RawDocument>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    issue(state, DocumentKind::Invoice, payload).await
}

async fn post_boleta(
    State(state): State<AppState>,
    payload: Result<Json<RawDocument>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    issue(state, DocumentKind::Receipt, payload).await
}

async fn post_nota_credito(
    State(state): State<AppState>,
    payload: Result<Json<RawDocument>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    issue(state, DocumentKind::CreditNote, payload).await
}

async fn post_nota_debito(
    State(state): State<AppState>,
    payload: Result<Json<RawDocument>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    issue(state, DocumentKind::DebitNote, payload).await
}

async fn issue(
    state: AppState,
    kind: DocumentKind,
    payload: Result<Json<RawDocument>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    // The extractor result is taken by hand so malformed bodies get the
    // same JSON error envelope as any other validation failure.
    let Json(raw) = payload
        .map_err(|e| EmisionError::Validation(ValidationError::new("body", e.body_text())))?;
    let outcome = state.service.issue(kind, raw).await?;
    Ok(Json(success_body(&outcome)))
}
