use axum::extract::{Path, Query, State};
use axum::routing::{MethodRouter, get};
use axum::{Json, Router};
use cinedex_core::types::Envelope;
use cinedex_upstream::catalog::Operation;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/movies", movies_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn movies_router() -> Router<AppState> {
    let mut router = Router::new();
    for op in Operation::ALL {
        router = router.route(&format!("/{}", op.as_str()), listing(op));
    }
    router
        // Singular spellings used by the web client
        .route("/most-popular-movie", listing(Operation::MostPopularMovies))
        .route("/top250-movie", listing(Operation::Top250Movies))
        .route("/title/{id}", get(get_title))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

fn listing(op: Operation) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, Query(query): Query<Vec<(String, String)>>| async move {
            list_operation(state, op, query).await
        },
    )
}

async fn list_operation(
    state: AppState,
    op: Operation,
    query: Vec<(String, String)>,
) -> Result<Json<Envelope>, AppError> {
    let envelope = state.catalog.list(op, query).await?;
    Ok(Json(envelope))
}

async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let body = state.catalog.title(&id).await?;
    Ok(Json(body))
}
