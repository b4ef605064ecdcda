//! HTTP surface: request/response mapping only, no core logic.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use xinbot_chat::{ChatEngine, TurnRecord};

const INDEX_HTML: &str = include_str!("../static/index.html");
const DEFAULT_SESSION: &str = "default";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChatEngine>,
    pub keywords_file: Option<PathBuf>,
}

#[derive(Deserialize)]
struct ChatRequest {
    query: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct RecommendRequest {
    query: String,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct NearbyRequest {
    address: String,
}

#[derive(Serialize)]
struct HistoryResponse {
    items: Vec<TurnRecord>,
}

#[derive(Serialize)]
struct ReloadResponse {
    reloaded: bool,
    categories: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn internal_error(err: anyhow::Error) -> (StatusCode, Json<ErrorBody>) {
    tracing::error!("internal error: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/ping", get(ping))
        .route("/chat", post(chat))
        .route("/recommend", post(recommend))
        .route("/nearby", post(nearby))
        .route("/history/{session_id}", get(history))
        .route("/keywords/reload", post(reload_keywords))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn serve_index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> impl IntoResponse {
    let session_id = req.session_id.as_deref().unwrap_or(DEFAULT_SESSION);
    let payload = state
        .engine
        .handle(session_id, &req.query, req.model.as_deref())
        .await;
    Json(payload)
}

async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> impl IntoResponse {
    Json(state.engine.recommend(&req.query, req.model.as_deref()).await)
}

async fn nearby(
    State(state): State<AppState>,
    Json(req): Json<NearbyRequest>,
) -> impl IntoResponse {
    Json(state.engine.nearby(&req.address).await)
}

async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    Json(HistoryResponse {
        items: state.engine.history(&session_id),
    })
}

async fn reload_keywords(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, (StatusCode, Json<ErrorBody>)> {
    let categories = state
        .engine
        .taxonomy()
        .reload(state.keywords_file.as_deref())
        .map_err(internal_error)?;
    Ok(Json(ReloadResponse {
        reloaded: true,
        categories,
    }))
}
