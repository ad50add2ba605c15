use std::future::Future;
use std::path::PathBuf;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::{GameId, log};

use crate::game_store::{GameStore, StoreError};
use crate::game_view::GameView;

#[derive(Clone)]
pub struct WebServerState {
    pub game_store: GameStore,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub position: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

pub enum ApiError {
    NotFound,
    BadRequest(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::GameNotFound(_) => ApiError::NotFound,
            StoreError::InvalidMove(invalid) => ApiError::BadRequest(invalid.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Game not found".to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub fn build_router(game_store: GameStore, static_files_path: Option<PathBuf>) -> Router {
    let state = WebServerState { game_store };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/game/new", post(new_game_handler))
        .route("/game/{id}", get(get_game_handler))
        .route("/game/{id}/move", post(move_handler))
        .route("/game/{id}/reset", post(reset_handler));

    if let Some(path) = static_files_path {
        app = app.nest_service("/ui", ServeDir::new(path));
    }

    app.layer(cors).with_state(state)
}

pub async fn run_web_server<F>(
    address: &str,
    game_store: GameStore,
    static_files_path: Option<PathBuf>,
    shutdown_signal: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(game_store, static_files_path);

    let listener = tokio::net::TcpListener::bind(address).await?;
    log!("Web server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

async fn health_handler() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn new_game_handler(State(state): State<WebServerState>) -> Json<GameView> {
    let (game_id, game) = state.game_store.create_game().await;
    Json(GameView::new(game_id, &game))
}

async fn get_game_handler(
    State(state): State<WebServerState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game_id = GameId::new(id);
    let game = state
        .game_store
        .get_game(&game_id)
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(Json(GameView::new(game_id, &game)))
}

async fn move_handler(
    State(state): State<WebServerState>,
    Path(id): Path<String>,
    request: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameView>, ApiError> {
    let game_id = GameId::new(id);
    let Json(request) = request.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid position: {}", rejection.body_text()))
    })?;

    let game = state
        .game_store
        .apply_move(&game_id, request.position)
        .await?;
    Ok(Json(GameView::new(game_id, &game)))
}

async fn reset_handler(
    State(state): State<WebServerState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game_id = GameId::new(id);
    let game = state.game_store.reset_game(&game_id).await?;
    Ok(Json(GameView::new(game_id, &game)))
}
