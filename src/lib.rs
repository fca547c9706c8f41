pub mod config;
mod error;
pub mod game;
pub mod repository;

pub use error::ServerError;
pub use game::messages;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade, ws::WebSocket},
    response::Response,
    routing::get,
};
use game::GameState;
use game::engine::MatchSettings;
use repository::PreferenceStore;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

async fn health() -> &'static str {
    "ok"
}

#[derive(Clone)]
pub struct AppState {
    pub game: Arc<GameState>,
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    game::handle_connection(socket, state.game).await;
}

/// Open the database and bring its schema up to date
pub async fn connect_database(url: &str) -> Result<SqlitePool, ServerError> {
    let pool = SqlitePoolOptions::new().connect(url).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

pub fn app(pool: SqlitePool) -> Router {
    app_with_config(pool, MatchSettings::default())
}

pub fn app_with_config(pool: SqlitePool, settings: MatchSettings) -> Router {
    let preferences = PreferenceStore::new(pool);
    let state = AppState {
        game: Arc::new(GameState::new(preferences, settings)),
    };

    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
