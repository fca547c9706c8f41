#![allow(dead_code)]

use futures_util::StreamExt;
use rochambeau::game::engine::{MatchSettings, PhaseTimings};
use rochambeau::messages::{ClientMessage, ServerMessage};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("{}/ws", self.base_url)
    }
}

/// A single in-memory connection so every query sees the migrated schema
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

/// Short delays so whole matches finish quickly
pub fn fast_settings(max_rounds: u32) -> MatchSettings {
    MatchSettings {
        max_rounds,
        timings: PhaseTimings::uniform(Duration::from_millis(10)),
    }
}

pub async fn spawn_test_server() -> TestServer {
    spawn_test_server_with_settings(fast_settings(5)).await
}

pub async fn spawn_test_server_with_settings(settings: MatchSettings) -> TestServer {
    let pool = test_pool().await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let app = rochambeau::app_with_config(pool, settings);
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("ws://{}", addr),
    }
}

pub async fn connect(server: &TestServer) -> WsStream {
    let (ws, _) = connect_async(&server.ws_url()).await.expect("Failed to connect");
    ws
}

fn to_message(msg: &ClientMessage) -> Message {
    let json = serde_json::to_string(msg).unwrap();
    Message::Text(json.into())
}

pub fn join_msg(user_id: Option<&str>) -> Message {
    to_message(&ClientMessage::Join {
        user_id: user_id.map(str::to_string),
    })
}

pub fn choose_msg(choice: rochambeau::game::core::Move) -> Message {
    to_message(&ClientMessage::Choose { choice })
}

pub fn play_again_msg() -> Message {
    to_message(&ClientMessage::PlayAgain)
}

pub fn toggle_sound_msg() -> Message {
    to_message(&ClientMessage::ToggleSound)
}

pub async fn recv(ws: &mut WsStream) -> ServerMessage {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("Timed out waiting for server message")
        .unwrap()
        .unwrap();
    serde_json::from_str(msg.to_text().unwrap()).unwrap()
}
