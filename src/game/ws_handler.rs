use super::core::messages::{ClientMessage, ServerMessage};
use super::core::feedback::PROMPT;
use super::engine::MatchError;
use super::state::{GameState, PlayerSession};
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Context for a WebSocket connection: the player's session once they joined
#[derive(Default)]
pub struct ConnectionContext {
    pub session: Option<PlayerSession>,
}

/// Run a WebSocket connection: split the socket, forward server messages from
/// the broadcast channel, and dispatch client messages until either side closes.
pub async fn handle_connection(socket: WebSocket, state: Arc<GameState>) {
    info!("New WebSocket connection");
    let (mut sender, receiver) = socket.split();
    let (tx, mut rx) = broadcast::channel::<ServerMessage>(32);

    // Task to send messages from the broadcast channel to the WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = next_outgoing(&mut rx).await {
            debug!(?msg, "Sending message to client");
            let Ok(json) = serde_json::to_string(&msg) else {
                warn!(?msg, "Failed to serialize server message");
                continue;
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(receive_loop(receiver, tx, state));

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        result = &mut recv_task => {
            if let Ok(Some(user_id)) = result {
                info!(%user_id, "Player left");
            }
            send_task.abort();
        },
    }

    info!("WebSocket connection closed");
}

/// Next message for the client. A client that fell behind skips what it
/// missed; `None` only once the channel is closed.
async fn next_outgoing(rx: &mut broadcast::Receiver<ServerMessage>) -> Option<ServerMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Client fell behind, dropping missed messages");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    tx: broadcast::Sender<ServerMessage>,
    state: Arc<GameState>,
) -> Option<String> {
    let mut ctx = ConnectionContext::default();

    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else {
            debug!("Received non-text message, ignoring");
            continue;
        };

        debug!(raw = %text, "Received message");

        let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) else {
            warn!(raw = %text, "Failed to parse client message");
            let _ = tx.send(ServerMessage::Error {
                message: "Unrecognized message".to_string(),
            });
            continue;
        };

        handle_message(&state, client_msg, &tx, &mut ctx).await;
    }

    // Dropping the session drops the match handle, which stops the match task
    ctx.session.map(|s| s.user_id)
}

async fn handle_message(
    state: &GameState,
    msg: ClientMessage,
    tx: &broadcast::Sender<ServerMessage>,
    ctx: &mut ConnectionContext,
) {
    if let ClientMessage::Join { user_id } = msg {
        if ctx.session.is_some() {
            warn!("Received Join on a connection that already joined");
            let _ = tx.send(ServerMessage::Error {
                message: "Already joined".to_string(),
            });
            return;
        }

        let session = state.start_session(user_id, tx.clone()).await;
        let _ = tx.send(ServerMessage::Welcome {
            user_id: session.user_id.clone(),
            max_rounds: state.settings().max_rounds,
            sound_enabled: session.sound_enabled(),
        });
        let _ = tx.send(ServerMessage::RoundStart {
            round: 1,
            message: PROMPT.to_string(),
        });
        ctx.session = Some(session);
        return;
    }

    let Some(session) = &ctx.session else {
        warn!(?msg, "Received message before Join");
        let _ = tx.send(ServerMessage::Error {
            message: "Join a match first".to_string(),
        });
        return;
    };

    match msg {
        ClientMessage::Choose { choice } => {
            match session.game.request_player_move(choice).await {
                Ok(()) => {}
                Err(MatchError::Rejected(rejected)) => {
                    debug!(user_id = %session.user_id, ?choice, phase = ?rejected.phase, "Move rejected");
                    let _ = tx.send(ServerMessage::MoveRejected {
                        phase: rejected.phase,
                    });
                }
                Err(MatchError::Closed) => warn!(user_id = %session.user_id, "Match task is gone"),
            }
        }
        ClientMessage::PlayAgain => {
            if session.game.reset().await.is_err() {
                warn!(user_id = %session.user_id, "Match task is gone");
            }
        }
        ClientMessage::ToggleSound => {
            let enabled = state.toggle_sound(session).await;
            let _ = tx.send(ServerMessage::SoundPreference { enabled });
        }
        ClientMessage::Join { .. } => {}
    }
}
