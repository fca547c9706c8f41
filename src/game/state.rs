use super::client::ClientPresenter;
use super::core::messages::ServerMessage;
use super::engine::{ActiveMatch, MatchSettings, RandomOpponent, TurnSequencer};
use crate::repository::PreferenceStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// A connected player and the match they are playing
pub struct PlayerSession {
    pub user_id: String,
    pub game: ActiveMatch,
    sound_enabled: Arc<AtomicBool>,
}

impl PlayerSession {
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled.load(Ordering::Relaxed)
    }
}

/// Shared service state: where preferences live and how matches are set up
pub struct GameState {
    preferences: PreferenceStore,
    settings: MatchSettings,
}

impl GameState {
    pub fn new(preferences: PreferenceStore, settings: MatchSettings) -> Self {
        Self {
            preferences,
            settings,
        }
    }

    pub fn settings(&self) -> MatchSettings {
        self.settings
    }

    /// Load the player's preferences and start a fresh match presenting to `tx`
    pub async fn start_session(
        &self,
        user_id: Option<String>,
        tx: broadcast::Sender<ServerMessage>,
    ) -> PlayerSession {
        let user_id = user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let sound_enabled = Arc::new(AtomicBool::new(
            self.preferences.sound_enabled(&user_id).await,
        ));

        let presenter = ClientPresenter::new(tx, sound_enabled.clone());
        let sequencer = TurnSequencer::new(self.settings, RandomOpponent, presenter);

        info!(
            %user_id,
            max_rounds = self.settings.max_rounds,
            sound_enabled = sound_enabled.load(Ordering::Relaxed),
            "Match started"
        );

        PlayerSession {
            user_id,
            game: ActiveMatch::spawn(sequencer),
            sound_enabled,
        }
    }

    /// Flip the sound preference, persist it, and return the new value
    pub async fn toggle_sound(&self, session: &PlayerSession) -> bool {
        let enabled = !session.sound_enabled.fetch_xor(true, Ordering::Relaxed);

        if let Err(err) = self
            .preferences
            .set_sound_enabled(&session.user_id, enabled)
            .await
        {
            warn!(user_id = %session.user_id, %err, "Failed to save sound preference");
        }

        info!(user_id = %session.user_id, enabled, "Sound toggled");
        enabled
    }
}
