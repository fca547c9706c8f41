use crate::game::engine::{MatchSettings, PhaseTimings};
use crate::game::engine::settings::{
    DEFAULT_CLEAR_BOARD_DELAY, DEFAULT_ENABLE_INPUT_DELAY, DEFAULT_GAME_OVER_DELAY,
    DEFAULT_REVEAL_DELAY,
};
use crate::game::core::DEFAULT_MAX_ROUNDS;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:rochambeau.db?mode=rwc";

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub max_rounds: u32,
    pub timings: PhaseTimings,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparseable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str, default: Duration| {
            let default_ms = default.as_millis() as u64;
            Duration::from_millis(parse_or(&lookup, key, default_ms))
        };

        Self {
            port: parse_or(&lookup, "PORT", 3000),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_rounds: parse_or(&lookup, "MAX_ROUNDS", DEFAULT_MAX_ROUNDS).max(1),
            timings: PhaseTimings {
                reveal: millis("REVEAL_DELAY_MS", DEFAULT_REVEAL_DELAY),
                game_over: millis("GAME_OVER_DELAY_MS", DEFAULT_GAME_OVER_DELAY),
                enable_input: millis("ENABLE_INPUT_DELAY_MS", DEFAULT_ENABLE_INPUT_DELAY),
                clear_board: millis("CLEAR_BOARD_DELAY_MS", DEFAULT_CLEAR_BOARD_DELAY),
            },
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            max_rounds: self.max_rounds,
            timings: self.timings,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
