pub mod client;
pub mod core;
pub mod engine;
pub mod state;
pub mod ws_handler;

pub use core::messages;
pub use state::GameState;
pub use ws_handler::handle_connection;
