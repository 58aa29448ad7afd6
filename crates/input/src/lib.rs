//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every action
//! is a single key press, so there is no repeat handling; the caller filters
//! for `KeyEventKind::Press`.

pub mod map;

pub use ladder_games_types as types;

pub use map::{handle_key_event, should_quit};
