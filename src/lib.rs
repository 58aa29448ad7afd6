//! Ladder race (workspace facade crate).
//!
//! Re-exports the `core`, `input`, `term` and `types` crates under one name and
//! holds the runner's command-line configuration and log setup.

pub mod config;
pub mod logging;

pub use ladder_games_core as core;
pub use ladder_games_input as input;
pub use ladder_games_term as term;
pub use ladder_games_types as types;
