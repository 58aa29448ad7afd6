//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the ladder race: board generation, movement,
//! star scoring, bonus rolls, turn order, persistent records and ranking.
//! It has **no dependencies** on terminal, input, or I/O code, so:
//!
//! - **Deterministic**: one random source per engine; the same seed replays the same game
//! - **Testable**: every draw can be scripted with [`ScriptedRng`]
//! - **Portable**: a front end only needs the snapshot and the event queue
//!
//! # Module Structure
//!
//! - [`board`]: ladder and star placement with bounded rejection sampling
//! - [`movement`]: dice roll to visited-node path, ladder climbing
//! - [`rules`]: primes, bonus nodes, and the per-roll draws
//! - [`record`]: per-name win and score totals shared across sessions
//! - [`player`]: one participant's position and session score
//! - [`leaderboard`]: wins, then score, then position
//! - [`turn`]: the [`TurnEngine`] state machine
//! - [`snapshot`]: a plain copy of engine state for rendering
//!
//! # Game Rules
//!
//! - **Board**: 64 nodes in an 8x8 serpentine grid, 5 ladders, 10 star nodes
//! - **Dice**: 1-6, with a 20% chance the move goes backward
//! - **Ladders**: only climbed on forward moves by a player who began the roll on a prime node
//! - **Stars**: landing on one pays 10-50 points to both session and all-time score
//! - **Bonus**: ending on a multiple of 5 offers another roll
//! - **Win**: reaching node 64 exactly or by clamping
//!
//! # Example
//!
//! ```
//! use ladder_games_core::{TurnEngine, TurnOutcome};
//!
//! let mut engine = TurnEngine::new(12345);
//! engine.start_game(&["Ana", "Budi"]).unwrap();
//!
//! let result = engine.roll_dice().unwrap();
//! assert!((1..=6).contains(&result.roll.dice));
//! if let TurnOutcome::BonusRollOffered { .. } = result.outcome {
//!     engine.resolve_bonus(false).unwrap();
//! }
//! assert_eq!(engine.current_player().unwrap().name(), "Budi");
//! ```

pub mod board;
pub mod error;
pub mod leaderboard;
pub mod movement;
pub mod player;
pub mod record;
pub mod rng;
pub mod rules;
pub mod snapshot;
pub mod turn;

pub use ladder_games_types as types;

// Re-export commonly used types for convenience
pub use board::{generate_board, generate_ladders, generate_score_nodes, Board};
pub use error::{GameError, GenerationTarget};
pub use leaderboard::{compare_standings, rank, rank_standings, standings, Standing};
pub use movement::compute_path;
pub use player::Player;
pub use record::{PlayerRecord, RecordBook, RecordHandle};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use rules::is_prime;
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use turn::{RollOutcome, Step, TurnEngine, TurnOutcome, TurnPhase, TurnResult};
