//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small conversions, so they
//! can be shared by the engine, the terminal view and any external observer.
//!
//! # Board
//!
//! The track has 64 nodes numbered 1 (start) to 64 (finish). Movement is along
//! that 1-D sequence; the 8x8 serpentine grid is only a display concern
//! (see [`node_to_cell`]).
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `START_NODE` | 1 | Where every token begins a session |
//! | `FINISH_NODE` | 64 | Landing here wins |
//! | `LADDER_COUNT` | 5 | Ladders generated per session |
//! | `SCORE_NODE_COUNT` | 10 | Star nodes generated per session |
//! | `BACKWARD_CHANCE_PERCENT` | 20 | Chance a roll moves backward |
//! | `BONUS_ROLL_MULTIPLE` | 5 | Nodes that offer a bonus roll |
//!
//! # Examples
//!
//! ```
//! use ladder_games_types::{node_to_cell, Direction, Ladder, FINISH_NODE};
//!
//! let ladder = Ladder::new(4, 20);
//! assert_eq!(ladder.span(), 16);
//!
//! assert_eq!(Direction::Forward.as_str(), "forward");
//! assert_eq!(node_to_cell(FINISH_NODE), Some((0, 7)));
//! assert_eq!(node_to_cell(1), Some((7, 7)));
//! ```

use serde::{Deserialize, Serialize};

/// A position on the linear track (1..=64).
pub type Node = u8;

/// Number of nodes on the board.
pub const BOARD_NODES: u8 = 64;

/// Side length of the display grid (8x8).
pub const BOARD_SIDE: u8 = 8;

/// Every token starts here.
pub const START_NODE: Node = 1;

/// Reaching this node wins the session.
pub const FINISH_NODE: Node = 64;

/// Number of ladders placed per session.
pub const LADDER_COUNT: usize = 5;

/// Lowest node a generated ladder may start on.
pub const LADDER_FROM_MIN: Node = 2;

/// Highest node a generated ladder may start on.
pub const LADDER_FROM_MAX: Node = 50;

/// Shortest generated ladder.
pub const LADDER_JUMP_MIN: u8 = 10;

/// Longest generated ladder.
pub const LADDER_JUMP_MAX: u8 = 25;

/// Highest node a ladder may end on (a ladder never reaches the finish).
pub const LADDER_TO_MAX: Node = 63;

/// Number of star (score) nodes placed per session.
pub const SCORE_NODE_COUNT: usize = 10;

/// Lowest node a star may occupy.
pub const SCORE_NODE_MIN: Node = 2;

/// Highest node a star may occupy.
pub const SCORE_NODE_MAX: Node = 63;

/// Faces on the die.
pub const DICE_FACES: u8 = 6;

/// Chance (out of 100) that a roll moves the token backward.
pub const BACKWARD_CHANCE_PERCENT: u32 = 20;

/// Landing on a positive multiple of this (other than the finish) offers a bonus roll.
pub const BONUS_ROLL_MULTIPLE: Node = 5;

/// Star points are `STAR_POINTS_UNIT * uniform(1..=STAR_POINTS_MAX_MULTIPLIER)`.
pub const STAR_POINTS_UNIT: u32 = 10;

/// Upper bound of the star points multiplier.
pub const STAR_POINTS_MAX_MULTIPLIER: u32 = 5;

/// Fewest players in a session.
pub const MIN_PLAYERS: usize = 2;

/// Most players in a session.
pub const MAX_PLAYERS: usize = 4;

/// Sampling attempts allowed before board generation gives up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 10_000;

/// A directional shortcut from a lower node to a higher one.
///
/// Ladders are only climbed on forward movement, and only when the player
/// started the roll on a prime node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ladder {
    pub from: Node,
    pub to: Node,
}

impl Ladder {
    pub const fn new(from: Node, to: Node) -> Self {
        Self { from, to }
    }

    /// Number of nodes skipped by climbing.
    pub fn span(&self) -> u8 {
        self.to.saturating_sub(self.from)
    }
}

/// Which way a roll moves the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }

    pub fn is_backward(&self) -> bool {
        matches!(self, Direction::Backward)
    }
}

/// Opaque display identifier for a player's piece.
///
/// Assigned by roster position; the engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Red,
    Blue,
    Green,
    Orange,
}

impl Token {
    pub const ALL: [Token; MAX_PLAYERS] = [Token::Red, Token::Blue, Token::Green, Token::Orange];

    /// Token for the player at `index` in the roster (wraps past four).
    pub fn for_seat(index: usize) -> Self {
        Self::ALL[index % MAX_PLAYERS]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Red => "red",
            Token::Blue => "blue",
            Token::Green => "green",
            Token::Orange => "orange",
        }
    }
}

/// Commands a front end can issue to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Roll the die for the current player
    Roll,
    /// Take the offered bonus roll
    AcceptBonus,
    /// Pass on the offered bonus roll
    DeclineBonus,
    /// Replay with the same roster after a win
    NewRound,
    /// Start a fresh session with the configured names
    NewGame,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use ladder_games_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("roll"), Some(GameAction::Roll));
    /// assert_eq!(GameAction::from_str("acceptBonus"), Some(GameAction::AcceptBonus));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "roll" => Some(GameAction::Roll),
            "acceptbonus" => Some(GameAction::AcceptBonus),
            "declinebonus" => Some(GameAction::DeclineBonus),
            "newround" => Some(GameAction::NewRound),
            "newgame" => Some(GameAction::NewGame),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Roll => "roll",
            GameAction::AcceptBonus => "acceptBonus",
            GameAction::DeclineBonus => "declineBonus",
            GameAction::NewRound => "newRound",
            GameAction::NewGame => "newGame",
        }
    }
}

/// Notifications emitted by the turn engine, in the order they happened.
///
/// Front ends drain these to drive animation, highlights and dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        players: Vec<String>,
        round: u32,
    },
    Rolled {
        player: String,
        dice: u8,
        direction: Direction,
        ladder_eligible: bool,
        path: Vec<Node>,
    },
    /// One node of the path was applied to the current player.
    Stepped {
        player: String,
        from: Node,
        to: Node,
        /// Ladder being climbed on this step, for highlighting.
        ladder: Option<Ladder>,
        /// Star points awarded on this step.
        points: Option<u32>,
    },
    BonusRollOffered {
        player: String,
        node: Node,
    },
    TurnPassed {
        from: String,
        to: String,
    },
    PlayerWon {
        name: String,
        total_wins: u32,
        total_score: u32,
        session_score: u32,
    },
    RoundReset {
        round: u32,
    },
}

/// Map a node to its display cell `(row, col)` on the 8x8 grid.
///
/// Counting down from the finish: row 0 is drawn at the top and holds
/// 64..=57, so the finish sits top right and the start bottom right. Even
/// rows place their first (highest) node on the right, odd rows on the left.
/// Returns `None` for nodes off the board.
pub fn node_to_cell(node: Node) -> Option<(u8, u8)> {
    if node < START_NODE || node > FINISH_NODE {
        return None;
    }
    let idx = FINISH_NODE - node;
    let row = idx / BOARD_SIDE;
    let offset = idx % BOARD_SIDE;
    let col = if row % 2 == 0 {
        BOARD_SIDE - 1 - offset
    } else {
        offset
    };
    Some((row, col))
}

/// Inverse of [`node_to_cell`].
pub fn cell_to_node(row: u8, col: u8) -> Option<Node> {
    if row >= BOARD_SIDE || col >= BOARD_SIDE {
        return None;
    }
    let offset = if row % 2 == 0 {
        BOARD_SIDE - 1 - col
    } else {
        col
    };
    Some(FINISH_NODE - (row * BOARD_SIDE + offset))
}
