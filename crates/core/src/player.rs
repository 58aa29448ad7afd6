//! Player module - one participant in the running session

use crate::record::{PlayerRecord, RecordHandle};
use crate::types::{Node, Token, START_NODE};

/// A session participant.
///
/// Position and session score belong to this session only; wins and total
/// score live in the shared record.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    token: Token,
    position: Node,
    session_score: u32,
    record: RecordHandle,
}

impl Player {
    /// Create a player standing on the start node.
    pub fn new(name: impl Into<String>, token: Token, record: RecordHandle) -> Self {
        Self {
            name: name.into(),
            token,
            position: START_NODE,
            session_score: 0,
            record,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn position(&self) -> Node {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Node) {
        self.position = position;
    }

    pub fn session_score(&self) -> u32 {
        self.session_score
    }

    /// Award points to this session and to the player's record.
    pub fn add_score(&mut self, points: u32) {
        self.session_score = self.session_score.saturating_add(points);
        self.record.add_score(points);
    }

    pub fn add_win(&self) {
        self.record.add_win();
    }

    pub fn record(&self) -> &RecordHandle {
        &self.record
    }

    pub fn total_wins(&self) -> u32 {
        self.record.total_wins()
    }

    pub fn total_score(&self) -> u32 {
        self.record.total_score()
    }

    pub fn record_totals(&self) -> PlayerRecord {
        self.record.get()
    }

    /// Back to the start for a new round; the record is kept.
    pub(crate) fn reset_for_round(&mut self) {
        self.position = START_NODE;
        self.session_score = 0;
    }
}
