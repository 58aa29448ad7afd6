//! Leaderboard module - ranks the current roster
//!
//! Ordering is by all-time wins, then all-time score, then how far along the
//! current board a player is, all descending. Nothing is cached: every call
//! reads the live records and positions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::types::{Node, Token};

/// A point-in-time view of one player for ranking and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based place; 0 until ranked.
    pub rank: usize,
    pub name: String,
    pub token: Token,
    pub total_wins: u32,
    pub total_score: u32,
    pub position: Node,
    pub session_score: u32,
}

impl Standing {
    pub fn of(player: &Player) -> Self {
        let totals = player.record_totals();
        Self {
            rank: 0,
            name: player.name().to_owned(),
            token: player.token(),
            total_wins: totals.total_wins,
            total_score: totals.total_score,
            position: player.position(),
            session_score: player.session_score(),
        }
    }
}

/// `Less` means `a` ranks above `b`.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.total_wins
        .cmp(&a.total_wins)
        .then_with(|| b.total_score.cmp(&a.total_score))
        .then_with(|| b.position.cmp(&a.position))
}

/// Players best-first.
pub fn rank(players: &[Player]) -> Vec<&Player> {
    let mut keyed: Vec<(Standing, &Player)> =
        players.iter().map(|p| (Standing::of(p), p)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_standings(a, b));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Ranked standings with places filled in.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    rank_standings(players.iter().map(Standing::of).collect())
}

/// Sort standings best-first and number them from 1.
pub fn rank_standings(mut rows: Vec<Standing>) -> Vec<Standing> {
    rows.sort_by(compare_standings);
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}
