use serde::{Deserialize, Serialize};

use crate::leaderboard::Standing;
use crate::player::Player;
use crate::turn::{RollOutcome, TurnOutcome, TurnPhase};
use crate::types::{Ladder, Node, Token};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub token: Token,
    pub position: Node,
    pub session_score: u32,
    pub total_wins: u32,
    pub total_score: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(value: &Player) -> Self {
        let totals = value.record_totals();
        Self {
            name: value.name().to_owned(),
            token: value.token(),
            position: value.position(),
            session_score: value.session_score(),
            total_wins: totals.total_wins,
            total_score: totals.total_score,
        }
    }
}

/// Read-only copy of everything a front end draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: TurnPhase,
    pub started: bool,
    pub turn_in_progress: bool,
    pub round: u32,
    pub sessions_started: u32,
    pub current: Option<String>,
    /// Seat of the current player; names may repeat, seats do not.
    pub current_seat: Option<usize>,
    pub turn_queue: Vec<String>,
    pub players: Vec<PlayerSnapshot>,
    pub ladders: Vec<Ladder>,
    pub score_nodes: Vec<Node>,
    pub last_roll: Option<RollOutcome>,
    pub last_outcome: Option<TurnOutcome>,
    pub pending_path: Vec<Node>,
    pub winner: Option<String>,
    pub standings: Vec<Standing>,
}

impl GameSnapshot {
    pub fn can_roll(&self) -> bool {
        self.phase == TurnPhase::AwaitingRoll
    }

    pub fn bonus_node(&self) -> Option<Node> {
        match self.phase {
            TurnPhase::BonusOffer { node } => Some(node),
            _ => None,
        }
    }

    pub fn ladder_at(&self, node: Node) -> Option<Ladder> {
        self.ladders.iter().copied().find(|l| l.from == node)
    }

    pub fn is_score_node(&self, node: Node) -> bool {
        self.score_nodes.contains(&node)
    }

    /// Players standing on `node` with their seats, in seating order.
    pub fn players_at(&self, node: Node) -> impl Iterator<Item = (usize, &PlayerSnapshot)> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.position == node)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&PlayerSnapshot> {
        self.players.get(self.current_seat?)
    }

    /// The ladder being climbed by the move just applied, if any.
    ///
    /// Used to highlight a ladder while a path animates.
    pub fn active_ladder(&self) -> Option<Ladder> {
        let roll = self.last_roll.as_ref()?;
        let applied = roll.path.len().checked_sub(self.pending_path.len())?;
        let to = *roll.path.get(applied.checked_sub(1)?)?;
        let from = match applied {
            1 => roll.start,
            n => *roll.path.get(n - 2)?,
        };
        crate::movement::ladder_hint(&self.ladders, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn snapshot_mid_roll(applied: usize) -> GameSnapshot {
        let path = vec![4, 20, 21];
        GameSnapshot {
            phase: TurnPhase::Moving,
            ladders: vec![Ladder::new(4, 20)],
            pending_path: path[applied..].to_vec(),
            last_roll: Some(RollOutcome {
                player: "A".into(),
                dice: 2,
                direction: Direction::Forward,
                ladder_eligible: true,
                start: 3,
                path,
            }),
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_active_ladder_tracks_applied_steps() {
        assert_eq!(snapshot_mid_roll(0).active_ladder(), None);
        assert_eq!(snapshot_mid_roll(1).active_ladder(), None);
        assert_eq!(snapshot_mid_roll(2).active_ladder(), Some(Ladder::new(4, 20)));
        assert_eq!(snapshot_mid_roll(3).active_ladder(), None);
    }

    #[test]
    fn test_default_snapshot_is_idle() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.phase, TurnPhase::Idle);
        assert!(!snap.can_roll());
        assert!(snap.current_player().is_none());
        assert_eq!(snap.bonus_node(), None);
    }

    #[test]
    fn test_players_at_keeps_seats_for_repeated_names() {
        let twin = PlayerSnapshot {
            name: "Sam".into(),
            token: Token::Red,
            position: 7,
            session_score: 0,
            total_wins: 0,
            total_score: 0,
        };
        let snap = GameSnapshot {
            current_seat: Some(1),
            players: vec![
                twin.clone(),
                PlayerSnapshot {
                    token: Token::Blue,
                    ..twin
                },
            ],
            ..GameSnapshot::default()
        };
        let seats: Vec<usize> = snap.players_at(7).map(|(seat, _)| seat).collect();
        assert_eq!(seats, vec![0, 1]);
        assert_eq!(snap.current_player().map(|p| p.token), Some(Token::Blue));
    }
}
