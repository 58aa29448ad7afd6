//! Board module - per-session ladder and star placement
//!
//! A [`Board`] is generated once per session (and again for each new round)
//! from the engine's random source. Generation is bounded: each pass gives up
//! after [`MAX_GENERATION_ATTEMPTS`] samples instead of looping forever, and a
//! failed pass commits nothing.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GameError, GenerationTarget};
use crate::rng::RandomSource;
use crate::types::{
    Ladder, Node, LADDER_COUNT, LADDER_FROM_MAX, LADDER_FROM_MIN, LADDER_JUMP_MAX,
    LADDER_JUMP_MIN, LADDER_TO_MAX, MAX_GENERATION_ATTEMPTS, SCORE_NODE_COUNT, SCORE_NODE_MAX,
    SCORE_NODE_MIN,
};

/// Ladders and star nodes for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    ladders: Vec<Ladder>,
    score_nodes: BTreeSet<Node>,
}

impl Board {
    /// Build a board from a known layout, checking the placement rules.
    ///
    /// Ladders need not come from the generator's `from` range, but they must
    /// climb, stay inside `2..=63` and share no endpoint.
    pub fn new(
        ladders: impl IntoIterator<Item = Ladder>,
        score_nodes: impl IntoIterator<Item = Node>,
    ) -> Result<Self, GameError> {
        let ladders: Vec<Ladder> = ladders.into_iter().collect();
        let score_nodes: BTreeSet<Node> = score_nodes.into_iter().collect();

        if ladders.len() != LADDER_COUNT {
            return Err(invalid(format!(
                "expected {} ladders, got {}",
                LADDER_COUNT,
                ladders.len()
            )));
        }

        let mut used = HashSet::new();
        for ladder in &ladders {
            if ladder.from < LADDER_FROM_MIN || ladder.to > LADDER_TO_MAX || ladder.to <= ladder.from
            {
                return Err(invalid(format!(
                    "ladder {}->{} is out of range",
                    ladder.from, ladder.to
                )));
            }
            if !used.insert(ladder.from) || !used.insert(ladder.to) {
                return Err(invalid(format!(
                    "ladder {}->{} shares an endpoint",
                    ladder.from, ladder.to
                )));
            }
        }

        if score_nodes.len() != SCORE_NODE_COUNT {
            return Err(invalid(format!(
                "expected {} distinct score nodes, got {}",
                SCORE_NODE_COUNT,
                score_nodes.len()
            )));
        }
        if let Some(bad) = score_nodes
            .iter()
            .find(|&&n| !(SCORE_NODE_MIN..=SCORE_NODE_MAX).contains(&n))
        {
            return Err(invalid(format!("score node {} is out of range", bad)));
        }

        Ok(Self {
            ladders,
            score_nodes,
        })
    }

    /// Generate a complete board, or nothing.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        let ladders = generate_ladders(rng)?;
        let score_nodes = generate_score_nodes(rng)?;
        Ok(Self {
            ladders,
            score_nodes,
        })
    }

    /// Ladders in placement order.
    pub fn ladders(&self) -> &[Ladder] {
        &self.ladders
    }

    pub fn score_nodes(&self) -> &BTreeSet<Node> {
        &self.score_nodes
    }

    /// The ladder starting at `node`, if any.
    pub fn ladder_at(&self, node: Node) -> Option<Ladder> {
        ladder_at(&self.ladders, node)
    }

    pub fn is_score_node(&self, node: Node) -> bool {
        self.score_nodes.contains(&node)
    }
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidBoard { reason }
}

/// Find the ladder whose foot is `node`.
pub fn ladder_at(ladders: &[Ladder], node: Node) -> Option<Ladder> {
    ladders.iter().copied().find(|l| l.from == node)
}

/// Place five ladders by rejection sampling.
///
/// Each candidate foot is drawn from `2..=50`; a foot already used by another
/// ladder (either end) is rejected before the length is drawn. The length is
/// drawn from `10..=25` and the ladder is rejected if its top passes 63 or
/// lands on a used node.
pub fn generate_ladders<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Vec<Ladder>, GameError> {
    let mut ladders = Vec::with_capacity(LADDER_COUNT);
    let mut used: HashSet<Node> = HashSet::new();
    let mut attempts = 0u32;

    while ladders.len() < LADDER_COUNT {
        if attempts >= MAX_GENERATION_ATTEMPTS {
            warn!(attempts, placed = ladders.len(), "ladder placement gave up");
            return Err(GameError::Generation {
                target: GenerationTarget::Ladders,
                attempts,
            });
        }
        attempts += 1;

        let from = rng.next_inclusive(u32::from(LADDER_FROM_MIN), u32::from(LADDER_FROM_MAX)) as Node;
        if used.contains(&from) {
            continue;
        }
        let jump = rng.next_inclusive(u32::from(LADDER_JUMP_MIN), u32::from(LADDER_JUMP_MAX)) as Node;
        let to = from + jump;
        if to > LADDER_TO_MAX || used.contains(&to) {
            continue;
        }

        ladders.push(Ladder::new(from, to));
        used.insert(from);
        used.insert(to);
    }

    Ok(ladders)
}

/// Place ten distinct star nodes in `2..=63`.
///
/// Stars may coincide with ladder ends.
pub fn generate_score_nodes<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<BTreeSet<Node>, GameError> {
    let mut nodes = BTreeSet::new();
    let mut attempts = 0u32;

    while nodes.len() < SCORE_NODE_COUNT {
        if attempts >= MAX_GENERATION_ATTEMPTS {
            warn!(attempts, placed = nodes.len(), "score node placement gave up");
            return Err(GameError::Generation {
                target: GenerationTarget::ScoreNodes,
                attempts,
            });
        }
        attempts += 1;
        nodes.insert(rng.next_inclusive(u32::from(SCORE_NODE_MIN), u32::from(SCORE_NODE_MAX)) as Node);
    }

    Ok(nodes)
}

/// Generate ladders then stars; see [`Board::generate`].
pub fn generate_board<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Board, GameError> {
    Board::generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SimpleRng};

    fn sample_ladders() -> Vec<Ladder> {
        vec![
            Ladder::new(4, 20),
            Ladder::new(7, 30),
            Ladder::new(11, 25),
            Ladder::new(33, 50),
            Ladder::new(41, 63),
        ]
    }

    fn sample_stars() -> Vec<Node> {
        vec![3, 9, 14, 22, 27, 35, 44, 52, 58, 61]
    }

    #[test]
    fn test_generate_ladders_respects_ranges() {
        let mut rng = SimpleRng::new(42);
        let ladders = generate_ladders(&mut rng).unwrap();
        assert_eq!(ladders.len(), LADDER_COUNT);

        let mut ends = HashSet::new();
        for l in &ladders {
            assert!((2..=50).contains(&l.from));
            assert!(l.to >= l.from + 10 && l.to <= l.from + 25);
            assert!(l.to <= 63);
            assert!(ends.insert(l.from));
            assert!(ends.insert(l.to));
        }
    }

    #[test]
    fn test_generate_score_nodes_distinct_in_range() {
        let mut rng = SimpleRng::new(42);
        let nodes = generate_score_nodes(&mut rng).unwrap();
        assert_eq!(nodes.len(), SCORE_NODE_COUNT);
        assert!(nodes.iter().all(|n| (2..=63).contains(n)));
    }

    #[test]
    fn test_ladder_rejection_order_follows_draws() {
        // Scripted values are offsets from the range minimum.
        // 2 +10 -> 2->12
        // 2 again: rejected before a length is drawn
        // 40 +25 -> 65: rejected
        // 3 +19 -> 3->22
        // 10 +10 -> 10->20
        // 21 +12 -> 21->33
        // 44 +19 -> 44->63
        let mut rng = ScriptedRng::new([0, 0, 0, 38, 15, 1, 9, 8, 0, 19, 2, 42, 9]);
        let ladders = generate_ladders(&mut rng).unwrap();
        assert_eq!(
            ladders,
            vec![
                Ladder::new(2, 12),
                Ladder::new(3, 22),
                Ladder::new(10, 20),
                Ladder::new(21, 33),
                Ladder::new(44, 63),
            ]
        );
    }

    #[test]
    fn test_generation_gives_up_when_stuck() {
        // Every draw proposes foot 2 and a 10-jump: the first ladder fits,
        // every later one collides.
        let mut rng = ScriptedRng::new([0]);
        let err = generate_ladders(&mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::Generation {
                target: GenerationTarget::Ladders,
                attempts: MAX_GENERATION_ATTEMPTS,
            }
        );

        let mut rng = ScriptedRng::new([0]);
        let err = generate_score_nodes(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            GameError::Generation {
                target: GenerationTarget::ScoreNodes,
                ..
            }
        ));
    }

    #[test]
    fn test_failed_generation_returns_no_board() {
        let mut rng = ScriptedRng::new([0]);
        assert!(generate_board(&mut rng).is_err());
    }

    #[test]
    fn test_board_new_accepts_valid_layout() {
        let board = Board::new(sample_ladders(), sample_stars()).unwrap();
        assert_eq!(board.ladder_at(4), Some(Ladder::new(4, 20)));
        assert_eq!(board.ladder_at(5), None);
        assert!(board.is_score_node(22));
        assert!(!board.is_score_node(23));
    }

    #[test]
    fn test_board_new_rejects_shared_endpoint() {
        let mut ladders = sample_ladders();
        ladders[1] = Ladder::new(20, 30);
        let err = Board::new(ladders, sample_stars()).unwrap_err();
        assert!(matches!(err, GameError::InvalidBoard { .. }));
    }

    #[test]
    fn test_board_new_rejects_wrong_counts() {
        let err = Board::new(sample_ladders().into_iter().take(4), sample_stars()).unwrap_err();
        assert!(matches!(err, GameError::InvalidBoard { .. }));

        let mut stars = sample_stars();
        stars[9] = 3; // duplicate collapses to nine distinct
        let err = Board::new(sample_ladders(), stars).unwrap_err();
        assert!(matches!(err, GameError::InvalidBoard { .. }));
    }

    #[test]
    fn test_board_new_rejects_descending_or_out_of_range() {
        let mut ladders = sample_ladders();
        ladders[0] = Ladder::new(20, 4);
        assert!(Board::new(ladders, sample_stars()).is_err());

        let mut ladders = sample_ladders();
        ladders[4] = Ladder::new(41, 64);
        assert!(Board::new(ladders, sample_stars()).is_err());

        let mut stars = sample_stars();
        stars[0] = 1;
        assert!(Board::new(sample_ladders(), stars).is_err());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::generate(&mut SimpleRng::new(9)).unwrap();
        let b = Board::generate(&mut SimpleRng::new(9)).unwrap();
        assert_eq!(a, b);
    }
}
