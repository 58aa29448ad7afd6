//! Movement module - turns a die roll into the sequence of nodes a token visits
//!
//! The path excludes the starting node. Each board step appends one node; a
//! ladder climbed after a forward step appends its top without spending a step.
//! Hitting either end of the track clamps and ends the move early.

use crate::board::ladder_at;
use crate::types::{Direction, Ladder, Node, FINISH_NODE, START_NODE};

/// Compute the nodes visited when moving `steps` from `start`.
///
/// Ladders are only considered right after a forward step (never after a
/// backward one) and only when `ladder_eligible` is set.
///
/// # Examples
///
/// ```
/// use ladder_games_core::movement::compute_path;
/// use ladder_games_core::types::{Direction, Ladder};
///
/// let ladders = [Ladder::new(4, 20)];
/// assert_eq!(compute_path(&ladders, 1, 3, false, Direction::Forward), vec![2, 3, 4]);
/// assert_eq!(
///     compute_path(&ladders, 2, 5, true, Direction::Forward),
///     vec![3, 4, 20, 21, 22, 23]
/// );
/// ```
pub fn compute_path(
    ladders: &[Ladder],
    start: Node,
    steps: u8,
    ladder_eligible: bool,
    direction: Direction,
) -> Vec<Node> {
    let mut path = Vec::with_capacity(usize::from(steps) * 2);
    let mut pos = start;
    let mut remaining = steps;

    while remaining > 0 {
        match direction {
            Direction::Backward => {
                if pos <= START_NODE {
                    break;
                }
                pos -= 1;
            }
            Direction::Forward => {
                if pos >= FINISH_NODE {
                    break;
                }
                pos += 1;
            }
        }

        path.push(pos);
        remaining -= 1;

        if direction == Direction::Forward && ladder_eligible {
            if let Some(ladder) = ladder_at(ladders, pos) {
                pos = ladder.to;
                path.push(pos);
            }
        }
    }

    path
}

/// The ladder being climbed when a token moves from `from` to `to`.
///
/// Only a move of more than one node counts as a climb, and only a ladder
/// whose foot is the node just left is reported.
pub fn ladder_hint(ladders: &[Ladder], from: Node, to: Node) -> Option<Ladder> {
    if from.abs_diff(to) > 1 {
        ladder_at(ladders, from)
    } else {
        None
    }
}
