//! Rules module - the small numeric rules the turn engine applies
//!
//! - **Ladder access**: only a token standing on a prime node before rolling may climb.
//! - **Bonus roll**: finishing a turn on a positive multiple of 5 (not the finish) offers another roll.
//! - **Stars**: landing on a star node awards 10 to 50 points.

use crate::rng::RandomSource;
use crate::types::{
    Direction, Node, BACKWARD_CHANCE_PERCENT, BONUS_ROLL_MULTIPLE, DICE_FACES, FINISH_NODE,
    STAR_POINTS_MAX_MULTIPLIER, STAR_POINTS_UNIT,
};

/// Trial-division primality test (6k ± 1 wheel).
pub fn is_prime(n: u32) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// A token standing here may climb ladders on its next roll.
pub fn is_ladder_eligible(position: Node) -> bool {
    is_prime(u32::from(position))
}

/// Ending a turn here offers a bonus roll.
pub fn is_bonus_node(position: Node) -> bool {
    position > 0 && position != FINISH_NODE && position % BONUS_ROLL_MULTIPLE == 0
}

/// Draw a die face in `1..=6`.
pub fn roll_die<R: RandomSource + ?Sized>(rng: &mut R) -> u8 {
    rng.next_range(u32::from(DICE_FACES)) as u8 + 1
}

/// Draw the roll's direction (backward 20% of the time).
pub fn roll_direction<R: RandomSource + ?Sized>(rng: &mut R) -> Direction {
    if rng.chance_percent(BACKWARD_CHANCE_PERCENT) {
        Direction::Backward
    } else {
        Direction::Forward
    }
}

/// Draw the points for landing on a star: 10, 20, 30, 40 or 50.
pub fn star_points<R: RandomSource + ?Sized>(rng: &mut R) -> u32 {
    (rng.next_range(STAR_POINTS_MAX_MULTIPLIER) + 1) * STAR_POINTS_UNIT
}
