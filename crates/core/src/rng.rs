//! RNG module - the single random source behind every game draw
//!
//! Dice, direction, board generation and star points all pull from one
//! [`RandomSource`] owned by the engine, so a seed fully determines a game.
//!
//! Provides a small LCG for play and a scripted source for tests and replays.

use std::collections::VecDeque;

/// Anything the engine can draw random numbers from.
pub trait RandomSource {
    /// Returns the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Returns a value in `[0, max)`; `0` when `max == 0`.
    ///
    /// Uses the high bits of `next_u32` (multiply-shift), which matters for
    /// LCGs whose low bits cycle quickly.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Returns a value in `[low, high]`.
    fn next_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.next_range(high - low + 1)
    }

    /// True with probability `percent / 100`.
    fn chance_percent(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state; `SimpleRng::new(rng.state())` continues the same sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of draws.
///
/// `next_range(max)` returns the next scripted value reduced modulo `max`, so
/// scripts are written in "result space" (e.g. `2` for a die showing 3).
/// The script repeats once exhausted; an empty script always yields zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: Vec<u32>,
    pending: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let script: Vec<u32> = values.into_iter().collect();
        let pending = script.iter().copied().collect();
        Self { script, pending }
    }

    /// Append more draws after the ones still pending.
    pub fn push(&mut self, values: impl IntoIterator<Item = u32>) {
        for v in values {
            self.script.push(v);
            self.pending.push_back(v);
        }
    }

    /// Draws left before the script repeats.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    fn next_scripted(&mut self) -> u32 {
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        self.pending.pop_front().unwrap_or(0)
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.next_scripted()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_scripted() % max
    }
}
