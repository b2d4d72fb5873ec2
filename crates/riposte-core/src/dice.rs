//! Injectable randomness.
//!
//! Every random decision in the core goes through the [`Dice`] trait so that a
//! session can be replayed exactly:
//! - [`RandomDice`] adapts any `rand::Rng`; [`RandomDice::seeded`] uses ChaCha8
//! - [`ScriptedDice`] replays queued values, for replays and tests
//!
//! # Example
//!
//! ```
//! use riposte_core::dice::{Dice, RandomDice};
//!
//! let mut a = RandomDice::seeded(7);
//! let mut b = RandomDice::seeded(7);
//! assert_eq!(a.d6(), b.d6());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of every random decision made during resolution and move choice.
///
/// The trait is object-safe; the resolver and opponent policies take
/// `&mut dyn Dice`.
pub trait Dice {
    /// Uniform integer in `[low, high]` (inclusive).
    fn roll_range(&mut self, low: i32, high: i32) -> i32;

    /// Returns `true` with the given probability.
    ///
    /// Probabilities at or below 0 never fire; at or above 1 always fire.
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index into a collection of `len` items (0 when `len` is 0).
    fn pick_index(&mut self, len: usize) -> usize;

    /// A six-sided die.
    fn d6(&mut self) -> i32 {
        self.roll_range(1, 6)
    }
}

// =============================================================================
// RandomDice
// =============================================================================

/// [`Dice`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R = ChaCha8Rng> {
    rng: R,
    seed: Option<u64>,
}

impl RandomDice<ChaCha8Rng> {
    /// Creates deterministic dice from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }
}

impl<R: Rng> RandomDice<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng, seed: None }
    }

    /// The seed these dice were created from, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.gen::<f64>() < probability
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

// =============================================================================
// ScriptedDice
// =============================================================================

/// [`Dice`] that replays queued values in order.
///
/// Three independent queues are consumed:
/// - rolls for [`Dice::roll_range`], clamped into the requested range
/// - draws in `[0, 1)` for [`Dice::chance`], which fires when `draw < p`
/// - picks for [`Dice::pick_index`], clamped to the collection length
///
/// An exhausted queue yields the lowest roll, a chance that never fires and
/// index 0. Probabilities outside `(0, 1)` are decided without consuming a
/// draw.
///
/// # Example
///
/// ```
/// use riposte_core::dice::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new().with_rolls([6, 1]).with_draws([0.1]);
/// assert_eq!(dice.d6(), 6);
/// assert_eq!(dice.d6(), 1);
/// assert!(dice.chance(0.5));
/// assert!(!dice.chance(0.5)); // exhausted
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    draws: VecDeque<f64>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    /// Creates dice with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends values to the roll queue.
    #[must_use]
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Appends values to the chance-draw queue.
    #[must_use]
    pub fn with_draws(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.draws.extend(draws);
        self
    }

    /// Appends values to the pick queue.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Number of queued values not yet consumed, as (rolls, draws, picks).
    #[must_use]
    pub fn remaining(&self) -> (usize, usize, usize) {
        (self.rolls.len(), self.draws.len(), self.picks.len())
    }
}

impl Dice for ScriptedDice {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        self.rolls
            .pop_front()
            .map_or(low, |value| value.clamp(low, high.max(low)))
    }

    fn chance(&mut self, probability: f64) -> bool {
        // Extremes never consume a draw, matching RandomDice.
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.draws.pop_front().unwrap_or(1.0) < probability
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(len.saturating_sub(1))
    }
}
