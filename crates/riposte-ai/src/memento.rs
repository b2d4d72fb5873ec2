//! What the controller remembers about the player.

use std::collections::BTreeMap;

use riposte_core::MoveType;

/// Counts of the move type that followed each observed pair of player moves.
type PatternTable = BTreeMap<(MoveType, MoveType), BTreeMap<MoveType, u32>>;

/// Learning state of one controller for one encounter.
///
/// Records every player move type, which of them succeeded, which of the
/// controller's own moves succeeded, and a table from each observed
/// two-move sequence to the moves that followed it.
///
/// # Example
///
/// ```
/// use riposte_ai::CombatMemento;
/// use riposte_core::MoveType::{Force, Trick};
///
/// let mut memento = CombatMemento::new();
/// for player_move in [Force, Trick, Force, Trick, Force] {
///     memento.record_round(player_move, Force, false);
/// }
/// assert_eq!(memento.predict_next(), Some(Trick));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatMemento {
    player_moves: Vec<MoveType>,
    player_successes: Vec<MoveType>,
    own_successes: Vec<MoveType>,
    patterns: PatternTable,
}

impl CombatMemento {
    /// Creates an empty memento.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one round from the controller's point of view.
    ///
    /// When the player's move did not succeed, the controller's move counts
    /// as a success.
    pub fn record_round(
        &mut self,
        player_move: MoveType,
        own_move: MoveType,
        player_success: bool,
    ) {
        self.player_moves.push(player_move);
        if player_success {
            self.player_successes.push(player_move);
        } else {
            self.own_successes.push(own_move);
        }

        if let [.., first, second, next] = self.player_moves[..] {
            *self
                .patterns
                .entry((first, second))
                .or_default()
                .entry(next)
                .or_insert(0) += 1;
        }
    }

    /// Every player move type observed, oldest first.
    #[must_use]
    pub fn player_moves(&self) -> &[MoveType] {
        &self.player_moves
    }

    /// Player move types that succeeded, oldest first.
    #[must_use]
    pub fn player_successes(&self) -> &[MoveType] {
        &self.player_successes
    }

    /// The controller's move types that succeeded, oldest first.
    #[must_use]
    pub fn own_successes(&self) -> &[MoveType] {
        &self.own_successes
    }

    /// Returns `true` if the player has succeeded with this move type before.
    #[must_use]
    pub fn has_succeeded_with(&self, move_type: MoveType) -> bool {
        self.player_successes.contains(&move_type)
    }

    /// Rounds recorded so far.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.player_moves.len()
    }

    /// How often `next` followed the pair `(first, second)`.
    #[must_use]
    pub fn pattern_count(&self, first: MoveType, second: MoveType, next: MoveType) -> u32 {
        self.patterns
            .get(&(first, second))
            .and_then(|followers| followers.get(&next))
            .copied()
            .unwrap_or(0)
    }

    /// Predicts the player's next move type from their last two.
    ///
    /// Returns the most frequent successor of the latest pair, or `None`
    /// with fewer than two moves recorded or when the pair has never been
    /// followed. Equal counts resolve to the earliest move type in
    /// [`MoveType::ALL`] order.
    #[must_use]
    pub fn predict_next(&self) -> Option<MoveType> {
        let [.., first, second] = self.player_moves[..] else {
            return None;
        };
        let followers = self.patterns.get(&(first, second))?;
        // max_by_key keeps the last maximum; iterate in reverse so the
        // earliest move type wins ties.
        followers
            .iter()
            .rev()
            .max_by_key(|(_, count)| **count)
            .map(|(move_type, _)| *move_type)
    }
}
