//! Round results and the append-only combat log.
//!
//! [`RoundResult`] is the record handed downstream to narrative generation
//! and persistence. It serializes with `serde`; the core itself does not
//! depend on any storage format.

use serde::{Deserialize, Serialize};

use crate::combatant::CombatantId;
use crate::consequence::Consequence;
use crate::domain::{Domain, MoveType};
use crate::status::{Status, StatusTier};

/// A status applied to the target during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedStatus {
    /// Which status
    pub status: Status,
    /// At which tier
    pub tier: StatusTier,
}

/// Everything that happened in one resolved round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number within the log
    pub round: u32,
    /// Id of the acting combatant
    pub actor_id: CombatantId,
    /// Id of the defending combatant
    pub target_id: CombatantId,
    /// Name of the acting combatant
    pub actor_name: String,
    /// Name of the defending combatant
    pub target_name: String,
    /// Name of the actor's move
    pub actor_move_name: String,
    /// Name of the target's move
    pub target_move_name: String,
    /// Type of the actor's move
    pub actor_move_type: MoveType,
    /// Type of the target's move
    pub target_move_type: MoveType,
    /// Domains of the actor's move
    pub actor_domains: Vec<Domain>,
    /// Final adjusted actor roll
    pub actor_roll: i32,
    /// Final adjusted target roll
    pub target_roll: i32,
    /// `true` if the actor's roll strictly exceeded the target's
    pub actor_success: bool,
    /// Absolute roll difference
    pub effect_magnitude: u32,
    /// -1, 0 or 1 from the actor's point of view
    pub type_advantage: i8,
    /// Actor momentum after the round
    pub actor_momentum: u8,
    /// Target momentum after the round
    pub target_momentum: u8,
    /// Ordered hooks for the narrative layer
    pub narrative_hooks: Vec<String>,
    /// Health removed from the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_dealt: Option<u32>,
    /// Status applied to the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_applied: Option<AppliedStatus>,
    /// Name of the combo the actor completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_used: Option<String>,
    /// Consequence the target suffered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<Consequence>,
}

/// Ordered, append-only record of resolved rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    rounds: Vec<RoundResult>,
}

impl CombatLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next recorded round will carry.
    #[must_use]
    pub fn next_round(&self) -> u32 {
        u32::try_from(self.rounds.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    /// Appends a result and returns it for annotation.
    pub fn record(&mut self, result: RoundResult) -> &mut RoundResult {
        let index = self.rounds.len();
        self.rounds.push(result);
        &mut self.rounds[index]
    }

    /// Rounds recorded so far.
    #[must_use]
    pub fn round_count(&self) -> u32 {
        u32::try_from(self.rounds.len()).unwrap_or(u32::MAX)
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Most recent round.
    #[must_use]
    pub fn last(&self) -> Option<&RoundResult> {
        self.rounds.last()
    }

    /// Rounds in order.
    pub fn iter(&self) -> impl Iterator<Item = &RoundResult> {
        self.rounds.iter()
    }

    /// Rounds as a slice.
    #[must_use]
    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }
}
