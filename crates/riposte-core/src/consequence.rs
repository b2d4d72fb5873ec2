//! Lasting consequences of decisive rounds.
//!
//! A consequence is created only when the actor succeeds with an effect
//! magnitude of at least [`CONSEQUENCE_THRESHOLD`]. Severity is the magnitude
//! plus the severity bonus of any status applied in the same round:
//!
//! | severity | kind      | duration  | intensity | stat modifiers               |
//! |----------|-----------|-----------|-----------|------------------------------|
//! | >= 8     | Permanent | permanent | 4         | max health -10, regen -1     |
//! | 5..=7    | Major     | 5 rounds  | 3         | regen -1                     |
//! | 3..=4    | Minor     | 2 rounds  | 1         | none                         |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::combat_log::RoundResult;
use crate::combatant::Combatant;
use crate::domain::Domain;
use crate::status::{Stat, StatusCatalog};

/// Smallest effect magnitude that can leave a consequence.
pub const CONSEQUENCE_THRESHOLD: u32 = 3;

/// How bad a consequence is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConsequenceSeverity {
    /// Wears off quickly
    Minor,
    /// Lingers
    Major,
    /// Never wears off
    Permanent,
}

/// How long a consequence lasts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsequenceDuration {
    /// Rounds remaining
    Rounds(u32),
    /// Never expires
    Permanent,
}

/// A mechanical and narrative effect that outlasts the round that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    /// What happened
    pub description: String,
    /// Minor, Major or Permanent
    pub severity: ConsequenceSeverity,
    /// Domains the injury relates to
    pub affected_domains: Vec<Domain>,
    /// Remaining lifetime
    pub duration: ConsequenceDuration,
    /// 1 (light) to 5 (crippling)
    pub intensity: u8,
    /// Hook for the narrative layer
    pub narrative_hook: String,
    /// Persistent stat modifiers
    pub stat_modifiers: BTreeMap<Stat, i32>,
}

impl Consequence {
    /// Modifier for a stat; 0 when unaffected.
    #[must_use]
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        self.stat_modifiers.get(&stat).copied().unwrap_or(0)
    }

    /// Returns `true` if this consequence never expires.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.duration == ConsequenceDuration::Permanent
    }

    /// Advances one round. Returns `false` once a timed consequence has run out.
    pub(crate) fn tick(&mut self) -> bool {
        match &mut self.duration {
            ConsequenceDuration::Permanent => true,
            ConsequenceDuration::Rounds(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining > 0
            }
        }
    }
}

/// Builds the consequence `target` suffers from `result`, if any.
///
/// Returns `None` when the actor failed or the magnitude is below the
/// threshold. Affected domains come from the status applied this round,
/// falling back to the actor move's domains.
#[must_use]
pub fn create_consequence(result: &RoundResult, target: &Combatant) -> Option<Consequence> {
    if !result.actor_success || result.effect_magnitude < CONSEQUENCE_THRESHOLD {
        return None;
    }

    let status = result
        .status_applied
        .map(|applied| StatusCatalog::template(applied.status, applied.tier));
    let severity = result.effect_magnitude
        + status.as_ref().map_or(0, |s| s.tier.severity_bonus());

    let affected_domains = match &status {
        Some(status) => status.affected_domains().collect(),
        None => result.actor_domains.clone(),
    };

    let move_name = &result.actor_move_name;
    let consequence = if severity >= 8 {
        Consequence {
            description: format!("Permanent injury from {move_name}"),
            severity: ConsequenceSeverity::Permanent,
            affected_domains,
            duration: ConsequenceDuration::Permanent,
            intensity: 4,
            narrative_hook: format!(
                "The {move_name} left a permanent scar, both physically and mentally"
            ),
            stat_modifiers: [(Stat::MaxHealth, -10), (Stat::StaminaRegen, -1)]
                .into_iter()
                .collect(),
        }
    } else if severity >= 5 {
        Consequence {
            description: format!("Serious injury from {move_name}"),
            severity: ConsequenceSeverity::Major,
            affected_domains,
            duration: ConsequenceDuration::Rounds(5),
            intensity: 3,
            narrative_hook: format!("The {move_name} left a lasting mark"),
            stat_modifiers: [(Stat::StaminaRegen, -1)].into_iter().collect(),
        }
    } else {
        Consequence {
            description: format!("Minor injury from {move_name}"),
            severity: ConsequenceSeverity::Minor,
            affected_domains,
            duration: ConsequenceDuration::Rounds(2),
            intensity: 1,
            narrative_hook: format!("Still feeling the effects of the {move_name}"),
            stat_modifiers: BTreeMap::new(),
        }
    };

    info!(
        target = target.name(),
        severity = ?consequence.severity,
        magnitude = result.effect_magnitude,
        "consequence created"
    );
    Some(consequence)
}
