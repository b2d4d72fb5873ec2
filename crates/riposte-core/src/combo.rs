//! Move-sequence combos.
//!
//! The [`ComboDetector`] keeps a rolling window of the last
//! [`HISTORY_WINDOW`] move types per combatant and matches each combo's
//! required sequence against the trailing suffix of that window: exact,
//! ordered and contiguous.
//!
//! History is keyed by [`CombatantId`] and owned by one session's detector,
//! so two sessions never see each other's moves even when names collide.
//!
//! # Example
//!
//! ```
//! use riposte_core::combatant::CombatantId;
//! use riposte_core::combo::ComboDetector;
//! use riposte_core::domain::MoveType;
//!
//! let mut detector = ComboDetector::new();
//! let hero = CombatantId::new(0);
//! for t in [MoveType::Force, MoveType::Trick, MoveType::Force] {
//!     detector.record_move(hero, t);
//! }
//! let found = detector.check(hero).unwrap();
//! assert_eq!(found.combo.name, "Force-Trick-Force");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info};

use crate::combat_log::{AppliedStatus, RoundResult};
use crate::combatant::{Combatant, CombatantId};
use crate::domain::{Domain, MoveType};
use crate::status::{Status, StatusCatalog, StatusTier};

/// Number of recent move types remembered per combatant.
pub const HISTORY_WINDOW: usize = 5;

/// What completing a combo grants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboBonus {
    /// Flat damage added to a damaging round
    pub damage_bonus: Option<u32>,
    /// Added to the actor's momentum
    pub momentum_bonus: Option<i32>,
    /// Chance of a critical hit, for the narrative layer
    pub critical_chance: Option<f64>,
    /// Bypasses defenses, for the narrative layer
    pub ignore_defense: bool,
}

/// A named move-type sequence and its bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    /// Display name
    pub name: String,
    /// Flavour text
    pub description: String,
    /// Move types that must end the history, oldest first
    pub sequence: Vec<MoveType>,
    /// Domains the combo is themed on
    pub domains: Vec<Domain>,
    /// Reward
    pub bonus: ComboBonus,
}

impl Combo {
    /// The stock combos.
    #[must_use]
    pub fn defaults() -> Vec<Combo> {
        use MoveType::{Focus, Force, Trick};
        vec![
            Combo {
                name: "Force-Trick-Force".to_string(),
                description: "A powerful opening followed by a feint, then a devastating blow"
                    .to_string(),
                sequence: vec![Force, Trick, Force],
                domains: vec![Domain::Body, Domain::Awareness],
                bonus: ComboBonus {
                    damage_bonus: Some(10),
                    momentum_bonus: Some(1),
                    ..ComboBonus::default()
                },
            },
            Combo {
                name: "Focus-Focus-Force".to_string(),
                description:
                    "Carefully analyze the opponent's defenses, then strike with precision"
                        .to_string(),
                sequence: vec![Focus, Focus, Force],
                domains: vec![Domain::Mind, Domain::Body],
                bonus: ComboBonus {
                    critical_chance: Some(0.2),
                    ignore_defense: true,
                    ..ComboBonus::default()
                },
            },
            Combo {
                name: "Trick-Focus-Force".to_string(),
                description: "Misdirect, read the opening, then drive straight through it"
                    .to_string(),
                sequence: vec![Trick, Focus, Force],
                domains: vec![Domain::Awareness, Domain::Mind, Domain::Body],
                bonus: ComboBonus {
                    damage_bonus: Some(5),
                    momentum_bonus: Some(1),
                    ..ComboBonus::default()
                },
            },
        ]
    }

    fn matches(&self, history: &VecDeque<MoveType>) -> bool {
        let n = self.sequence.len();
        n > 0
            && history.len() >= n
            && history.iter().skip(history.len() - n).eq(self.sequence.iter())
    }
}

/// A combo found by [`ComboDetector::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComboMatch {
    /// The matched combo
    pub combo: Combo,
    /// Announcement, description and one hook per bonus category
    pub narrative_hooks: Vec<String>,
}

/// Per-session combo tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboDetector {
    combos: Vec<Combo>,
    history: BTreeMap<CombatantId, VecDeque<MoveType>>,
}

impl Default for ComboDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ComboDetector {
    /// A detector with the stock combos.
    #[must_use]
    pub fn new() -> Self {
        Self::with_combos(Combo::defaults())
    }

    /// A detector with a custom combo list, checked in order.
    #[must_use]
    pub fn with_combos(combos: Vec<Combo>) -> Self {
        Self {
            combos,
            history: BTreeMap::new(),
        }
    }

    /// Registered combos.
    #[must_use]
    pub fn combos(&self) -> &[Combo] {
        &self.combos
    }

    /// Recent move types for a combatant, oldest first.
    #[must_use]
    pub fn history(&self, id: CombatantId) -> Vec<MoveType> {
        self.history
            .get(&id)
            .map(|h| h.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Appends a move type, dropping the oldest beyond the window.
    pub fn record_move(&mut self, id: CombatantId, move_type: MoveType) {
        let history = self.history.entry(id).or_default();
        history.push_back(move_type);
        while history.len() > HISTORY_WINDOW {
            history.pop_front();
        }
    }

    /// First registered combo whose sequence ends the history, if any.
    #[must_use]
    pub fn check(&self, id: CombatantId) -> Option<ComboMatch> {
        let history = self.history.get(&id)?;
        let combo = self.combos.iter().find(|c| c.matches(history))?;

        let mut narrative_hooks = vec![
            format!("Executes the {} combo!", combo.name),
            combo.description.clone(),
        ];
        if combo.bonus.damage_bonus.is_some() {
            narrative_hooks.push("The combo deals extra damage!".to_string());
        }
        if combo.bonus.critical_chance.is_some() {
            narrative_hooks.push("The combo targets a critical weakness!".to_string());
        }
        if combo.bonus.ignore_defense {
            narrative_hooks.push("The combo bypasses defenses!".to_string());
        }

        Some(ComboMatch {
            combo: combo.clone(),
            narrative_hooks,
        })
    }

    /// Applies a matched combo to the round the actor just won or lost.
    ///
    /// Damage is added only to a round that already dealt damage, and is taken
    /// from the target's health as well. If that extra damage is what first
    /// drops the target below half health, the target is Wounded at the
    /// round's magnitude tier. Momentum goes to the actor, still clamped. A
    /// round already annotated with a combo is left untouched.
    pub fn apply(
        found: &ComboMatch,
        result: &mut RoundResult,
        actor: &mut Combatant,
        target: &mut Combatant,
    ) {
        if result.combo_used.is_some() {
            return;
        }
        let bonus = &found.combo.bonus;

        if let (Some(extra), Some(dealt)) = (bonus.damage_bonus, result.damage_dealt) {
            let report = target.apply_damage(extra);
            result.damage_dealt = Some(dealt + report.dealt);
            if report.crossed_half {
                let tier = StatusTier::from_magnitude(result.effect_magnitude);
                StatusCatalog::template(Status::Wounded, tier).apply_to(target);
                debug!(target = target.name(), ?tier, "combo damage wounded the target");
                if result.status_applied.is_none() {
                    result.status_applied = Some(AppliedStatus {
                        status: Status::Wounded,
                        tier,
                    });
                }
            }
        }
        if let Some(momentum) = bonus.momentum_bonus {
            actor.momentum_mut().shift(momentum);
            result.actor_momentum = actor.momentum().value();
        }

        result.combo_used = Some(found.combo.name.clone());
        result
            .narrative_hooks
            .extend(found.narrative_hooks.iter().cloned());
        info!(actor = actor.name(), combo = %found.combo.name, "combo executed");
    }
}
