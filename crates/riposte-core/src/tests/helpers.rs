//! Factories for combatants, moves and results used across the test suites.

use crate::combat_log::RoundResult;
use crate::combatant::{Combatant, CombatantId, CombatantKind};
use crate::domain::{Domain, MoveType};
use crate::moves::{CombatMove, MoveCost, MoveLibrary};

/// Ratings shared by both stock combatants, so contests come down to dice.
const EVEN_RATINGS: [(Domain, i32); 7] = [
    (Domain::Body, 3),
    (Domain::Mind, 2),
    (Domain::Craft, 1),
    (Domain::Awareness, 2),
    (Domain::Social, 1),
    (Domain::Authority, 2),
    (Domain::Spirit, 1),
];

/// The player, id 0.
pub(crate) fn hero() -> Combatant {
    Combatant::new(CombatantId::new(0), "Hero", EVEN_RATINGS).with_kind(CombatantKind::Player)
}

/// The opponent, id 1, rated like the hero.
pub(crate) fn bandit() -> Combatant {
    Combatant::new(CombatantId::new(1), "Bandit", EVEN_RATINGS)
}

/// A stock library move by name.
pub(crate) fn library_move(name: &str) -> CombatMove {
    MoveLibrary::standard()
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("no stock move named {name}"))
}

/// A free single-domain move.
pub(crate) fn free_move(name: &str, move_type: MoveType, domain: Domain) -> CombatMove {
    CombatMove::new(name, move_type, [domain], "", MoveCost::FREE)
}

/// A successful, harmless Hero-on-Bandit round with no annotations.
pub(crate) fn round_result() -> RoundResult {
    RoundResult {
        round: 1,
        actor_id: CombatantId::new(0),
        target_id: CombatantId::new(1),
        actor_name: "Hero".to_string(),
        target_name: "Bandit".to_string(),
        actor_move_name: "Hammer Blow".to_string(),
        target_move_name: "Shadow Step".to_string(),
        actor_move_type: MoveType::Force,
        target_move_type: MoveType::Trick,
        actor_domains: vec![Domain::Body, Domain::Craft],
        actor_roll: 8,
        target_roll: 6,
        actor_success: true,
        effect_magnitude: 2,
        type_advantage: 1,
        actor_momentum: 0,
        target_momentum: 0,
        narrative_hooks: Vec::new(),
        damage_dealt: None,
        status_applied: None,
        combo_used: None,
        consequence: None,
    }
}
