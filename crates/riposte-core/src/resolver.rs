//! Opposed-move resolution.
//!
//! The [`CombatResolver`] runs one round to completion:
//!
//! 1. Check both costs; abort with [`ResolutionError`] before any mutation
//! 2. Deduct both costs, scaled by each side's stance
//! 3. Type advantage from the cyclic relation
//! 4. Base rolls: d6 + best effective domain rating + environment modifier,
//!    plus the actor's stance attack modifier or the target's defense modifier
//! 5. Advantage bonus to the side holding it
//! 6. Each side adds its own momentum
//! 7. Risk flags: desperate adds wide variance, calculated takes a floored
//!    narrow variant
//! 8. The actor succeeds only on a strictly higher roll; ties go to the target
//! 9. Winner gains a point of momentum, loser drops one
//! 10. Effect magnitude is the absolute roll difference
//! 11. Effects on success (damage, statuses), hooks on failure
//! 12. Move hooks appended verbatim, result recorded in the log
//!
//! # Dice order
//!
//! Dice are consumed in a fixed order so that a scripted sequence replays
//! exactly: actor d6, target d6, actor desperate variance, actor calculated
//! variance, target desperate variance, target calculated variance, then the
//! debuff status pick.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

use crate::combat_log::{AppliedStatus, CombatLog, RoundResult};
use crate::combatant::Combatant;
use crate::dice::Dice;
use crate::domain::{Domain, MoveType};
use crate::environment::Environment;
use crate::error::ResolutionError;
use crate::moves::CombatMove;
use crate::status::{Status, StatusCatalog, StatusTier};

/// Statuses a Debuff move picks from, in pick-index order.
const DEBUFF_STATUSES: [Status; 2] = [Status::Stunned, Status::Frightened];

/// Inclusive range of a random roll adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variance {
    /// Lowest adjustment
    pub low: i32,
    /// Highest adjustment
    pub high: i32,
}

impl Variance {
    /// Creates a range.
    #[must_use]
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    fn roll(self, dice: &mut dyn Dice) -> i32 {
        dice.roll_range(self.low, self.high)
    }
}

/// Tunable constants of the resolution algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Roll bonus for the side holding type advantage
    pub advantage_bonus: i32,
    /// Damage per point of effect magnitude
    pub damage_per_magnitude: u32,
    /// Extra damage per actor-move domain the target is weak in
    pub weakness_bonus: u32,
    /// Final damage of a desperate move, in percent
    pub desperate_damage_percent: u32,
    /// Roll adjustment range of a desperate move
    pub desperate_variance: Variance,
    /// Bonus range of a calculated move, applied on top of `roll - 1`
    pub calculated_variance: Variance,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            advantage_bonus: 2,
            damage_per_magnitude: 5,
            weakness_bonus: 5,
            desperate_damage_percent: 150,
            desperate_variance: Variance::new(-3, 5),
            calculated_variance: Variance::new(0, 2),
        }
    }
}

/// Resolves opposed moves between two combatants.
///
/// Holds only configuration; all per-session state (combatants, log, dice)
/// is passed in by the caller.
///
/// # Example
///
/// ```
/// use riposte_core::combat_log::CombatLog;
/// use riposte_core::combatant::{Combatant, CombatantId};
/// use riposte_core::dice::ScriptedDice;
/// use riposte_core::domain::Domain;
/// use riposte_core::environment::Environment;
/// use riposte_core::moves::MoveLibrary;
/// use riposte_core::resolver::CombatResolver;
///
/// let library = MoveLibrary::standard();
/// let mut hero = Combatant::new(CombatantId::new(0), "Hero", [(Domain::Body, 2)]);
/// let mut bandit = Combatant::new(CombatantId::new(1), "Bandit", [(Domain::Awareness, 2)]);
/// let mut log = CombatLog::new();
/// let mut dice = ScriptedDice::new().with_rolls([3, 3]);
///
/// let result = CombatResolver::new()
///     .resolve(
///         &mut hero,
///         library.get("Hammer Blow").unwrap(),
///         &mut bandit,
///         library.get("Shadow Step").unwrap(),
///         &Environment::new(),
///         &mut log,
///         &mut dice,
///     )
///     .unwrap();
///
/// // Equal rolls, but Force beats Trick: 3 + 2 + 2 against 3 + 2.
/// assert!(result.actor_success);
/// assert_eq!(result.effect_magnitude, 2);
/// assert_eq!(result.damage_dealt, Some(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CombatResolver {
    config: ResolverConfig,
}

impl CombatResolver {
    /// A resolver with the default constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver with custom constants.
    #[must_use]
    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The constants in use.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves one round and appends its result to `log`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::ResourceInsufficiency`] when either side
    /// cannot pay for its move. Neither combatant, the log nor the dice are
    /// touched in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve<'log>(
        &self,
        actor: &mut Combatant,
        actor_move: &CombatMove,
        target: &mut Combatant,
        target_move: &CombatMove,
        environment: &Environment,
        log: &'log mut CombatLog,
        dice: &mut dyn Dice,
    ) -> Result<&'log mut RoundResult, ResolutionError> {
        check_cost(actor, actor_move)?;
        check_cost(target, target_move)?;

        actor.pay(&actor_move.cost);
        target.pay(&target_move.cost);

        let type_advantage = actor_move.move_type.advantage_against(target_move.move_type);
        let mut hooks = Vec::new();

        let attack = actor.stance().effect().attack_modifier;
        let defense = target.stance().effect().defense_modifier;
        let mut actor_roll = base_roll(actor, actor_move, attack, environment, dice, &mut hooks);
        let mut target_roll =
            base_roll(target, target_move, defense, environment, dice, &mut hooks);
        debug!(actor_roll, target_roll, type_advantage, "base rolls");

        match type_advantage.cmp(&0) {
            Ordering::Greater => actor_roll += self.config.advantage_bonus,
            Ordering::Less => target_roll += self.config.advantage_bonus,
            Ordering::Equal => {}
        }

        actor_roll += i32::from(actor.momentum().value());
        target_roll += i32::from(target.momentum().value());

        actor_roll = self.apply_risk(actor_roll, actor_move, dice);
        target_roll = self.apply_risk(target_roll, target_move, dice);

        let actor_success = actor_roll > target_roll;
        if actor_success {
            actor.momentum_mut().gain();
            target.momentum_mut().lose();
        } else {
            target.momentum_mut().gain();
            actor.momentum_mut().lose();
        }

        let effect_magnitude = actor_roll.abs_diff(target_roll);
        debug!(actor_roll, target_roll, effect_magnitude, actor_success, "final rolls");

        let mut damage_dealt = None;
        let mut status_applied = None;
        if actor_success {
            (damage_dealt, status_applied) =
                self.apply_success(actor_move, target, effect_magnitude, dice, &mut hooks);
        } else {
            if target_move.move_type == MoveType::Focus {
                hooks.push("Perfectly reads the situation".to_string());
            }
            if type_advantage < 0 {
                hooks.push("Counter-move was perfectly chosen".to_string());
            }
        }

        hooks.extend(actor_move.narrative_hook.iter().cloned());
        hooks.extend(target_move.narrative_hook.iter().cloned());

        let result = RoundResult {
            round: log.next_round(),
            actor_id: actor.id(),
            target_id: target.id(),
            actor_name: actor.name().to_string(),
            target_name: target.name().to_string(),
            actor_move_name: actor_move.name.clone(),
            target_move_name: target_move.name.clone(),
            actor_move_type: actor_move.move_type,
            target_move_type: target_move.move_type,
            actor_domains: actor_move.domains.clone(),
            actor_roll,
            target_roll,
            actor_success,
            effect_magnitude,
            type_advantage,
            actor_momentum: actor.momentum().value(),
            target_momentum: target.momentum().value(),
            narrative_hooks: hooks,
            damage_dealt,
            status_applied,
            combo_used: None,
            consequence: None,
        };

        info!(
            round = result.round,
            actor = actor.name(),
            target = target.name(),
            actor_move = %actor_move.name,
            target_move = %target_move.name,
            actor_success,
            magnitude = effect_magnitude,
            "round resolved"
        );
        Ok(log.record(result))
    }

    fn apply_risk(&self, roll: i32, combat_move: &CombatMove, dice: &mut dyn Dice) -> i32 {
        let mut roll = roll;
        if combat_move.desperate {
            roll += self.config.desperate_variance.roll(dice);
        }
        if combat_move.calculated {
            roll = roll.max(roll - 1 + self.config.calculated_variance.roll(dice));
        }
        roll
    }

    fn apply_success(
        &self,
        actor_move: &CombatMove,
        target: &mut Combatant,
        magnitude: u32,
        dice: &mut dyn Dice,
        hooks: &mut Vec<String>,
    ) -> (Option<u32>, Option<AppliedStatus>) {
        let mut damage = magnitude.saturating_mul(self.config.damage_per_magnitude);
        for domain in &actor_move.domains {
            if target.is_weak_to(*domain) {
                damage = damage.saturating_add(self.config.weakness_bonus);
                hooks.push(format!("Exploits {domain} weakness"));
            }
        }
        if actor_move.desperate {
            damage = damage.saturating_mul(self.config.desperate_damage_percent) / 100;
        }

        let mut damage_dealt = None;
        let mut status = None;

        if actor_move.move_type.deals_damage() {
            let report = target.apply_damage(damage);
            damage_dealt = Some(report.dealt);
            if report.crossed_half {
                status = Some(Status::Wounded);
            }
        }

        match actor_move.move_type {
            MoveType::Focus if actor_move.uses(Domain::Mind) => {
                status = Some(Status::Confused);
                hooks.push("Creates mental confusion".to_string());
            }
            MoveType::Debuff => {
                status = DEBUFF_STATUSES
                    .get(dice.pick_index(DEBUFF_STATUSES.len()))
                    .copied();
            }
            _ => {}
        }

        let applied = status.map(|status| {
            let tier = StatusTier::from_magnitude(magnitude);
            StatusCatalog::template(status, tier).apply_to(target);
            debug!(target = target.name(), %status, ?tier, "status applied");
            AppliedStatus { status, tier }
        });

        (damage_dealt, applied)
    }
}

fn check_cost(combatant: &Combatant, combat_move: &CombatMove) -> Result<(), ResolutionError> {
    match combatant.shortfall(&combat_move.cost) {
        None => Ok(()),
        Some(shortfall) => {
            warn!(
                combatant = combatant.name(),
                combat_move = %combat_move.name,
                resource = %shortfall.resource,
                "resolution aborted"
            );
            Err(ResolutionError::ResourceInsufficiency {
                combatant: combatant.name().to_string(),
                move_name: combat_move.name.clone(),
                resource: shortfall.resource,
                required: shortfall.required,
                available: shortfall.available,
            })
        }
    }
}

fn base_roll(
    combatant: &Combatant,
    combat_move: &CombatMove,
    stance_modifier: i32,
    environment: &Environment,
    dice: &mut dyn Dice,
    hooks: &mut Vec<String>,
) -> i32 {
    let die = dice.d6();
    let rating = combatant.best_rating(&combat_move.domains);
    let scene = environment.modifiers_for(combat_move, combatant);
    hooks.extend(scene.narrative_hooks);
    die + rating + scene.roll_modifier + stance_modifier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Resource;
    use crate::dice::ScriptedDice;
    use crate::environment::SceneTag;
    use crate::moves::{MoveCost, MoveLibrary};
    use crate::stance::Stance;
    use crate::tests::helpers::{bandit, hero};

    struct Round {
        actor: Combatant,
        target: Combatant,
        log: CombatLog,
    }

    impl Round {
        fn new() -> Self {
            Self {
                actor: hero(),
                target: bandit(),
                log: CombatLog::new(),
            }
        }

        fn play(
            &mut self,
            actor_move: &CombatMove,
            target_move: &CombatMove,
            dice: &mut dyn Dice,
        ) -> Result<RoundResult, ResolutionError> {
            self.play_in(actor_move, target_move, &Environment::new(), dice)
        }

        fn play_in(
            &mut self,
            actor_move: &CombatMove,
            target_move: &CombatMove,
            environment: &Environment,
            dice: &mut dyn Dice,
        ) -> Result<RoundResult, ResolutionError> {
            CombatResolver::new()
                .resolve(
                    &mut self.actor,
                    actor_move,
                    &mut self.target,
                    target_move,
                    environment,
                    &mut self.log,
                    dice,
                )
                .map(|r| r.clone())
        }
    }

    fn lib(name: &str) -> CombatMove {
        MoveLibrary::standard().get(name).cloned().unwrap()
    }

    fn plain(name: &str, move_type: MoveType, domain: Domain) -> CombatMove {
        CombatMove::new(name, move_type, [domain], "", MoveCost::FREE)
    }

    mod cost_tests {
        use super::*;

        #[test]
        fn unaffordable_move_mutates_nothing() {
            let mut round = Round::new();
            round.target = bandit().with_current(Resource::Stamina, 1);
            let before = (round.actor.clone(), round.target.clone());
            let mut dice = ScriptedDice::new().with_rolls([6, 6]);

            let err = round
                .play(&lib("Hammer Blow"), &lib("Shadow Step"), &mut dice)
                .unwrap_err();

            assert_eq!(
                err,
                ResolutionError::ResourceInsufficiency {
                    combatant: "Bandit".to_string(),
                    move_name: "Shadow Step".to_string(),
                    resource: Resource::Stamina,
                    required: 2,
                    available: 1,
                }
            );
            assert_eq!((round.actor, round.target), before);
            assert!(round.log.is_empty());
            assert_eq!(dice.remaining(), (2, 0, 0));
        }

        #[test]
        fn both_costs_are_paid() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([1, 1]);
            round
                .play(&lib("Commanding Shout"), &lib("Feinting Strike"), &mut dice)
                .unwrap();
            assert_eq!(round.actor.focus().current(), 99);
            assert_eq!(round.actor.spirit().current(), 99);
            assert_eq!(round.target.stamina().current(), 99);
            assert_eq!(round.target.focus().current(), 99);
        }

        #[test]
        fn stance_scales_costs() {
            let mut round = Round::new();
            round.actor = hero().with_stance(Stance::Reckless);
            round.target = bandit().with_stance(Stance::Defensive);
            let mut dice = ScriptedDice::new().with_rolls([1, 1]);
            round
                .play(&lib("Hammer Blow"), &lib("Shadow Step"), &mut dice)
                .unwrap();
            // 2 * 1.5 = 3 and 2 * 0.8 rounds to 2
            assert_eq!(round.actor.stamina().current(), 97);
            assert_eq!(round.target.stamina().current(), 98);
        }

        #[test]
        fn stance_surcharge_can_make_a_move_unaffordable() {
            let mut round = Round::new();
            round.actor = hero()
                .with_stance(Stance::Reckless)
                .with_current(Resource::Stamina, 2);
            let mut dice = ScriptedDice::new().with_rolls([6, 6]);
            let err = round
                .play(&lib("Hammer Blow"), &lib("Shadow Step"), &mut dice)
                .unwrap_err();
            assert!(matches!(
                err,
                ResolutionError::ResourceInsufficiency {
                    required: 3,
                    available: 2,
                    ..
                }
            ));
            assert_eq!(round.actor.stamina().current(), 2);
        }
    }

    mod roll_tests {
        use super::*;

        #[test]
        fn tie_goes_to_defender() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([4, 4]);
            let r = round
                .play(
                    &plain("Push", MoveType::Utility, Domain::Body),
                    &plain("Brace", MoveType::Utility, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.actor_roll, r.target_roll);
            assert!(!r.actor_success);
            assert_eq!(r.effect_magnitude, 0);
            assert_eq!(r.target_momentum, 1);
            assert_eq!(r.actor_momentum, 0);
        }

        #[test]
        fn advantage_bonus_breaks_a_tie() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([3, 3]);
            let r = round
                .play(
                    &plain("Smash", MoveType::Force, Domain::Body),
                    &plain("Dodge", MoveType::Trick, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.type_advantage, 1);
            assert_eq!(r.actor_roll, r.target_roll + 2);
            assert!(r.actor_success);
        }

        #[test]
        fn counter_hooks_on_failure() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([3, 3]);
            let r = round
                .play(
                    &plain("Smash", MoveType::Force, Domain::Body),
                    &plain("Read", MoveType::Focus, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert!(!r.actor_success);
            assert_eq!(
                r.narrative_hooks,
                vec![
                    "Perfectly reads the situation".to_string(),
                    "Counter-move was perfectly chosen".to_string()
                ]
            );
        }

        #[test]
        fn momentum_adds_to_roll() {
            let mut round = Round::new();
            round.actor = hero().with_momentum(2);
            let mut dice = ScriptedDice::new().with_rolls([3, 3]);
            let r = round
                .play(
                    &plain("Push", MoveType::Utility, Domain::Body),
                    &plain("Brace", MoveType::Utility, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.actor_roll, r.target_roll + 2);
            assert_eq!(r.actor_momentum, 3);
        }

        #[test]
        fn attacker_and_defender_stances_shift_rolls() {
            let mut round = Round::new();
            round.actor = hero().with_stance(Stance::Aggressive);
            round.target = bandit().with_stance(Stance::Defensive);
            let mut dice = ScriptedDice::new().with_rolls([3, 3]);
            let r = round
                .play(
                    &plain("Push", MoveType::Utility, Domain::Body),
                    &plain("Brace", MoveType::Utility, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.actor_roll, 3 + 3 + 2);
            assert_eq!(r.target_roll, 3 + 3 + 2);
            assert!(!r.actor_success);
        }

        #[test]
        fn reckless_stance_cuts_both_ways() {
            let mut round = Round::new();
            round.actor = hero().with_stance(Stance::Reckless);
            round.target = bandit().with_stance(Stance::Reckless);
            let mut dice = ScriptedDice::new().with_rolls([3, 3]);
            let r = round
                .play(
                    &plain("Push", MoveType::Utility, Domain::Body),
                    &plain("Brace", MoveType::Utility, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.actor_roll, 9);
            assert_eq!(r.target_roll, 4);
            assert_eq!(r.effect_magnitude, 5);
        }

        #[test]
        fn desperate_adds_variance() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([3, 3, -3]);
            let r = round
                .play(
                    &plain("Flail", MoveType::Utility, Domain::Body).as_desperate(),
                    &plain("Brace", MoveType::Utility, Domain::Body),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.actor_roll, r.target_roll - 3);
        }

        #[test]
        fn calculated_never_drops_the_roll() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([3, 3, 0, 2]);
            let r = round
                .play(
                    &plain("Measure", MoveType::Utility, Domain::Body).as_calculated(),
                    &plain("Measure", MoveType::Utility, Domain::Body).as_calculated(),
                    &mut dice,
                )
                .unwrap();
            // Actor: max(x, x - 1 + 0) = x. Target: max(x, x - 1 + 2) = x + 1.
            assert_eq!(r.target_roll, r.actor_roll + 1);
        }

        #[test]
        fn environment_shifts_rolls_and_adds_hooks() {
            let mut round = Round::new();
            let env = Environment::from_tags([SceneTag::ConfinedSpace]);
            let mut dice = ScriptedDice::new().with_rolls([4, 4]);
            let r = round
                .play_in(
                    &plain("Shove", MoveType::Utility, Domain::Body),
                    &plain("Watch", MoveType::Utility, Domain::Awareness),
                    &env,
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.actor_roll, 4 + 3 - 1);
            assert_eq!(r.narrative_hooks[0], "Limited movement in the confined space");
        }
    }

    mod effect_tests {
        use super::*;

        #[test]
        fn damage_with_weakness_bonus() {
            let mut round = Round::new();
            round.target = bandit().with_weak_domains([Domain::Body]);
            let mut dice = ScriptedDice::new().with_rolls([6, 1]);
            let r = round
                .play(
                    &plain("Smash", MoveType::Force, Domain::Body),
                    &plain("Wait", MoveType::Utility, Domain::Mind),
                    &mut dice,
                )
                .unwrap();
            // 6 + 3 against 1 + 2.
            assert_eq!(r.effect_magnitude, 6);
            assert_eq!(r.damage_dealt, Some(35));
            assert!(r.narrative_hooks.contains(&"Exploits Body weakness".to_string()));
            assert_eq!(round.target.health().current(), 65);
        }

        #[test]
        fn desperate_damage_is_half_again() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([6, 1, 0]);
            let r = round
                .play(
                    &plain("Smash", MoveType::Force, Domain::Body).as_desperate(),
                    &plain("Wait", MoveType::Utility, Domain::Mind),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.effect_magnitude, 6);
            assert_eq!(r.damage_dealt, Some(45));
        }

        #[test]
        fn crossing_half_applies_wounded() {
            let mut round = Round::new();
            round.target = bandit().with_current(Resource::Health, 55);
            let mut dice = ScriptedDice::new().with_rolls([6, 1]);
            let r = round
                .play(
                    &plain("Smash", MoveType::Force, Domain::Body),
                    &plain("Wait", MoveType::Utility, Domain::Mind),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(
                r.status_applied,
                Some(AppliedStatus {
                    status: Status::Wounded,
                    tier: StatusTier::Severe
                })
            );
            assert!(round.target.has_status(Status::Wounded));
        }

        #[test]
        fn focus_on_mind_confuses_without_damage() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([6, 1]);
            let r = round
                .play(
                    &lib("Analytical Defense"),
                    &plain("Wait", MoveType::Utility, Domain::Craft),
                    &mut dice,
                )
                .unwrap();
            assert!(r.actor_success);
            assert_eq!(r.damage_dealt, None);
            assert_eq!(r.status_applied.map(|s| s.status), Some(Status::Confused));
            assert!(r.narrative_hooks.contains(&"Creates mental confusion".to_string()));
            assert_eq!(round.target.health().current(), 100);
        }

        #[test]
        fn debuff_picks_from_dice() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([6, 1]).with_picks([1]);
            let r = round
                .play(
                    &plain("Glare", MoveType::Debuff, Domain::Authority),
                    &plain("Wait", MoveType::Utility, Domain::Craft),
                    &mut dice,
                )
                .unwrap();
            assert_eq!(r.status_applied.map(|s| s.status), Some(Status::Frightened));
            assert!(round.target.has_status(Status::Frightened));
        }

        #[test]
        fn non_debuff_moves_do_not_pick_a_status() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([6, 1]).with_picks([1]);
            let r = round
                .play(
                    &plain("Cheer", MoveType::Buff, Domain::Social),
                    &plain("Wait", MoveType::Utility, Domain::Craft),
                    &mut dice,
                )
                .unwrap();
            assert!(r.actor_success);
            assert_eq!(r.status_applied, None);
            assert_eq!(dice.remaining(), (0, 0, 1));
        }

        #[test]
        fn move_hooks_are_appended_last() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new().with_rolls([1, 6]);
            let r = round
                .play(
                    &plain("Push", MoveType::Utility, Domain::Body).with_narrative_hook("A"),
                    &plain("Brace", MoveType::Utility, Domain::Body).with_narrative_hook("B"),
                    &mut dice,
                )
                .unwrap();
            let n = r.narrative_hooks.len();
            assert_eq!(r.narrative_hooks[n - 2..], ["A".to_string(), "B".to_string()]);
        }

        #[test]
        fn rounds_are_numbered() {
            let mut round = Round::new();
            let mut dice = ScriptedDice::new();
            let push = plain("Push", MoveType::Utility, Domain::Body);
            assert_eq!(round.play(&push, &push, &mut dice).unwrap().round, 1);
            assert_eq!(round.play(&push, &push, &mut dice).unwrap().round, 2);
            assert_eq!(round.log.round_count(), 2);
        }
    }
}
