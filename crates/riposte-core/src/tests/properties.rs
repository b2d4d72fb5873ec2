//! Property-based tests for the resolution invariants.

use proptest::prelude::*;

use crate::combat_log::CombatLog;
use crate::combatant::{Combatant, CombatantId, Resource};
use crate::combo::ComboDetector;
use crate::dice::RandomDice;
use crate::domain::MoveType;
use crate::environment::{Environment, SceneTag};
use crate::moves::{CombatMove, MoveLibrary};
use crate::resolver::CombatResolver;
use crate::session::{CombatSession, FixedOpponent, Outcome};
use crate::stance::Stance;

use super::helpers::{bandit, hero};

fn move_type() -> impl Strategy<Value = MoveType> {
    prop::sample::select(MoveType::ALL.to_vec())
}

fn library_moves() -> Vec<CombatMove> {
    MoveLibrary::standard().iter().cloned().collect()
}

fn stance() -> impl Strategy<Value = Stance> {
    prop::sample::select(Stance::ALL.to_vec())
}

fn scene() -> impl Strategy<Value = Environment> {
    prop::collection::vec(prop::sample::select(SceneTag::ALL.to_vec()), 0..4)
        .prop_map(Environment::from_tags)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Momentum and every pool stay in range whatever is played.
    #[test]
    fn prop_state_stays_in_bounds(
        seed in any::<u64>(),
        picks in prop::collection::vec((0usize..11, any::<bool>(), any::<bool>()), 1..40),
        environment in scene(),
    ) {
        let moves = library_moves();
        let mut session = CombatSession::new(
            hero(),
            bandit(),
            FixedOpponent::new(moves[0].clone()),
            RandomDice::seeded(seed),
        )
        .with_environment(environment);

        for (player, desperate, calculated) in picks {
            if session.outcome() != Outcome::Ongoing {
                break;
            }
            let mut choice = moves[player % moves.len()].clone();
            if desperate {
                choice = choice.as_desperate();
            }
            if calculated {
                choice = choice.as_calculated();
            }
            let _ = session.play_round(&choice);

            for combatant in [session.player(), session.opponent_state()] {
                prop_assert!(combatant.momentum().value() <= 3);
                for resource in Resource::ALL {
                    let pool = combatant.pool(resource);
                    prop_assert!(pool.current() <= pool.max());
                }
            }
        }
    }

    /// Outside combos, a round moves each side's momentum by one step: up for
    /// the winner unless already at the cap, down for the loser unless at 0.
    #[test]
    fn prop_momentum_steps_by_one_per_round(
        seed in any::<u64>(),
        start in (0u8..=3, 0u8..=3),
        stances in (stance(), stance()),
        picks in prop::collection::vec((0usize..11, 0usize..11, any::<bool>()), 1..30),
        environment in scene(),
    ) {
        let moves = library_moves();
        let mut actor = hero().with_momentum(start.0).with_stance(stances.0);
        let mut target = bandit().with_momentum(start.1).with_stance(stances.1);
        let mut log = CombatLog::new();
        let mut dice = RandomDice::seeded(seed);
        let resolver = CombatResolver::new();

        for (actor_index, target_index, desperate) in picks {
            let mut actor_move = moves[actor_index].clone();
            if desperate {
                actor_move = actor_move.as_desperate();
            }
            let before = (actor.momentum().value(), target.momentum().value());
            let Ok(result) = resolver.resolve(
                &mut actor,
                &actor_move,
                &mut target,
                &moves[target_index],
                &environment,
                &mut log,
                &mut dice,
            ) else {
                continue;
            };
            let success = result.actor_success;
            let reported = (result.actor_momentum, result.target_momentum);
            let after = (actor.momentum().value(), target.momentum().value());
            prop_assert_eq!(reported, after);

            let (winner, loser) = if success {
                ((before.0, after.0), (before.1, after.1))
            } else {
                ((before.1, after.1), (before.0, after.0))
            };
            prop_assert_eq!(winner.1, (winner.0 + 1).min(3));
            prop_assert_eq!(loser.1, loser.0.saturating_sub(1));
            for (old, new) in [winner, loser] {
                prop_assert!(old.abs_diff(new) <= 1);
            }
        }
    }

    /// An unaffordable move on either side leaves both combatants untouched.
    #[test]
    fn prop_unaffordable_mutates_nothing(
        seed in any::<u64>(),
        actor_index in 0usize..11,
        target_index in 0usize..11,
        stamina in 0u32..2,
        focus in 0u32..2,
        spirit in 0u32..2,
        starve_actor in any::<bool>(),
    ) {
        let moves = library_moves();
        let actor_move = &moves[actor_index];
        let target_move = &moves[target_index];

        let starve = |c: Combatant| {
            c.with_current(Resource::Stamina, stamina)
                .with_current(Resource::Focus, focus)
                .with_current(Resource::Spirit, spirit)
        };
        let (mut actor, mut target) = if starve_actor {
            (starve(hero()), bandit())
        } else {
            (hero(), starve(bandit()))
        };
        let affordable = actor.can_afford(&actor_move.cost) && target.can_afford(&target_move.cost);
        let before = (actor.clone(), target.clone());

        let mut log = CombatLog::new();
        let outcome = CombatResolver::new().resolve(
            &mut actor,
            actor_move,
            &mut target,
            target_move,
            &Environment::new(),
            &mut log,
            &mut RandomDice::seeded(seed),
        ).map(|_| ());

        prop_assert_eq!(outcome.is_ok(), affordable);
        if !affordable {
            prop_assert_eq!((actor, target), before);
            prop_assert!(log.is_empty());
        }
    }

    /// Advantage is antisymmetric for every pair of types.
    #[test]
    fn prop_advantage_antisymmetric(a in move_type(), b in move_type()) {
        prop_assert_eq!(a.advantage_against(b), -b.advantage_against(a));
        if a == b {
            prop_assert_eq!(a.advantage_against(b), 0);
        }
    }

    /// A combo fires exactly when its sequence ends the last five moves.
    #[test]
    fn prop_combo_matches_trailing_window(history in prop::collection::vec(move_type(), 0..12)) {
        let id = CombatantId::new(0);
        let mut detector = ComboDetector::new();
        for t in &history {
            detector.record_move(id, *t);
        }

        let window: Vec<MoveType> = history.iter().rev().take(5).rev().copied().collect();
        let expected = detector
            .combos()
            .iter()
            .find(|c| window.ends_with(&c.sequence))
            .map(|c| c.name.clone());

        prop_assert_eq!(detector.check(id).map(|m| m.combo.name), expected);
    }
}
