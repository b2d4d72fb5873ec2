//! Per-encounter orchestration.
//!
//! A [`CombatSession`] owns everything one encounter mutates: both
//! combatants, the scene, the combo history, the combat log, the dice and the
//! opponent policy. Nothing is shared between sessions, so two sessions with
//! identically named combatants never interfere.
//!
//! Each call to [`CombatSession::play_round`] runs:
//!
//! 1. The opponent chooses its move from a [`RoundView`]
//! 2. The resolver settles the exchange (initiative decides who acts)
//! 3. Both move types are recorded; the actor's combo, if any, is applied
//! 4. A consequence for the target is created and attached
//! 5. Upkeep: statuses tick, stamina regenerates
//! 6. The opponent observes the result

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat_log::{CombatLog, RoundResult};
use crate::combatant::Combatant;
use crate::combo::ComboDetector;
use crate::consequence::create_consequence;
use crate::dice::Dice;
use crate::domain::MoveType;
use crate::environment::Environment;
use crate::error::ResolutionError;
use crate::moves::CombatMove;
use crate::resolver::CombatResolver;
use crate::stance::Stance;

// =============================================================================
// Opponent seam
// =============================================================================

/// What the opponent can see when choosing a move.
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    /// Number of the round about to be played
    pub round: u32,
    /// The opponent's own state
    pub me: &'a Combatant,
    /// The player's state
    pub foe: &'a Combatant,
    /// Type of the player's previous move, if any
    pub foe_last_move: Option<MoveType>,
    /// The scene
    pub environment: &'a Environment,
    /// `true` if the opponent acts this round, `false` if it defends
    pub acting: bool,
}

/// A policy that picks the opposing move each round.
pub trait Opponent {
    /// Picks this round's move.
    ///
    /// The returned move should be affordable; an unaffordable one makes the
    /// round fail with [`ResolutionError::ResourceInsufficiency`].
    fn choose_move(&mut self, view: &RoundView<'_>, dice: &mut dyn Dice) -> CombatMove;

    /// Learns from a resolved round.
    fn observe(&mut self, result: &RoundResult, own_state: &Combatant);
}

/// An opponent that always plays the same move.
#[derive(Debug, Clone)]
pub struct FixedOpponent {
    combat_move: CombatMove,
}

impl FixedOpponent {
    /// Always plays `combat_move`.
    #[must_use]
    pub fn new(combat_move: CombatMove) -> Self {
        Self { combat_move }
    }
}

impl Opponent for FixedOpponent {
    fn choose_move(&mut self, _view: &RoundView<'_>, _dice: &mut dyn Dice) -> CombatMove {
        self.combat_move.clone()
    }

    fn observe(&mut self, _result: &RoundResult, _own_state: &Combatant) {}
}

// =============================================================================
// Configuration
// =============================================================================

/// Who acts in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Initiative {
    /// The player acts every round; the opponent only defends
    Player,
    /// The player acts on odd rounds, the opponent on even rounds
    #[default]
    Alternating,
}

/// Session-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stamina restored to each side at round end, before modifiers
    pub stamina_regen: u32,
    /// Rounds after which the encounter ends undecided
    pub max_rounds: u32,
    /// Who acts in each round
    pub initiative: Initiative,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stamina_regen: 1,
            max_rounds: 30,
            initiative: Initiative::default(),
        }
    }
}

/// State of the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nobody is down and rounds remain
    Ongoing,
    /// The opponent is down
    PlayerVictory,
    /// The player is down
    OpponentVictory,
    /// Both still stand at the round limit
    RoundLimit,
}

// =============================================================================
// CombatSession
// =============================================================================

/// One encounter between a player and an opponent policy.
///
/// # Example
///
/// ```
/// use riposte_core::combatant::{Combatant, CombatantId};
/// use riposte_core::dice::RandomDice;
/// use riposte_core::domain::Domain;
/// use riposte_core::moves::MoveLibrary;
/// use riposte_core::session::{CombatSession, FixedOpponent, Outcome};
///
/// let library = MoveLibrary::standard();
/// let hero = Combatant::new(CombatantId::new(0), "Hero", [(Domain::Body, 3)]);
/// let bandit = Combatant::new(CombatantId::new(1), "Bandit", [(Domain::Awareness, 2)]);
/// let opponent = FixedOpponent::new(library.get("Shadow Step").cloned().unwrap());
///
/// let mut session = CombatSession::new(hero, bandit, opponent, RandomDice::seeded(7));
/// let blow = library.get("Hammer Blow").cloned().unwrap();
/// let result = session.play_round(&blow).unwrap();
///
/// assert_eq!(result.round, 1);
/// assert_eq!(session.log().round_count(), 1);
/// assert!(matches!(session.outcome(), Outcome::Ongoing | Outcome::PlayerVictory));
/// ```
pub struct CombatSession<O: Opponent> {
    player: Combatant,
    opponent_state: Combatant,
    opponent: O,
    environment: Environment,
    detector: ComboDetector,
    log: CombatLog,
    resolver: CombatResolver,
    dice: Box<dyn Dice + Send>,
    config: SessionConfig,
    last_player_move: Option<MoveType>,
}

impl<O: Opponent> CombatSession<O> {
    /// Creates a session with default resolver and session settings.
    #[must_use]
    pub fn new(
        player: Combatant,
        opponent_state: Combatant,
        opponent: O,
        dice: impl Dice + Send + 'static,
    ) -> Self {
        Self {
            player,
            opponent_state,
            opponent,
            environment: Environment::new(),
            detector: ComboDetector::new(),
            log: CombatLog::new(),
            resolver: CombatResolver::new(),
            dice: Box::new(dice),
            config: SessionConfig::default(),
            last_player_move: None,
        }
    }

    /// Sets the scene.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: CombatResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the combo detector.
    #[must_use]
    pub fn with_combos(mut self, detector: ComboDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Replaces the session settings.
    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// The player combatant.
    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// The opponent's combatant.
    #[must_use]
    pub fn opponent_state(&self) -> &Combatant {
        &self.opponent_state
    }

    /// Changes the player's stance between rounds.
    pub fn set_player_stance(&mut self, stance: Stance) {
        debug!(combatant = self.player.name(), %stance, "stance changed");
        self.player.set_stance(stance);
    }

    /// Changes the opponent's stance between rounds.
    pub fn set_opponent_stance(&mut self, stance: Stance) {
        debug!(combatant = self.opponent_state.name(), %stance, "stance changed");
        self.opponent_state.set_stance(stance);
    }

    /// The opponent policy.
    #[must_use]
    pub fn opponent(&self) -> &O {
        &self.opponent
    }

    /// The scene.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The scene, for adding or removing tags between rounds.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Everything resolved so far.
    #[must_use]
    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// The combo tracker.
    #[must_use]
    pub fn combos(&self) -> &ComboDetector {
        &self.detector
    }

    /// The session settings.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns `true` if the opponent acts in the given round.
    #[must_use]
    pub fn opponent_acts(&self, round: u32) -> bool {
        match self.config.initiative {
            Initiative::Player => false,
            Initiative::Alternating => round % 2 == 0,
        }
    }

    /// Current state of the encounter.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.opponent_state.is_defeated() {
            Outcome::PlayerVictory
        } else if self.player.is_defeated() {
            Outcome::OpponentVictory
        } else if self.log.round_count() >= self.config.max_rounds {
            Outcome::RoundLimit
        } else {
            Outcome::Ongoing
        }
    }

    /// Plays one round with the player's chosen move.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::EncounterOver`] once the outcome is decided,
    /// and [`ResolutionError::ResourceInsufficiency`] when either side cannot
    /// pay for its move. Combatants are untouched in both cases.
    pub fn play_round(&mut self, player_move: &CombatMove) -> Result<RoundResult, ResolutionError> {
        if self.outcome() != Outcome::Ongoing {
            return Err(ResolutionError::EncounterOver {
                rounds: self.log.round_count(),
            });
        }

        let round = self.log.next_round();
        let opponent_acts = self.opponent_acts(round);
        let view = RoundView {
            round,
            me: &self.opponent_state,
            foe: &self.player,
            foe_last_move: self.last_player_move,
            environment: &self.environment,
            acting: opponent_acts,
        };
        let opponent_move = self.opponent.choose_move(&view, self.dice.as_mut());
        debug!(round, opponent_move = %opponent_move.name, opponent_acts, "opponent chose");

        let (actor, actor_move, target, target_move) = if opponent_acts {
            (&mut self.opponent_state, &opponent_move, &mut self.player, player_move)
        } else {
            (&mut self.player, player_move, &mut self.opponent_state, &opponent_move)
        };

        let result = self.resolver.resolve(
            actor,
            actor_move,
            target,
            target_move,
            &self.environment,
            &mut self.log,
            self.dice.as_mut(),
        )?;

        self.detector.record_move(actor.id(), actor_move.move_type);
        self.detector.record_move(target.id(), target_move.move_type);
        if let Some(found) = self.detector.check(actor.id()) {
            ComboDetector::apply(&found, result, actor, target);
        }

        if let Some(consequence) = create_consequence(result, target) {
            target.add_consequence(consequence.clone());
            result.consequence = Some(consequence);
        }

        for combatant in [&mut self.player, &mut self.opponent_state] {
            let upkeep = combatant.tick_statuses();
            let regained = combatant.regenerate(self.config.stamina_regen);
            if !upkeep.expired_statuses.is_empty() || !upkeep.expired_consequences.is_empty() {
                debug!(
                    combatant = combatant.name(),
                    statuses = ?upkeep.expired_statuses,
                    consequences = ?upkeep.expired_consequences,
                    "effects expired"
                );
            }
            debug!(combatant = combatant.name(), regained, "stamina regenerated");
        }

        let snapshot = result.clone();
        self.opponent.observe(&snapshot, &self.opponent_state);
        self.last_player_move = Some(player_move.move_type);

        let outcome = self.outcome();
        if outcome != Outcome::Ongoing {
            info!(rounds = self.log.round_count(), ?outcome, "encounter finished");
        }
        Ok(snapshot)
    }
}
