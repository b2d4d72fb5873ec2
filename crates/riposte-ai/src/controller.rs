//! The adaptive opponent controller.
//!
//! Each round the controller walks four branches in fixed priority order and
//! takes the first that applies:
//!
//! 1. **Desperate**: health ratio at or below
//!    `0.30 - risk_taking * 0.15`. Plays a Force move if it has one, flagged
//!    desperate.
//! 2. **Counter**: only when the player's previous move is known. Fires with
//!    probability `0.20 + adaptability * 0.40`, plus `0.20` if that move type
//!    has succeeded against the controller before. Plays the move type that
//!    beats it, calculated with probability `calculation`.
//! 3. **Exploit**: fires with probability `0.30 + aggression * 0.40`, plus
//!    `0.20` if the player is Wounded, Confused or Stunned. Plays Body/Force
//!    into wounds and Mind/Focus into confusion.
//! 4. **Standard**: preferred move types, else specialization domains, else
//!    anything usable; then aggression, calculation and risk-taking each get
//!    a roll before a uniform pick.
//!
//! A branch with nothing usable falls through to standard selection. With no
//! affordable move at all the controller plays [`CombatMove::fallback`].

use riposte_core::{
    CombatMove, Combatant, Dice, Domain, MoveType, Opponent, RoundResult, RoundView, Status,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::memento::CombatMemento;
use crate::personality::{Personality, PersonalityError, RoundFeedback};

/// Health ratio under which a risk-averse controller turns desperate.
pub const DESPERATION_THRESHOLD: f64 = 0.30;

/// Player statuses the exploit branch looks for.
const EXPLOITABLE: [Status; 3] = [Status::Wounded, Status::Confused, Status::Stunned];

/// Which decision branch produced a move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// Low health, all-in
    Desperate,
    /// Answered the player's last move type
    Counter,
    /// Pressed a player status
    Exploit,
    /// Personality-weighted pick
    Standard,
    /// Nothing was affordable
    Fallback,
}

/// An [`Opponent`] that blends personality, tactics and learned patterns.
///
/// # Example
///
/// ```
/// use riposte_ai::{AdaptiveController, Personality};
/// use riposte_core::{Combatant, CombatantId, CombatSession, Domain, MoveLibrary, RandomDice};
///
/// let library = MoveLibrary::standard();
/// let controller =
///     AdaptiveController::new(Personality::default(), library.iter().cloned()).unwrap();
/// let hero = Combatant::new(CombatantId::new(0), "Hero", [(Domain::Body, 3)]);
/// let bandit = Combatant::new(CombatantId::new(1), "Bandit", [(Domain::Body, 2)]);
///
/// let mut session = CombatSession::new(hero, bandit, controller, RandomDice::seeded(3));
/// session.play_round(library.get("Feinting Strike").unwrap()).unwrap();
/// assert_eq!(session.opponent().memento().rounds(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveController {
    personality: Personality,
    moves: Vec<CombatMove>,
    memento: CombatMemento,
    rounds_played: u32,
    last_branch: Option<Branch>,
}

impl AdaptiveController {
    /// Creates a controller choosing among `moves`.
    ///
    /// # Errors
    ///
    /// Returns [`PersonalityError`] if the personality has a trait outside
    /// `[0.0, 1.0]`.
    pub fn new(
        personality: Personality,
        moves: impl IntoIterator<Item = CombatMove>,
    ) -> Result<Self, PersonalityError> {
        personality.validate()?;
        Ok(Self {
            personality,
            moves: moves.into_iter().collect(),
            memento: CombatMemento::new(),
            rounds_played: 0,
            last_branch: None,
        })
    }

    /// Current personality, including any drift so far.
    #[must_use]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    /// Moves the controller may choose from.
    #[must_use]
    pub fn moves(&self) -> &[CombatMove] {
        &self.moves
    }

    /// What the controller has learned this encounter.
    #[must_use]
    pub fn memento(&self) -> &CombatMemento {
        &self.memento
    }

    /// Number of moves chosen so far.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Branch behind the most recent choice.
    #[must_use]
    pub fn last_branch(&self) -> Option<Branch> {
        self.last_branch
    }

    /// Returns `true` if `me` is hurt badly enough to fight desperately.
    #[must_use]
    pub fn is_desperate(&self, me: &Combatant) -> bool {
        me.health_ratio() <= DESPERATION_THRESHOLD - self.personality.risk_taking * 0.15
    }

    /// Move type to answer `move_type` with.
    ///
    /// Buff, Debuff and Utility have no counter in the cycle; they are met
    /// with the most preferred move type, or Focus.
    #[must_use]
    pub fn counter_type(&self, move_type: MoveType) -> MoveType {
        move_type
            .countered_by()
            .or_else(|| self.personality.preferred_moves.first().copied())
            .unwrap_or(MoveType::Focus)
    }

    fn decide(&self, view: &RoundView<'_>, dice: &mut dyn Dice) -> (Branch, CombatMove) {
        let usable: Vec<&CombatMove> = self
            .moves
            .iter()
            .filter(|m| view.me.can_afford(&m.cost))
            .collect();
        if usable.is_empty() {
            return (Branch::Fallback, CombatMove::fallback());
        }

        if self.is_desperate(view.me) {
            return (Branch::Desperate, Self::choose_desperate(&usable, dice));
        }

        if let Some(foe_move) = view.foe_last_move {
            if self.should_counter(foe_move, dice) {
                return match self.choose_counter(&usable, foe_move, dice) {
                    Some(chosen) => (Branch::Counter, chosen),
                    None => (Branch::Standard, self.choose_standard(&usable, dice)),
                };
            }
        }

        if self.should_exploit(view.foe, dice) {
            if let Some(chosen) = Self::choose_exploit(&usable, view.foe, dice) {
                return (Branch::Exploit, chosen);
            }
        }

        (Branch::Standard, self.choose_standard(&usable, dice))
    }

    // =========================================================================
    // Branch triggers
    // =========================================================================

    fn should_counter(&self, foe_move: MoveType, dice: &mut dyn Dice) -> bool {
        let mut chance = 0.2 + self.personality.adaptability * 0.4;
        if self.memento.has_succeeded_with(foe_move) {
            chance += 0.2;
        }
        dice.chance(chance)
    }

    fn should_exploit(&self, foe: &Combatant, dice: &mut dyn Dice) -> bool {
        let mut chance = 0.3 + self.personality.aggression * 0.4;
        if EXPLOITABLE.iter().any(|&status| foe.has_status(status)) {
            chance += 0.2;
        }
        dice.chance(chance)
    }

    // =========================================================================
    // Branch choices
    // =========================================================================

    fn choose_desperate(usable: &[&CombatMove], dice: &mut dyn Dice) -> CombatMove {
        let force = of_type(usable, MoveType::Force);
        let pool = if force.is_empty() { usable } else { &force[..] };
        pick(pool, dice)
            .cloned()
            .unwrap_or_else(CombatMove::fallback)
            .as_desperate()
            .with_narrative_hook("Fights with desperate fury")
    }

    fn choose_counter(
        &self,
        usable: &[&CombatMove],
        foe_move: MoveType,
        dice: &mut dyn Dice,
    ) -> Option<CombatMove> {
        let counter = self.counter_type(foe_move);
        let chosen = pick(&of_type(usable, counter), dice)?.clone();
        debug!(player = ?foe_move, counter = ?counter, "countering");
        if dice.chance(self.personality.calculation) {
            Some(
                chosen
                    .as_calculated()
                    .with_narrative_hook("Analyzes and counters your strategy"),
            )
        } else {
            Some(chosen)
        }
    }

    fn choose_exploit(
        usable: &[&CombatMove],
        foe: &Combatant,
        dice: &mut dyn Dice,
    ) -> Option<CombatMove> {
        let targets = [
            (Status::Wounded, Domain::Body, MoveType::Force, "Targets your wounds"),
            (Status::Confused, Domain::Mind, MoveType::Focus, "Exploits your confusion"),
        ];
        for (status, domain, move_type, hook) in targets {
            if !foe.has_status(status) {
                continue;
            }
            let matching: Vec<&CombatMove> = usable
                .iter()
                .copied()
                .filter(|m| m.move_type == move_type && m.uses(domain))
                .collect();
            if let Some(chosen) = pick(&matching, dice) {
                return Some(chosen.with_narrative_hook(hook));
            }
        }
        None
    }

    fn choose_standard(&self, usable: &[&CombatMove], dice: &mut dyn Dice) -> CombatMove {
        let pool = self.preferred_pool(usable);

        if dice.chance(self.personality.aggression) {
            if let Some(chosen) = pick(&of_type(&pool, MoveType::Force), dice) {
                return chosen.clone();
            }
        }
        if dice.chance(self.personality.calculation) {
            if let Some(chosen) = pick(&pool, dice) {
                return chosen.as_calculated();
            }
        }
        if dice.chance(self.personality.risk_taking) {
            if let Some(chosen) = pick(&pool, dice) {
                return chosen.as_desperate();
            }
        }
        pick(&pool, dice)
            .cloned()
            .unwrap_or_else(CombatMove::fallback)
    }

    /// Usable moves narrowed by preferred type, else by specialization.
    fn preferred_pool<'m>(&self, usable: &[&'m CombatMove]) -> Vec<&'m CombatMove> {
        let by_type: Vec<&CombatMove> = usable
            .iter()
            .copied()
            .filter(|m| self.personality.preferred_moves.contains(&m.move_type))
            .collect();
        if !by_type.is_empty() {
            return by_type;
        }

        let by_domain: Vec<&CombatMove> = usable
            .iter()
            .copied()
            .filter(|m| self.personality.specialization.iter().any(|&d| m.uses(d)))
            .collect();
        if !by_domain.is_empty() {
            return by_domain;
        }

        usable.to_vec()
    }
}

fn of_type<'m>(moves: &[&'m CombatMove], move_type: MoveType) -> Vec<&'m CombatMove> {
    moves
        .iter()
        .copied()
        .filter(|m| m.move_type == move_type)
        .collect()
}

fn pick<'m>(moves: &[&'m CombatMove], dice: &mut dyn Dice) -> Option<&'m CombatMove> {
    if moves.is_empty() {
        return None;
    }
    moves.get(dice.pick_index(moves.len())).copied()
}

impl Opponent for AdaptiveController {
    fn choose_move(&mut self, view: &RoundView<'_>, dice: &mut dyn Dice) -> CombatMove {
        self.rounds_played += 1;
        let (branch, chosen) = self.decide(view, dice);
        if branch == Branch::Fallback {
            warn!(
                controller = view.me.name(),
                "no affordable move, falling back to {}",
                chosen.name
            );
        }
        debug!(
            round = view.round,
            ?branch,
            chosen = %chosen.name,
            desperate = chosen.desperate,
            calculated = chosen.calculated,
            "controller decided"
        );
        self.last_branch = Some(branch);
        chosen
    }

    fn observe(&mut self, result: &RoundResult, own_state: &Combatant) {
        let (player_move, own_move, player_success) = if result.actor_id == own_state.id() {
            (result.target_move_type, result.actor_move_type, !result.actor_success)
        } else {
            (result.actor_move_type, result.target_move_type, result.actor_success)
        };

        self.memento.record_round(player_move, own_move, player_success);
        let next = self.personality.adapted(RoundFeedback {
            succeeded: !player_success,
            health_ratio: own_state.health_ratio(),
        });
        debug!(
            round = result.round,
            aggression = next.aggression,
            risk_taking = next.risk_taking,
            prediction = ?self.memento.predict_next(),
            "controller learned"
        );
        self.personality = next;
    }
}
