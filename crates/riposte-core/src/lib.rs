//! # Riposte Core
//!
//! Turn-based opposed-move combat resolution.
//!
//! This crate provides the simulation core of an encounter between a player
//! and an opposing policy. One round runs to completion before the next one
//! starts; all randomness comes from an injected [`Dice`] so that a seed
//! replays a session exactly.
//!
//! ## Architecture
//!
//! - **Domain model**: [`Combatant`], [`CombatMove`], [`EnhancedStatus`],
//!   [`Consequence`]
//! - **Environment**: scene tags that shift rolls
//! - **Stances**: postures that shift rolls and scale move costs
//! - **Status engine**: tiered statuses with domain and stat modifiers
//! - **Combo detector**: per-combatant move-type windows matched against
//!   registered sequences
//! - **Resolver**: cost check, rolls, advantage, momentum, effects, logging
//! - **Session**: owns one encounter's state and drives an [`Opponent`]
//!
//! ## Usage
//!
//! ```
//! use riposte_core::{
//!     Combatant, CombatantId, CombatSession, Domain, FixedOpponent, MoveLibrary, RandomDice,
//! };
//!
//! let library = MoveLibrary::standard();
//! let hero = Combatant::new(CombatantId::new(0), "Hero", [(Domain::Body, 3)]);
//! let bandit = Combatant::new(CombatantId::new(1), "Bandit", [(Domain::Mind, 2)]);
//! let guard = FixedOpponent::new(library.get("Analytical Defense").cloned().unwrap());
//!
//! let mut session = CombatSession::new(hero, bandit, guard, RandomDice::seeded(42));
//! let result = session.play_round(library.get("Hammer Blow").unwrap()).unwrap();
//! println!("{} rolled {} against {}", result.actor_name, result.actor_roll, result.target_roll);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combat_log;
pub mod combatant;
pub mod combo;
pub mod consequence;
pub mod dice;
pub mod domain;
pub mod environment;
pub mod error;
pub mod moves;
pub mod resolver;
pub mod session;
pub mod stance;
pub mod status;

#[cfg(test)]
mod tests;

pub use combat_log::{AppliedStatus, CombatLog, RoundResult};
pub use combatant::{Combatant, CombatantId, CombatantKind, Momentum, Resource, ResourcePool};
pub use combo::{Combo, ComboBonus, ComboDetector, ComboMatch};
pub use consequence::{create_consequence, Consequence, ConsequenceDuration, ConsequenceSeverity};
pub use dice::{Dice, RandomDice, ScriptedDice};
pub use domain::{Domain, MoveType};
pub use environment::{Environment, EnvironmentModifier, SceneTag};
pub use error::{ParseError, ResolutionError};
pub use moves::{CombatMove, MoveCost, MoveLibrary};
pub use resolver::{CombatResolver, ResolverConfig};
pub use session::{
    CombatSession, FixedOpponent, Initiative, Opponent, Outcome, RoundView, SessionConfig,
};
pub use stance::{Stance, StanceEffect};
pub use status::{EnhancedStatus, Stat, Status, StatusCatalog, StatusFlags, StatusTier};
