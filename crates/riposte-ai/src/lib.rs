//! # Riposte AI
//!
//! Adaptive opponents for Riposte encounters.
//!
//! An [`AdaptiveController`] plugs into a
//! [`CombatSession`](riposte_core::CombatSession) through the
//! [`Opponent`](riposte_core::Opponent) trait. It picks moves with a layered
//! policy over its [`Personality`], the state of the fight, and what its
//! [`CombatMemento`] has learned about the player, then drifts its
//! personality after every round.
//!
//! All randomness is drawn from the session's [`Dice`](riposte_core::Dice),
//! so a seeded session replays the controller's choices exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod controller;
pub mod memento;
pub mod personality;

pub use controller::{AdaptiveController, Branch, DESPERATION_THRESHOLD};
pub use memento::CombatMemento;
pub use personality::{Personality, PersonalityError, RoundFeedback};
