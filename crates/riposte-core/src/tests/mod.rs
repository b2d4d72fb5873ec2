//! Crate-level scenario tests.
//!
//! - `determinism.rs`: same seed, same session
//! - `integration.rs`: full encounters through `CombatSession`
//! - `properties.rs`: invariants under arbitrary inputs
//! - `helpers.rs`: combatant and result factories shared with unit tests

pub(crate) mod helpers;
mod properties;
