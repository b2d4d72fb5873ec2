//! Error types for the combat core.
//!
//! Nothing in the core is fatal. Resolution failures come back as
//! [`ResolutionError`] values the caller inspects before choosing another
//! move; parse failures come back as [`ParseError`].

use thiserror::Error;

use crate::combatant::Resource;

/// Reasons a round could not be resolved.
///
/// When this is returned no combatant state has been mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// A combatant cannot pay the cost of the chosen move.
    #[error("{combatant} lacks {resource} for {move_name} (needs {required}, has {available})")]
    ResourceInsufficiency {
        /// Name of the combatant that cannot pay
        combatant: String,
        /// Name of the move that was too expensive
        move_name: String,
        /// The first pool found short
        resource: Resource,
        /// Cost of the move in that pool
        required: u32,
        /// Current level of that pool
        available: u32,
    },
    /// The session already has a winner or hit its round limit.
    #[error("encounter is over after {rounds} rounds")]
    EncounterOver {
        /// Rounds played
        rounds: u32,
    },
}

/// Failure to parse one of the string-keyed vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not one of the seven domains.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),
    /// Not one of the six move types.
    #[error("unknown move type: {0}")]
    UnknownMoveType(String),
    /// Not a recognised scene tag.
    #[error("unknown scene tag: {0}")]
    UnknownSceneTag(String),
    /// Not a recognised status.
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    /// Not one of the six stances.
    #[error("unknown stance: {0}")]
    UnknownStance(String),
}
