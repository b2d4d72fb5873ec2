//! Ability domains and tactical move types.
//!
//! This module provides the two closed vocabularies every other part of the
//! core is keyed on:
//! - [`Domain`]: the seven ability axes a combatant is rated in
//! - [`MoveType`]: the tactical category of a move, which drives the cyclic
//!   advantage relation (Force beats Trick, Trick beats Focus, Focus beats Force)
//!
//! # Example
//!
//! ```
//! use riposte_core::domain::MoveType;
//!
//! assert_eq!(MoveType::Force.advantage_against(MoveType::Trick), 1);
//! assert_eq!(MoveType::Trick.advantage_against(MoveType::Force), -1);
//! assert_eq!(MoveType::Buff.advantage_against(MoveType::Force), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

// =============================================================================
// Domain
// =============================================================================

/// One of the seven fixed ability axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Physical prowess, endurance, strength
    Body,
    /// Intelligence, reasoning, knowledge
    Mind,
    /// Creation, technical skills, manipulation of objects
    Craft,
    /// Perception, intuition, reflexes
    Awareness,
    /// Charisma, deception, persuasion
    Social,
    /// Command, intimidation, willpower
    Authority,
    /// Faith, connection to otherworldly forces
    Spirit,
}

impl Domain {
    /// All domains in declaration order.
    pub const ALL: [Domain; 7] = [
        Domain::Body,
        Domain::Mind,
        Domain::Craft,
        Domain::Awareness,
        Domain::Social,
        Domain::Authority,
        Domain::Spirit,
    ];

    /// Returns the display name of this domain.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Mind => "Mind",
            Self::Craft => "Craft",
            Self::Awareness => "Awareness",
            Self::Social => "Social",
            Self::Authority => "Authority",
            Self::Spirit => "Spirit",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownDomain(s.to_string()))
    }
}

// =============================================================================
// MoveType
// =============================================================================

/// Tactical category of a move.
///
/// Only `Force`, `Trick` and `Focus` take part in the advantage cycle. Every
/// pairing that involves `Buff`, `Debuff` or `Utility` is neutral.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveType {
    /// Direct attacks, overwhelming power. Beats `Trick`.
    Force,
    /// Deception, evasion, misdirection. Beats `Focus`.
    Trick,
    /// Analysis, blocking, prediction. Beats `Force`.
    Focus,
    /// Enhance abilities or stats
    Buff,
    /// Weaken opponent abilities or stats
    Debuff,
    /// Environmental interaction, movement, etc.
    Utility,
}

impl MoveType {
    /// All move types in declaration order.
    pub const ALL: [MoveType; 6] = [
        MoveType::Force,
        MoveType::Trick,
        MoveType::Focus,
        MoveType::Buff,
        MoveType::Debuff,
        MoveType::Utility,
    ];

    /// Returns the move type this one beats, if it takes part in the cycle.
    #[must_use]
    pub const fn beats(self) -> Option<MoveType> {
        match self {
            Self::Force => Some(Self::Trick),
            Self::Trick => Some(Self::Focus),
            Self::Focus => Some(Self::Force),
            Self::Buff | Self::Debuff | Self::Utility => None,
        }
    }

    /// Returns the move type that beats this one, if it takes part in the cycle.
    ///
    /// Force is countered by Focus, Trick by Force, Focus by Trick.
    #[must_use]
    pub const fn countered_by(self) -> Option<MoveType> {
        match self {
            Self::Force => Some(Self::Focus),
            Self::Trick => Some(Self::Force),
            Self::Focus => Some(Self::Trick),
            Self::Buff | Self::Debuff | Self::Utility => None,
        }
    }

    /// Type advantage of `self` (the actor) against `other` (the target).
    ///
    /// Returns `1` when the actor holds the advantage, `-1` when the target
    /// does, and `0` for neutral pairings (including a type against itself).
    #[must_use]
    pub fn advantage_against(self, other: MoveType) -> i8 {
        if self.beats() == Some(other) {
            1
        } else if other.beats() == Some(self) {
            -1
        } else {
            0
        }
    }

    /// Returns `true` if a successful move of this type deals health damage.
    #[must_use]
    pub const fn deals_damage(self) -> bool {
        matches!(self, Self::Force | Self::Trick)
    }

    /// Returns the display name of this move type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Force => "Force",
            Self::Trick => "Trick",
            Self::Focus => "Focus",
            Self::Buff => "Buff",
            Self::Debuff => "Debuff",
            Self::Utility => "Utility",
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoveType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownMoveType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod advantage_tests {
        use super::*;

        const CYCLE: [MoveType; 3] = [MoveType::Force, MoveType::Trick, MoveType::Focus];

        #[test]
        fn cycle_is_antisymmetric() {
            for a in CYCLE {
                for b in CYCLE {
                    if a == b {
                        assert_eq!(a.advantage_against(b), 0);
                    } else {
                        let forward = a.advantage_against(b);
                        let backward = b.advantage_against(a);
                        assert_eq!(forward, -backward, "{a} vs {b}");
                        assert_ne!(forward, 0, "{a} vs {b} should not be neutral");
                    }
                }
            }
        }

        #[test]
        fn non_cycle_types_are_neutral() {
            for a in MoveType::ALL {
                for b in [MoveType::Buff, MoveType::Debuff, MoveType::Utility] {
                    assert_eq!(a.advantage_against(b), 0);
                    assert_eq!(b.advantage_against(a), 0);
                }
            }
        }

        #[test]
        fn countered_by_inverts_beats() {
            for t in CYCLE {
                let counter = t.countered_by().unwrap();
                assert_eq!(counter.beats(), Some(t));
            }
            assert_eq!(MoveType::Utility.countered_by(), None);
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn domain_parses_case_insensitively() {
            assert_eq!("awareness".parse::<Domain>().unwrap(), Domain::Awareness);
            assert_eq!(" Body ".parse::<Domain>().unwrap(), Domain::Body);
        }

        #[test]
        fn unknown_domain_is_an_error() {
            let err = "Luck".parse::<Domain>().unwrap_err();
            assert_eq!(err, ParseError::UnknownDomain("Luck".to_string()));
        }

        #[test]
        fn move_type_round_trips_through_display() {
            for t in MoveType::ALL {
                assert_eq!(t.to_string().parse::<MoveType>().unwrap(), t);
            }
        }
    }
}
