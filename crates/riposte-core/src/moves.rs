//! Combat moves and the move library.
//!
//! A [`CombatMove`] is an immutable template. The risk flags and narrative
//! hook are set per use through copy-with-modification builders, so one
//! library entry can be handed to both sides without aliasing.
//!
//! # Example
//!
//! ```
//! use riposte_core::moves::MoveLibrary;
//!
//! let library = MoveLibrary::standard();
//! let blow = library.get("Hammer Blow").unwrap();
//! let reckless = blow.as_desperate();
//!
//! assert!(reckless.desperate);
//! assert!(!blow.desperate);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Domain, MoveType};

/// Resource cost of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveCost {
    /// Stamina cost
    pub stamina: u32,
    /// Focus cost
    pub focus: u32,
    /// Spirit cost
    pub spirit: u32,
}

impl MoveCost {
    /// A zero cost.
    pub const FREE: MoveCost = MoveCost {
        stamina: 0,
        focus: 0,
        spirit: 0,
    };

    /// Creates a cost.
    #[must_use]
    pub const fn new(stamina: u32, focus: u32, spirit: u32) -> Self {
        Self {
            stamina,
            focus,
            spirit,
        }
    }
}

/// A move template, optionally flagged for a single use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatMove {
    /// Display name, also the library key
    pub name: String,
    /// Tactical category
    pub move_type: MoveType,
    /// Domains the roll draws on (at least one)
    pub domains: Vec<Domain>,
    /// Flavour text
    #[serde(default)]
    pub description: String,
    /// Resource cost
    #[serde(default)]
    pub cost: MoveCost,
    /// Wide-variance roll, amplified damage
    #[serde(default)]
    pub desperate: bool,
    /// Narrow-variance roll with a floor
    #[serde(default)]
    pub calculated: bool,
    /// Hook appended verbatim to the round's narrative hooks
    #[serde(default)]
    pub narrative_hook: Option<String>,
}

impl CombatMove {
    /// Creates an unflagged move.
    ///
    /// `domains` must name at least one domain; debug builds assert it.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        move_type: MoveType,
        domains: impl IntoIterator<Item = Domain>,
        description: impl Into<String>,
        cost: MoveCost,
    ) -> Self {
        let domains: Vec<Domain> = domains.into_iter().collect();
        debug_assert!(!domains.is_empty(), "a move needs at least one domain");
        Self {
            name: name.into(),
            move_type,
            domains,
            description: description.into(),
            cost,
            desperate: false,
            calculated: false,
            narrative_hook: None,
        }
    }

    /// The zero-cost move used when nothing else is affordable.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(
            "Desperate Action",
            MoveType::Force,
            [Domain::Body],
            "A last-ditch effort with whatever strength remains",
            MoveCost::FREE,
        )
    }

    /// A copy flagged desperate.
    #[must_use]
    pub fn as_desperate(&self) -> Self {
        Self {
            desperate: true,
            ..self.clone()
        }
    }

    /// A copy flagged calculated.
    #[must_use]
    pub fn as_calculated(&self) -> Self {
        Self {
            calculated: true,
            ..self.clone()
        }
    }

    /// A copy carrying the given narrative hook.
    #[must_use]
    pub fn with_narrative_hook(&self, hook: impl Into<String>) -> Self {
        Self {
            narrative_hook: Some(hook.into()),
            ..self.clone()
        }
    }

    /// Returns `true` if any of this move's domains is `domain`.
    #[must_use]
    pub fn uses(&self, domain: Domain) -> bool {
        self.domains.contains(&domain)
    }
}

// =============================================================================
// MoveLibrary
// =============================================================================

/// Name-keyed collection of move templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveLibrary {
    moves: BTreeMap<String, CombatMove>,
}

impl MoveLibrary {
    /// An empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock library.
    #[must_use]
    pub fn standard() -> Self {
        use Domain::{Authority, Awareness, Body, Craft, Mind, Social, Spirit};
        use MoveType::{Buff, Debuff, Focus, Force, Trick, Utility};

        [
            CombatMove::new(
                "Hammer Blow",
                Force,
                [Body, Craft],
                "A powerful overhead strike",
                MoveCost::new(2, 0, 0),
            ),
            CombatMove::new(
                "Commanding Shout",
                Force,
                [Authority, Social],
                "A forceful command that stuns opponents",
                MoveCost::new(0, 1, 1),
            ),
            CombatMove::new(
                "Raging Strike",
                Force,
                [Body],
                "A powerful strike fueled by rage",
                MoveCost::new(2, 0, 0),
            ),
            CombatMove::new(
                "Intimidating Roar",
                Force,
                [Authority, Body],
                "A terrifying roar that frightens enemies",
                MoveCost::new(1, 0, 1),
            ),
            CombatMove::new(
                "Feinting Strike",
                Trick,
                [Awareness, Body],
                "A deceptive attack that misdirects",
                MoveCost::new(1, 1, 0),
            ),
            CombatMove::new(
                "Shadow Step",
                Trick,
                [Awareness],
                "A quick, evasive maneuver",
                MoveCost::new(2, 0, 0),
            ),
            CombatMove::new(
                "Analytical Defense",
                Focus,
                [Mind],
                "Carefully analyze and counter the opponent's strategy",
                MoveCost::new(0, 2, 0),
            ),
            CombatMove::new(
                "Spiritual Insight",
                Focus,
                [Spirit, Awareness],
                "Call upon spiritual powers to predict attacks",
                MoveCost::new(0, 0, 2),
            ),
            CombatMove::new(
                "Inspiring Speech",
                Buff,
                [Social, Authority],
                "Rally allies with inspiring words",
                MoveCost::new(0, 1, 1),
            ),
            CombatMove::new(
                "Unnerving Glare",
                Debuff,
                [Authority, Spirit],
                "A cold stare that shakes the opponent's nerve",
                MoveCost::new(0, 1, 1),
            ),
            CombatMove::new(
                "Improvised Trap",
                Utility,
                [Craft, Awareness],
                "Quickly fashion a trap from available materials",
                MoveCost::new(1, 1, 0),
            ),
        ]
        .into_iter()
        .collect()
    }

    /// Adds or replaces a move under its own name.
    pub fn insert(&mut self, combat_move: CombatMove) -> Option<CombatMove> {
        self.moves.insert(combat_move.name.clone(), combat_move)
    }

    /// Looks up a move by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CombatMove> {
        self.moves.get(name)
    }

    /// All moves, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &CombatMove> {
        self.moves.values()
    }

    /// All moves of one type, ordered by name.
    pub fn of_type(&self, move_type: MoveType) -> impl Iterator<Item = &CombatMove> {
        self.iter().filter(move |m| m.move_type == move_type)
    }

    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the library holds no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl FromIterator<CombatMove> for MoveLibrary {
    fn from_iter<I: IntoIterator<Item = CombatMove>>(iter: I) -> Self {
        let mut library = Self::new();
        for combat_move in iter {
            library.insert(combat_move);
        }
        library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_copy_instead_of_mutating() {
        let library = MoveLibrary::standard();
        let template = library.get("Shadow Step").unwrap();
        let flagged = template
            .as_desperate()
            .as_calculated()
            .with_narrative_hook("Vanishes");

        assert!(flagged.desperate && flagged.calculated);
        assert_eq!(flagged.narrative_hook.as_deref(), Some("Vanishes"));
        assert!(!template.desperate && !template.calculated);
        assert_eq!(template.narrative_hook, None);
    }

    #[test]
    fn fallback_is_free_force_body() {
        let fallback = CombatMove::fallback();
        assert_eq!(fallback.move_type, MoveType::Force);
        assert_eq!(fallback.domains, vec![Domain::Body]);
        assert_eq!(fallback.cost, MoveCost::FREE);
    }

    #[test]
    fn standard_library_covers_every_type() {
        let library = MoveLibrary::standard();
        assert_eq!(library.len(), 11);
        for move_type in MoveType::ALL {
            assert!(library.of_type(move_type).next().is_some(), "{move_type}");
        }
        assert!(library.iter().all(|m| !m.domains.is_empty()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least one domain")]
    fn move_without_domains_is_rejected() {
        let _ = CombatMove::new("Nothing", MoveType::Utility, [], "", MoveCost::FREE);
    }

    #[test]
    fn library_deserializes_from_json_map() {
        let json = r#"{
            "Jab": {
                "name": "Jab",
                "move_type": "Force",
                "domains": ["Body"],
                "cost": { "stamina": 1 }
            }
        }"#;
        let library: MoveLibrary = serde_json::from_str(json).unwrap();
        let jab = library.get("Jab").unwrap();
        assert_eq!(jab.cost, MoveCost::new(1, 0, 0));
        assert!(!jab.desperate);
    }
}
