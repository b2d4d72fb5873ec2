//! Scene tags and the roll modifiers they produce.
//!
//! The resolver asks [`Environment::modifiers_for`] once per side per round.
//! The result is a net roll adjustment plus the narrative hooks explaining it.
//!
//! # Example
//!
//! ```
//! use riposte_core::combatant::{Combatant, CombatantId};
//! use riposte_core::environment::{Environment, SceneTag};
//! use riposte_core::moves::MoveLibrary;
//!
//! let env = Environment::from_tags([SceneTag::ConfinedSpace]);
//! let hero = Combatant::new(CombatantId::new(0), "Hero", []);
//! let blow = MoveLibrary::standard().get("Hammer Blow").cloned().unwrap();
//!
//! let modifier = env.modifiers_for(&blow, &hero);
//! assert_eq!(modifier.roll_modifier, -1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::combatant::Combatant;
use crate::domain::Domain;
use crate::error::ParseError;
use crate::moves::CombatMove;

/// A feature of the scene that can shift rolls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SceneTag {
    /// Pools, rivers, rain
    Water,
    /// Open flames nearby
    Fire,
    /// One side stands above the other
    HighGround,
    /// Poor light
    Darkness,
    /// Corridors, caves, crowded rooms
    ConfinedSpace,
    /// Nowhere to hide
    OpenField,
    /// Ambient magic
    MagicalAura,
    /// Collapsed structures and debris
    Ruins,
    /// Trees and undergrowth
    Forest,
    /// Streets and buildings
    Urban,
    /// Loose footing
    UnstableGround,
}

impl SceneTag {
    /// All tags in declaration order.
    pub const ALL: [SceneTag; 11] = [
        SceneTag::Water,
        SceneTag::Fire,
        SceneTag::HighGround,
        SceneTag::Darkness,
        SceneTag::ConfinedSpace,
        SceneTag::OpenField,
        SceneTag::MagicalAura,
        SceneTag::Ruins,
        SceneTag::Forest,
        SceneTag::Urban,
        SceneTag::UnstableGround,
    ];

    /// Display name, e.g. "Confined Space".
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Fire => "Fire",
            Self::HighGround => "High Ground",
            Self::Darkness => "Darkness",
            Self::ConfinedSpace => "Confined Space",
            Self::OpenField => "Open Field",
            Self::MagicalAura => "Magical Aura",
            Self::Ruins => "Ruins",
            Self::Forest => "Forest",
            Self::Urban => "Urban",
            Self::UnstableGround => "Unstable Ground",
        }
    }
}

impl fmt::Display for SceneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownSceneTag(s.to_string()))
    }
}

/// Domains that let a combatant see in the dark.
const DARKNESS_DOMAINS: [Domain; 2] = [Domain::Awareness, Domain::Spirit];

/// Net effect of the scene on one combatant's roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentModifier {
    /// Added to the roll
    pub roll_modifier: i32,
    /// One hook per contributing rule, in domain order
    pub narrative_hooks: Vec<String>,
}

impl EnvironmentModifier {
    fn push(&mut self, delta: i32, hook: &str) {
        self.roll_modifier += delta;
        self.narrative_hooks.push(hook.to_string());
    }
}

/// What using an interaction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionEffect {
    /// Penalty to the opponent's roll
    TargetPenalty(i32),
    /// Flat extra damage
    DamageBonus(u32),
    /// Bonus to the user's roll
    RollBonus(i32),
}

/// A scene-specific action made available by a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Display name
    pub name: String,
    /// What the action looks like
    pub description: String,
    /// Domain the action draws on
    pub domain: Domain,
    /// Mechanical effect
    pub effect: InteractionEffect,
    /// Hook for the narrative layer
    pub narrative: String,
}

/// The active scene tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    tags: BTreeSet<SceneTag>,
}

impl Environment {
    /// An empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene with the given tags.
    #[must_use]
    pub fn from_tags(tags: impl IntoIterator<Item = SceneTag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    /// Adds a tag; returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: SceneTag) -> bool {
        self.tags.insert(tag)
    }

    /// Removes a tag; returns `false` if it was absent.
    pub fn remove_tag(&mut self, tag: SceneTag) -> bool {
        self.tags.remove(&tag)
    }

    /// Returns `true` if the tag is active.
    #[must_use]
    pub fn has(&self, tag: SceneTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Active tags, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = SceneTag> + '_ {
        self.tags.iter().copied()
    }

    /// Roll modifier and hooks for `combatant` using `combat_move` here.
    ///
    /// Each of the move's domains is checked against the table once:
    /// - Awareness in Darkness: +2 if strong in Awareness or Spirit, else -1
    /// - Body in a Confined Space: -1
    /// - Mind in a Magical Aura: +2 when the move also uses Spirit
    /// - Authority in an Open Field: +1
    /// - Craft in Ruins: +1
    #[must_use]
    pub fn modifiers_for(
        &self,
        combat_move: &CombatMove,
        combatant: &Combatant,
    ) -> EnvironmentModifier {
        let mut modifier = EnvironmentModifier::default();

        for domain in &combat_move.domains {
            match domain {
                Domain::Awareness if self.has(SceneTag::Darkness) => {
                    let sees = DARKNESS_DOMAINS.iter().any(|d| combatant.is_strong_in(*d));
                    if sees {
                        modifier.push(2, "Expertly navigates the darkness");
                    } else {
                        modifier.push(-1, "Struggles to perceive in darkness");
                    }
                }
                Domain::Body if self.has(SceneTag::ConfinedSpace) => {
                    modifier.push(-1, "Limited movement in the confined space");
                }
                Domain::Mind
                    if self.has(SceneTag::MagicalAura) && combat_move.uses(Domain::Spirit) =>
                {
                    modifier.push(2, "Channels the ambient magical energy");
                }
                Domain::Authority if self.has(SceneTag::OpenField) => {
                    modifier.push(1, "Voice carries powerfully across the field");
                }
                Domain::Craft if self.has(SceneTag::Ruins) => {
                    modifier.push(1, "Uses scattered debris as improvised tools");
                }
                _ => {}
            }
        }

        modifier
    }

    /// Interactions the active tags make available.
    #[must_use]
    pub fn available_interactions(&self) -> Vec<Interaction> {
        self.tags
            .iter()
            .filter_map(|tag| interaction_for(*tag))
            .collect()
    }
}

fn interaction_for(tag: SceneTag) -> Option<Interaction> {
    let (name, description, domain, effect, narrative) = match tag {
        SceneTag::Water => (
            "Splash Water",
            "Splash water to distract or obscure vision",
            Domain::Awareness,
            InteractionEffect::TargetPenalty(-1),
            "Water obscures vision",
        ),
        SceneTag::Fire => (
            "Use Flames",
            "Use nearby flames as a weapon or distraction",
            Domain::Craft,
            InteractionEffect::DamageBonus(3),
            "Flames burn the target",
        ),
        SceneTag::HighGround => (
            "Tactical Advantage",
            "Use high ground for combat advantage",
            Domain::Awareness,
            InteractionEffect::RollBonus(2),
            "The high ground provides advantage",
        ),
        _ => return None,
    };
    Some(Interaction {
        name: name.to_string(),
        description: description.to_string(),
        domain,
        effect,
        narrative: narrative.to_string(),
    })
}
