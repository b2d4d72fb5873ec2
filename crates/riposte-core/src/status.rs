//! Tiered status effects.
//!
//! A status lives on a combatant in two forms:
//! - a coarse [`StatusFlags`] tag, used for fast "is the target wounded?" checks
//! - a full [`EnhancedStatus`] record carrying tier, duration, domain modifiers
//!   and stat modifiers, used for rating lookups and consequence severity
//!
//! [`StatusCatalog`] produces the standard templates. Applying one through
//! [`EnhancedStatus::apply_to`] sets the tag, records the template and applies
//! its pool modifiers immediately.
//!
//! # Example
//!
//! ```
//! use riposte_core::domain::Domain;
//! use riposte_core::status::{StatusCatalog, StatusTier};
//!
//! let wound = StatusCatalog::wounded(StatusTier::Severe);
//! assert_eq!(wound.domain_modifier(Domain::Body), -2);
//! assert_eq!(wound.domain_modifier(Domain::Spirit), 0);
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::combatant::{Combatant, Resource};
use crate::domain::Domain;
use crate::error::ParseError;

// =============================================================================
// Coarse status tags
// =============================================================================

bitflags! {
    /// Coarse status tags currently held by a combatant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusFlags: u16 {
        /// Physical damage affecting Body
        const WOUNDED = 1 << 0;
        /// Mental state affecting Mind
        const CONFUSED = 1 << 1;
        /// Temporary inability to act
        const STUNNED = 1 << 2;
        /// Fear affecting decision-making
        const FRIGHTENED = 1 << 3;
        /// Enhanced performance
        const INSPIRED = 1 << 4;
        /// Ongoing damage over time
        const POISONED = 1 << 5;
        /// Ongoing damage over time
        const BLEEDING = 1 << 6;
        /// Reduced stamina regeneration
        const EXHAUSTED = 1 << 7;
    }
}

/// A single status kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Physical damage affecting Body
    Wounded,
    /// Mental state affecting Mind
    Confused,
    /// Temporary inability to act
    Stunned,
    /// Fear affecting decision-making
    Frightened,
    /// Enhanced performance
    Inspired,
    /// Ongoing damage over time
    Poisoned,
    /// Ongoing damage over time
    Bleeding,
    /// Reduced stamina regeneration
    Exhausted,
}

impl Status {
    /// All statuses in declaration order.
    pub const ALL: [Status; 8] = [
        Status::Wounded,
        Status::Confused,
        Status::Stunned,
        Status::Frightened,
        Status::Inspired,
        Status::Poisoned,
        Status::Bleeding,
        Status::Exhausted,
    ];

    /// The coarse tag for this status.
    #[must_use]
    pub const fn flag(self) -> StatusFlags {
        match self {
            Self::Wounded => StatusFlags::WOUNDED,
            Self::Confused => StatusFlags::CONFUSED,
            Self::Stunned => StatusFlags::STUNNED,
            Self::Frightened => StatusFlags::FRIGHTENED,
            Self::Inspired => StatusFlags::INSPIRED,
            Self::Poisoned => StatusFlags::POISONED,
            Self::Bleeding => StatusFlags::BLEEDING,
            Self::Exhausted => StatusFlags::EXHAUSTED,
        }
    }

    /// Display name of this status.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wounded => "Wounded",
            Self::Confused => "Confused",
            Self::Stunned => "Stunned",
            Self::Frightened => "Frightened",
            Self::Inspired => "Inspired",
            Self::Poisoned => "Poisoned",
            Self::Bleeding => "Bleeding",
            Self::Exhausted => "Exhausted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

// =============================================================================
// Tiers, sources, stats
// =============================================================================

/// Severity tier of an enhanced status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusTier {
    /// Nuisance
    Minor,
    /// Noticeable impairment
    Moderate,
    /// Serious impairment
    Severe,
    /// Life-threatening
    Critical,
}

impl StatusTier {
    /// Tier for a status produced by a round with the given effect magnitude.
    ///
    /// Up to 2 is Minor, 3-4 Moderate, 5-6 Severe, 7 and above Critical.
    #[must_use]
    pub const fn from_magnitude(magnitude: u32) -> Self {
        match magnitude {
            0..=2 => Self::Minor,
            3..=4 => Self::Moderate,
            5..=6 => Self::Severe,
            _ => Self::Critical,
        }
    }

    /// Extra consequence severity contributed by a status of this tier.
    #[must_use]
    pub const fn severity_bonus(self) -> u32 {
        match self {
            Self::Minor | Self::Moderate => 0,
            Self::Severe => 2,
            Self::Critical => 4,
        }
    }

    /// Size of the primary domain penalty at this tier.
    const fn penalty(self) -> i32 {
        match self {
            Self::Minor | Self::Moderate => 1,
            Self::Severe => 2,
            Self::Critical => 3,
        }
    }

    const fn level(self) -> u32 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
            Self::Critical => 4,
        }
    }

    const fn adjective(self) -> Option<&'static str> {
        match self {
            Self::Minor => Some("Lightly"),
            Self::Moderate => None,
            Self::Severe => Some("Severely"),
            Self::Critical => Some("Critically"),
        }
    }
}

/// Where a status came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusSource {
    /// Blows, falls, wounds
    Physical,
    /// Tricks, fear, confusion
    Mental,
    /// Curses and blessings
    Spiritual,
    /// The scene itself
    Environmental,
    /// Sorcery
    Magical,
    /// Intimidation, humiliation
    Social,
}

/// A combatant statistic that statuses and consequences can modify.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Stamina restored each round
    StaminaRegen,
    /// Maximum health
    MaxHealth,
    /// Maximum stamina
    MaxStamina,
    /// Maximum focus
    MaxFocus,
    /// Maximum spirit
    MaxSpirit,
}

impl Stat {
    /// The pool whose maximum this stat adjusts, if any.
    #[must_use]
    pub const fn pool(self) -> Option<Resource> {
        match self {
            Self::StaminaRegen => None,
            Self::MaxHealth => Some(Resource::Health),
            Self::MaxStamina => Some(Resource::Stamina),
            Self::MaxFocus => Some(Resource::Focus),
            Self::MaxSpirit => Some(Resource::Spirit),
        }
    }
}

// =============================================================================
// EnhancedStatus
// =============================================================================

/// Full record of a tiered status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedStatus {
    /// Display name, e.g. "Severely Wounded"
    pub name: String,
    /// The coarse status this record belongs to
    pub base: Status,
    /// Severity tier
    pub tier: StatusTier,
    /// Source category
    pub source: StatusSource,
    /// Duration in rounds
    pub duration: u32,
    /// Flavour description
    pub description: String,
    /// Rating modifier per affected domain
    pub domain_modifiers: BTreeMap<Domain, i32>,
    /// Stat modifiers
    pub stat_modifiers: BTreeMap<Stat, i32>,
    /// Free-form effect notes for the narrative layer
    pub special_effects: Vec<String>,
}

impl EnhancedStatus {
    /// Domains this status modifies.
    pub fn affected_domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.domain_modifiers.keys().copied()
    }

    /// Rating modifier for a domain; 0 when the domain is unaffected.
    #[must_use]
    pub fn domain_modifier(&self, domain: Domain) -> i32 {
        self.domain_modifiers.get(&domain).copied().unwrap_or(0)
    }

    /// Modifier for a stat; 0 when the stat is unaffected.
    #[must_use]
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        self.stat_modifiers.get(&stat).copied().unwrap_or(0)
    }

    /// Applies this status to a combatant.
    ///
    /// Adds the coarse tag, records the full record and applies pool-maximum
    /// modifiers immediately.
    pub fn apply_to(&self, combatant: &mut Combatant) {
        combatant.apply_status(self.clone());
    }
}

// =============================================================================
// StatusCatalog
// =============================================================================

/// Factory for the standard status templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCatalog;

impl StatusCatalog {
    /// Template for any status at any tier.
    #[must_use]
    pub fn template(status: Status, tier: StatusTier) -> EnhancedStatus {
        match status {
            Status::Wounded => Self::wounded(tier),
            Status::Confused => graded(
                status,
                tier,
                StatusSource::Mental,
                "Thoughts scatter and plans come apart",
                Domain::Mind,
                &[Domain::Awareness, Domain::Craft],
                Some(Stat::MaxFocus),
            ),
            Status::Stunned => graded(
                status,
                tier,
                StatusSource::Physical,
                "Reeling and slow to respond",
                Domain::Body,
                &[Domain::Awareness, Domain::Mind],
                Some(Stat::StaminaRegen),
            ),
            Status::Frightened => graded(
                status,
                tier,
                StatusSource::Mental,
                "Fear saps resolve",
                Domain::Authority,
                &[Domain::Spirit, Domain::Social],
                Some(Stat::MaxSpirit),
            ),
            Status::Inspired => {
                let mut inspired = graded(
                    status,
                    tier,
                    StatusSource::Social,
                    "Emboldened and sharp",
                    Domain::Spirit,
                    &[Domain::Authority, Domain::Social],
                    None,
                );
                for modifier in inspired.domain_modifiers.values_mut() {
                    *modifier = modifier.abs();
                }
                inspired
            }
            Status::Poisoned => graded(
                status,
                tier,
                StatusSource::Physical,
                "Venom works through the blood",
                Domain::Body,
                &[Domain::Mind, Domain::Awareness],
                Some(Stat::StaminaRegen),
            ),
            Status::Bleeding => graded(
                status,
                tier,
                StatusSource::Physical,
                "An open wound that will not close",
                Domain::Body,
                &[Domain::Craft],
                Some(Stat::MaxStamina),
            ),
            Status::Exhausted => graded(
                status,
                tier,
                StatusSource::Physical,
                "Every motion costs more than it should",
                Domain::Body,
                &[Domain::Awareness],
                Some(Stat::StaminaRegen),
            ),
        }
    }

    /// Wounded at the given tier.
    #[must_use]
    pub fn wounded(tier: StatusTier) -> EnhancedStatus {
        let (duration, description, domains, stats, effects): (
            u32,
            &str,
            Vec<(Domain, i32)>,
            Vec<(Stat, i32)>,
            Vec<&str>,
        ) = match tier {
            StatusTier::Minor => (
                3,
                "A minor wound that hampers physical activity",
                vec![(Domain::Body, -1)],
                vec![(Stat::StaminaRegen, -1)],
                vec![],
            ),
            StatusTier::Moderate => (
                4,
                "A significant wound that limits movement",
                vec![(Domain::Body, -1), (Domain::Awareness, -1)],
                vec![(Stat::StaminaRegen, -1), (Stat::MaxStamina, -10)],
                vec!["May leave blood trail"],
            ),
            StatusTier::Severe => (
                6,
                "A severe wound that greatly impairs function",
                vec![(Domain::Body, -2), (Domain::Awareness, -1), (Domain::Craft, -1)],
                vec![(Stat::StaminaRegen, -2), (Stat::MaxStamina, -20)],
                vec![
                    "Bleeding: Take 3 damage each round",
                    "Visible weakness: Enemies target you more",
                ],
            ),
            StatusTier::Critical => (
                8,
                "A life-threatening wound that severely impairs all function",
                vec![
                    (Domain::Body, -3),
                    (Domain::Awareness, -2),
                    (Domain::Craft, -2),
                    (Domain::Mind, -1),
                ],
                vec![
                    (Stat::StaminaRegen, -3),
                    (Stat::MaxStamina, -30),
                    (Stat::MaxFocus, -20),
                ],
                vec![
                    "Heavy Bleeding: Take 5 damage each round",
                    "Shock: 20% chance to lose a turn",
                    "Requires immediate medical attention",
                ],
            ),
        };

        EnhancedStatus {
            name: tiered_name(Status::Wounded, tier),
            base: Status::Wounded,
            tier,
            source: StatusSource::Physical,
            duration,
            description: description.to_string(),
            domain_modifiers: domains.into_iter().collect(),
            stat_modifiers: stats.into_iter().collect(),
            special_effects: effects.into_iter().map(str::to_string).collect(),
        }
    }
}

fn tiered_name(status: Status, tier: StatusTier) -> String {
    match tier.adjective() {
        Some(adjective) => format!("{adjective} {status}"),
        None => status.to_string(),
    }
}

/// Builds a template whose penalties widen with the tier.
///
/// The primary domain always takes the full tier penalty. Secondary domains
/// take -1 each: the first from Moderate, all of them from Severe. The
/// optional stat takes a tier-scaled hit from Severe.
fn graded(
    status: Status,
    tier: StatusTier,
    source: StatusSource,
    description: &str,
    primary: Domain,
    secondary: &[Domain],
    stat: Option<Stat>,
) -> EnhancedStatus {
    let mut domain_modifiers = BTreeMap::new();
    domain_modifiers.insert(primary, -tier.penalty());

    let secondary_count = match tier {
        StatusTier::Minor => 0,
        StatusTier::Moderate => 1,
        StatusTier::Severe | StatusTier::Critical => secondary.len(),
    };
    for domain in secondary.iter().take(secondary_count) {
        domain_modifiers.insert(*domain, -1);
    }

    let mut stat_modifiers = BTreeMap::new();
    if let Some(stat) = stat {
        if tier >= StatusTier::Severe {
            let level = tier.penalty() - 1;
            let amount = match stat {
                Stat::StaminaRegen => -level,
                _ => -10 * level,
            };
            stat_modifiers.insert(stat, amount);
        }
    }

    EnhancedStatus {
        name: tiered_name(status, tier),
        base: status,
        tier,
        source,
        duration: 1 + tier.level(),
        description: description.to_string(),
        domain_modifiers,
        stat_modifiers,
        special_effects: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tier_tests {
        use super::*;

        #[test]
        fn tier_from_magnitude_bands() {
            assert_eq!(StatusTier::from_magnitude(0), StatusTier::Minor);
            assert_eq!(StatusTier::from_magnitude(2), StatusTier::Minor);
            assert_eq!(StatusTier::from_magnitude(3), StatusTier::Moderate);
            assert_eq!(StatusTier::from_magnitude(5), StatusTier::Severe);
            assert_eq!(StatusTier::from_magnitude(6), StatusTier::Severe);
            assert_eq!(StatusTier::from_magnitude(7), StatusTier::Critical);
            assert_eq!(StatusTier::from_magnitude(40), StatusTier::Critical);
        }

        #[test]
        fn severity_bonus_only_for_top_tiers() {
            assert_eq!(StatusTier::Minor.severity_bonus(), 0);
            assert_eq!(StatusTier::Moderate.severity_bonus(), 0);
            assert_eq!(StatusTier::Severe.severity_bonus(), 2);
            assert_eq!(StatusTier::Critical.severity_bonus(), 4);
        }
    }

    mod catalog_tests {
        use super::*;

        #[test]
        fn wounded_tiers_escalate() {
            let minor = StatusCatalog::wounded(StatusTier::Minor);
            let critical = StatusCatalog::wounded(StatusTier::Critical);

            assert_eq!(minor.name, "Lightly Wounded");
            assert_eq!(critical.name, "Critically Wounded");
            assert!(critical.duration > minor.duration);
            assert!(critical.domain_modifier(Domain::Body) < minor.domain_modifier(Domain::Body));
            assert_eq!(critical.stat_modifier(Stat::MaxFocus), -20);
            assert_eq!(minor.stat_modifier(Stat::MaxStamina), 0);
        }

        #[test]
        fn moderate_wounded_matches_plain_name() {
            let wound = StatusCatalog::template(Status::Wounded, StatusTier::Moderate);
            assert_eq!(wound.name, "Wounded");
            assert_eq!(
                wound.affected_domains().collect::<Vec<_>>(),
                vec![Domain::Body, Domain::Awareness]
            );
        }

        #[test]
        fn confused_targets_mind() {
            let confused = StatusCatalog::template(Status::Confused, StatusTier::Minor);
            assert_eq!(confused.base, Status::Confused);
            assert_eq!(confused.domain_modifier(Domain::Mind), -1);
            assert_eq!(confused.domain_modifier(Domain::Awareness), 0);

            let severe = StatusCatalog::template(Status::Confused, StatusTier::Severe);
            assert_eq!(severe.domain_modifier(Domain::Mind), -2);
            assert_eq!(severe.domain_modifier(Domain::Craft), -1);
            assert_eq!(severe.stat_modifier(Stat::MaxFocus), -10);
        }

        #[test]
        fn inspired_modifiers_are_positive() {
            let inspired = StatusCatalog::template(Status::Inspired, StatusTier::Severe);
            assert!(inspired.domain_modifiers.values().all(|m| *m > 0));
        }

        #[test]
        fn every_status_has_a_template_at_every_tier() {
            for status in Status::ALL {
                for tier in [
                    StatusTier::Minor,
                    StatusTier::Moderate,
                    StatusTier::Severe,
                    StatusTier::Critical,
                ] {
                    let template = StatusCatalog::template(status, tier);
                    assert_eq!(template.base, status);
                    assert_eq!(template.tier, tier);
                    assert!(template.duration > 0);
                }
            }
        }
    }

    mod flag_tests {
        use super::*;

        #[test]
        fn flags_are_distinct() {
            let all = Status::ALL
                .iter()
                .fold(StatusFlags::empty(), |acc, s| acc | s.flag());
            assert_eq!(all.bits().count_ones(), 8);
        }

        #[test]
        fn status_parses_from_name() {
            assert_eq!("stunned".parse::<Status>().unwrap(), Status::Stunned);
            assert!("Petrified".parse::<Status>().is_err());
        }
    }
}
