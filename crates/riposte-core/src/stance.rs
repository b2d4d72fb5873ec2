//! Combat stances.
//!
//! A [`Stance`] is the posture a combatant holds across rounds. Its
//! [`StanceEffect`] shifts the combatant's roll when it acts and when it
//! defends, and scales what its moves cost.
//!
//! # Example
//!
//! ```
//! use riposte_core::moves::MoveCost;
//! use riposte_core::stance::Stance;
//!
//! let effect = Stance::Aggressive.effect();
//! assert_eq!(effect.attack_modifier, 2);
//! assert_eq!(effect.defense_modifier, -1);
//! assert_eq!(effect.scale(&MoveCost::new(5, 1, 0)), MoveCost::new(6, 1, 0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::moves::MoveCost;

/// Posture held across rounds.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Stance {
    /// Offense first, open to counters
    Aggressive,
    /// Guard up, hits back less
    Defensive,
    /// No modifiers
    #[default]
    Balanced,
    /// Plans ahead at a focus premium
    Tactical,
    /// All in, paid for in stamina and guard
    Reckless,
    /// Waits for the opening
    Reactive,
}

impl Stance {
    /// All stances in declaration order.
    pub const ALL: [Stance; 6] = [
        Stance::Aggressive,
        Stance::Defensive,
        Stance::Balanced,
        Stance::Tactical,
        Stance::Reckless,
        Stance::Reactive,
    ];

    /// Returns the display name of this stance.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aggressive => "Aggressive",
            Self::Defensive => "Defensive",
            Self::Balanced => "Balanced",
            Self::Tactical => "Tactical",
            Self::Reckless => "Reckless",
            Self::Reactive => "Reactive",
        }
    }

    /// Roll and cost modifiers of this stance.
    #[must_use]
    pub const fn effect(self) -> StanceEffect {
        match self {
            Self::Aggressive => StanceEffect {
                attack_modifier: 2,
                defense_modifier: -1,
                stamina_percent: 120,
                ..StanceEffect::NEUTRAL
            },
            Self::Defensive => StanceEffect {
                attack_modifier: -1,
                defense_modifier: 2,
                stamina_percent: 80,
                ..StanceEffect::NEUTRAL
            },
            Self::Balanced => StanceEffect::NEUTRAL,
            Self::Tactical => StanceEffect {
                focus_percent: 120,
                ..StanceEffect::NEUTRAL
            },
            Self::Reckless => StanceEffect {
                attack_modifier: 3,
                defense_modifier: -2,
                stamina_percent: 150,
                ..StanceEffect::NEUTRAL
            },
            Self::Reactive => StanceEffect {
                attack_modifier: -1,
                defense_modifier: 1,
                focus_percent: 110,
                ..StanceEffect::NEUTRAL
            },
        }
    }

    /// One-line flavour for narration.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Aggressive => "Offense-focused, hits hard but leaves openings",
            Self::Defensive => "Defense-focused, gives up reach for resilience",
            Self::Balanced => "Neither pressing nor yielding",
            Self::Tactical => "Plans every exchange before committing",
            Self::Reckless => "Throws caution aside for raw power",
            Self::Reactive => "Waits for the opponent to commit, then answers",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stance| stance.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownStance(s.to_string()))
    }
}

/// Roll and cost modifiers of a stance.
///
/// Cost multipliers are whole percentages; scaled costs round half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceEffect {
    /// Added to the roll when acting
    pub attack_modifier: i32,
    /// Added to the roll when defending
    pub defense_modifier: i32,
    /// Stamina cost multiplier, in percent
    pub stamina_percent: u32,
    /// Focus cost multiplier, in percent
    pub focus_percent: u32,
    /// Spirit cost multiplier, in percent
    pub spirit_percent: u32,
}

impl Default for StanceEffect {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl StanceEffect {
    /// No roll shift, costs unchanged.
    pub const NEUTRAL: StanceEffect = StanceEffect {
        attack_modifier: 0,
        defense_modifier: 0,
        stamina_percent: 100,
        focus_percent: 100,
        spirit_percent: 100,
    };

    /// `cost` with each pool scaled by its multiplier.
    #[must_use]
    pub fn scale(&self, cost: &MoveCost) -> MoveCost {
        MoveCost::new(
            scale_one(cost.stamina, self.stamina_percent),
            scale_one(cost.focus, self.focus_percent),
            scale_one(cost.spirit, self.spirit_percent),
        )
    }
}

fn scale_one(amount: u32, percent: u32) -> u32 {
    let scaled = (u64::from(amount) * u64::from(percent) + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
