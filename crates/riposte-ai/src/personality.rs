//! Opponent personality traits and their slow drift over an encounter.
//!
//! A [`Personality`] is a plain configuration value. Adaptation never mutates
//! it in place: [`Personality::adapted`] returns the next personality, so a
//! controller's history of personalities can be compared in tests.

use riposte_core::{Domain, MoveType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Adaptability below this keeps a personality fixed for the whole encounter.
pub const ADAPTATION_FLOOR: f64 = 0.3;

/// Risk-taking drifts back toward this value when nothing pushes it.
pub const RISK_BASELINE: f64 = 0.5;

/// Invalid personality configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersonalityError {
    /// A trait lies outside `[0.0, 1.0]` (or is NaN).
    #[error("personality trait {name} must be within [0, 1], got {value}")]
    TraitOutOfRange {
        /// Trait name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Behavioral traits of an adaptive opponent.
///
/// All four traits are independent and lie in `[0.0, 1.0]`.
///
/// # Example
///
/// ```
/// use riposte_ai::{Personality, RoundFeedback};
///
/// let brute = Personality::new(0.8, 0.5, 0.5, 0.2).unwrap();
/// let next = brute.adapted(RoundFeedback { succeeded: true, health_ratio: 0.9 });
/// assert!(next.aggression > brute.aggression);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    /// Appetite for attacking and for pressing a weakened foe
    pub aggression: f64,
    /// Readiness to counter and to drift after each round
    pub adaptability: f64,
    /// Willingness to play desperate moves
    pub risk_taking: f64,
    /// Tendency to play calculated moves
    pub calculation: f64,
    /// Domains the opponent favors when no preferred move type is usable
    pub specialization: Vec<Domain>,
    /// Move types the opponent favors; the first also counters non-cycle moves
    pub preferred_moves: Vec<MoveType>,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            aggression: 0.5,
            adaptability: 0.5,
            risk_taking: 0.5,
            calculation: 0.5,
            specialization: Vec::new(),
            preferred_moves: Vec::new(),
        }
    }
}

/// What the opponent learned about its own performance in a round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundFeedback {
    /// `true` if the opponent won the exchange
    pub succeeded: bool,
    /// The opponent's health ratio after the round
    pub health_ratio: f64,
}

impl Personality {
    /// Creates a validated personality with no preferences.
    ///
    /// # Errors
    ///
    /// Returns [`PersonalityError::TraitOutOfRange`] for the first trait
    /// outside `[0.0, 1.0]`.
    pub fn new(
        aggression: f64,
        adaptability: f64,
        risk_taking: f64,
        calculation: f64,
    ) -> Result<Self, PersonalityError> {
        let personality = Self {
            aggression,
            adaptability,
            risk_taking,
            calculation,
            ..Self::default()
        };
        personality.validate()?;
        Ok(personality)
    }

    /// Sets the favored domains.
    #[must_use]
    pub fn with_specialization(mut self, domains: impl IntoIterator<Item = Domain>) -> Self {
        self.specialization = domains.into_iter().collect();
        self
    }

    /// Sets the favored move types, most favored first.
    #[must_use]
    pub fn with_preferred_moves(mut self, move_types: impl IntoIterator<Item = MoveType>) -> Self {
        self.preferred_moves = move_types.into_iter().collect();
        self
    }

    /// Checks that every trait lies in `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`PersonalityError::TraitOutOfRange`] for the first offending
    /// trait.
    pub fn validate(&self) -> Result<(), PersonalityError> {
        for (name, value) in [
            ("aggression", self.aggression),
            ("adaptability", self.adaptability),
            ("risk_taking", self.risk_taking),
            ("calculation", self.calculation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PersonalityError::TraitOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Returns `true` if this personality drifts after rounds.
    #[must_use]
    pub fn adapts(&self) -> bool {
        self.adaptability >= ADAPTATION_FLOOR
    }

    /// The personality after one round of feedback.
    ///
    /// Aggression moves 5% up on a success and 5% down on a failure.
    /// Risk-taking climbs 10% while losing below half health, and otherwise
    /// closes 5% of its distance to [`RISK_BASELINE`]. Personalities that do
    /// not [`adapt`](Self::adapts) come back unchanged.
    #[must_use]
    pub fn adapted(&self, feedback: RoundFeedback) -> Self {
        if !self.adapts() {
            return self.clone();
        }

        let aggression = if feedback.succeeded {
            self.aggression * 1.05
        } else {
            self.aggression * 0.95
        };
        let risk_taking = if feedback.health_ratio < 0.5 && !feedback.succeeded {
            self.risk_taking * 1.1
        } else {
            RISK_BASELINE + (self.risk_taking - RISK_BASELINE) * 0.95
        };

        Self {
            aggression: aggression.clamp(0.0, 1.0),
            risk_taking: risk_taking.clamp(0.0, 1.0),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WIN: RoundFeedback = RoundFeedback {
        succeeded: true,
        health_ratio: 1.0,
    };
    const LOSS_HURT: RoundFeedback = RoundFeedback {
        succeeded: false,
        health_ratio: 0.4,
    };

    mod validation_tests {
        use super::*;

        #[test]
        fn rejects_out_of_range_traits() {
            assert_eq!(
                Personality::new(0.5, 1.5, 0.5, 0.5),
                Err(PersonalityError::TraitOutOfRange {
                    name: "adaptability",
                    value: 1.5
                })
            );
            assert!(Personality::new(-0.1, 0.5, 0.5, 0.5).is_err());
            assert!(Personality::new(0.5, 0.5, f64::NAN, 0.5).is_err());
        }

        #[test]
        fn accepts_the_bounds() {
            assert!(Personality::new(0.0, 1.0, 0.0, 1.0).is_ok());
        }

        #[test]
        fn deserializes_with_defaults() {
            let p: Personality =
                serde_json::from_str(r#"{"aggression": 0.9, "preferred_moves": ["Force"]}"#)
                    .unwrap();
            assert!((p.aggression - 0.9).abs() < f64::EPSILON);
            assert!((p.calculation - 0.5).abs() < f64::EPSILON);
            assert_eq!(p.preferred_moves, vec![MoveType::Force]);
        }
    }

    mod adaptation_tests {
        use super::*;

        #[test]
        fn aggression_follows_success() {
            let p = Personality::default();
            assert!((p.adapted(WIN).aggression - 0.525).abs() < 1e-9);
            assert!((p.adapted(LOSS_HURT).aggression - 0.475).abs() < 1e-9);
        }

        #[test]
        fn aggression_caps_at_one() {
            let p = Personality::new(0.99, 0.5, 0.5, 0.5).unwrap();
            assert!((p.adapted(WIN).aggression - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn losing_while_hurt_raises_risk() {
            let p = Personality::new(0.5, 0.5, 0.6, 0.5).unwrap();
            assert!((p.adapted(LOSS_HURT).risk_taking - 0.66).abs() < 1e-9);
        }

        #[test]
        fn risk_regresses_toward_baseline() {
            let p = Personality::new(0.5, 0.5, 0.9, 0.5).unwrap();
            assert!((p.adapted(WIN).risk_taking - 0.88).abs() < 1e-9);

            let timid = Personality::new(0.5, 0.5, 0.1, 0.5).unwrap();
            assert!((timid.adapted(WIN).risk_taking - 0.12).abs() < 1e-9);
        }

        #[test]
        fn rigid_personality_never_changes() {
            let p = Personality::new(0.7, 0.29, 0.9, 0.5).unwrap();
            assert_eq!(p.adapted(WIN), p);
            assert_eq!(p.adapted(LOSS_HURT), p);
        }

        #[test]
        fn adaptation_leaves_the_original_untouched() {
            let p = Personality::default().with_preferred_moves([MoveType::Trick]);
            let next = p.adapted(WIN);
            assert!((p.aggression - 0.5).abs() < f64::EPSILON);
            assert_eq!(next.preferred_moves, p.preferred_moves);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_traits_stay_in_unit_range(
            aggression in 0.0f64..=1.0,
            risk in 0.0f64..=1.0,
            rounds in prop::collection::vec((any::<bool>(), 0.0f64..=1.0), 0..60),
        ) {
            let mut p = Personality::new(aggression, 1.0, risk, 0.5).unwrap();
            for (succeeded, health_ratio) in rounds {
                p = p.adapted(RoundFeedback { succeeded, health_ratio });
                prop_assert!(p.validate().is_ok());
            }
        }
    }
}
