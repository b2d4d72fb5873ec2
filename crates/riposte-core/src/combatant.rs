//! Combatants and their resource pools.
//!
//! This module provides the mutable per-encounter state of one fighter:
//! - [`CombatantId`]: session-unique identifier (names may collide)
//! - [`ResourcePool`]: a current/max pair that never leaves `[0, max]`
//! - [`Momentum`]: a small bonus clamped to `[0, 3]`
//! - [`Combatant`]: ratings, pools, statuses, consequences and momentum
//!
//! All fields are private; every mutation goes through a method that keeps the
//! pool and momentum invariants.
//!
//! # Example
//!
//! ```
//! use riposte_core::combatant::{Combatant, CombatantId};
//! use riposte_core::domain::Domain;
//!
//! let mut hero = Combatant::new(CombatantId::new(0), "Hero", [(Domain::Body, 3)]);
//! let report = hero.apply_damage(60);
//!
//! assert_eq!(hero.health().current(), 40);
//! assert!(report.crossed_half);
//! assert_eq!(hero.base_rating(Domain::Spirit), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::consequence::Consequence;
use crate::domain::Domain;
use crate::moves::MoveCost;
use crate::stance::Stance;
use crate::status::{EnhancedStatus, Stat, Status, StatusFlags};

/// Default maximum for every pool.
pub const DEFAULT_POOL_MAX: u32 = 100;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a combatant within one session.
///
/// Names are for display only; two sessions (or two sides of one session)
/// may use the same name without sharing any state.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(u64);

impl CombatantId {
    /// Creates a new `CombatantId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CombatantId({})", self.0)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CombatantId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Role of a combatant in the encounter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CombatantKind {
    /// Player-controlled
    Player,
    /// Neutral character
    Npc,
    /// Hostile character
    #[default]
    Enemy,
    /// Friendly character
    Ally,
    /// Doors, traps and other things that can be fought
    Object,
}

// =============================================================================
// Resources
// =============================================================================

/// One of the four pools a combatant draws on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Damage taken comes out of health
    Health,
    /// Paid by physical moves
    Stamina,
    /// Paid by mental moves
    Focus,
    /// Paid by spiritual moves
    Spirit,
}

impl Resource {
    /// All pools in declaration order.
    pub const ALL: [Resource; 4] = [
        Resource::Health,
        Resource::Stamina,
        Resource::Focus,
        Resource::Spirit,
    ];
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Stamina => write!(f, "stamina"),
            Self::Focus => write!(f, "focus"),
            Self::Spirit => write!(f, "spirit"),
        }
    }
}

/// A current/max pair with `current` always in `[0, max]`.
///
/// Deserializing clamps `current` to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPool")]
pub struct ResourcePool {
    current: u32,
    max: u32,
}

impl ResourcePool {
    /// A full pool.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// A pool at the given level, clamped to `max`.
    #[must_use]
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Current level.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum level.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// `current / max`, or 0 for a zero-capacity pool.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }

    /// Removes up to `amount`; returns how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Adds up to `amount` without exceeding `max`; returns how much was added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.max - self.current);
        self.current += added;
        added
    }

    /// Shifts `max` by `delta` (never below 1) and clamps `current`.
    ///
    /// Returns the delta actually applied.
    pub fn adjust_max(&mut self, delta: i32) -> i32 {
        let old = i64::from(self.max);
        let new = (old + i64::from(delta)).clamp(1, i64::from(u32::MAX));
        self.max = u32::try_from(new).unwrap_or(u32::MAX);
        self.current = self.current.min(self.max);
        i32::try_from(new - old).unwrap_or(delta)
    }
}

#[derive(Deserialize)]
struct RawPool {
    current: u32,
    max: u32,
}

impl From<RawPool> for ResourcePool {
    fn from(raw: RawPool) -> Self {
        Self::new(raw.current, raw.max)
    }
}

/// The first pool found short when checking a move's cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    /// Pool that is short
    pub resource: Resource,
    /// Cost in that pool
    pub required: u32,
    /// Current level of that pool
    pub available: u32,
}

// =============================================================================
// Momentum
// =============================================================================

/// Per-combatant momentum, always in `[0, Momentum::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Momentum(u8);

impl Momentum {
    /// Upper bound.
    pub const MAX: u8 = 3;

    /// Creates momentum, clamped to the valid range.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Current value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// +1, clamped.
    pub fn gain(&mut self) {
        self.shift(1);
    }

    /// -1, clamped.
    pub fn lose(&mut self) {
        self.shift(-1);
    }

    /// Adds `delta`, clamped to `[0, MAX]`.
    pub fn shift(&mut self, delta: i32) {
        let shifted = (i32::from(self.0) + delta).clamp(0, i32::from(Self::MAX));
        self.0 = u8::try_from(shifted).unwrap_or(Self::MAX);
    }
}

// =============================================================================
// Active effects
// =============================================================================

/// An enhanced status currently affecting a combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStatus {
    status: EnhancedStatus,
    remaining: u32,
    /// Pool-maximum deltas actually applied, reverted on expiry.
    applied: Vec<(Resource, i32)>,
}

impl ActiveStatus {
    /// The full status record.
    #[must_use]
    pub fn status(&self) -> &EnhancedStatus {
        &self.status
    }

    /// Rounds left before expiry.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Outcome of [`Combatant::apply_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    /// Health actually removed
    pub dealt: u32,
    /// Health left
    pub remaining: u32,
    /// `true` only the first time health drops below half this encounter
    pub crossed_half: bool,
}

/// Effects that ran out during [`Combatant::tick_statuses`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upkeep {
    /// Names of expired statuses
    pub expired_statuses: Vec<String>,
    /// Descriptions of expired consequences
    pub expired_consequences: Vec<String>,
}

// =============================================================================
// Combatant
// =============================================================================

/// One side of an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    kind: CombatantKind,
    ratings: BTreeMap<Domain, i32>,
    health: ResourcePool,
    stamina: ResourcePool,
    focus: ResourcePool,
    spirit: ResourcePool,
    statuses: StatusFlags,
    active_statuses: Vec<ActiveStatus>,
    consequences: Vec<Consequence>,
    weak_domains: Vec<Domain>,
    strong_domains: Vec<Domain>,
    momentum: Momentum,
    #[serde(default)]
    stance: Stance,
    /// Set once health first drops below half.
    bloodied: bool,
}

impl Combatant {
    /// Creates a combatant with full 100-point pools.
    ///
    /// Domains missing from `ratings` rate 0.
    #[must_use]
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        ratings: impl IntoIterator<Item = (Domain, i32)>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CombatantKind::default(),
            ratings: ratings.into_iter().collect(),
            health: ResourcePool::full(DEFAULT_POOL_MAX),
            stamina: ResourcePool::full(DEFAULT_POOL_MAX),
            focus: ResourcePool::full(DEFAULT_POOL_MAX),
            spirit: ResourcePool::full(DEFAULT_POOL_MAX),
            statuses: StatusFlags::empty(),
            active_statuses: Vec::new(),
            consequences: Vec::new(),
            weak_domains: Vec::new(),
            strong_domains: Vec::new(),
            momentum: Momentum::default(),
            stance: Stance::default(),
            bloodied: false,
        }
    }

    /// Sets the role.
    #[must_use]
    pub fn with_kind(mut self, kind: CombatantKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replaces one pool with a full pool of the given size.
    #[must_use]
    pub fn with_max(mut self, resource: Resource, max: u32) -> Self {
        *self.pool_mut(resource) = ResourcePool::full(max);
        self
    }

    /// Sets the current level of one pool (clamped to its max).
    #[must_use]
    pub fn with_current(mut self, resource: Resource, current: u32) -> Self {
        let pool = self.pool_mut(resource);
        *pool = ResourcePool::new(current, pool.max());
        self
    }

    /// Domains this combatant is vulnerable to.
    #[must_use]
    pub fn with_weak_domains(mut self, domains: impl IntoIterator<Item = Domain>) -> Self {
        self.weak_domains = domains.into_iter().collect();
        self
    }

    /// Domains this combatant excels in.
    #[must_use]
    pub fn with_strong_domains(mut self, domains: impl IntoIterator<Item = Domain>) -> Self {
        self.strong_domains = domains.into_iter().collect();
        self
    }

    /// Starting momentum.
    #[must_use]
    pub fn with_momentum(mut self, momentum: u8) -> Self {
        self.momentum = Momentum::new(momentum);
        self
    }

    /// Starting stance.
    #[must_use]
    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = stance;
        self
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// Session-unique id.
    #[must_use]
    pub fn id(&self) -> CombatantId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role in the encounter.
    #[must_use]
    pub fn kind(&self) -> CombatantKind {
        self.kind
    }

    // -------------------------------------------------------------------------
    // Pools
    // -------------------------------------------------------------------------

    /// Health pool.
    #[must_use]
    pub fn health(&self) -> &ResourcePool {
        &self.health
    }

    /// Stamina pool.
    #[must_use]
    pub fn stamina(&self) -> &ResourcePool {
        &self.stamina
    }

    /// Focus pool.
    #[must_use]
    pub fn focus(&self) -> &ResourcePool {
        &self.focus
    }

    /// Spirit pool.
    #[must_use]
    pub fn spirit(&self) -> &ResourcePool {
        &self.spirit
    }

    /// Any pool by name.
    #[must_use]
    pub fn pool(&self, resource: Resource) -> &ResourcePool {
        match resource {
            Resource::Health => &self.health,
            Resource::Stamina => &self.stamina,
            Resource::Focus => &self.focus,
            Resource::Spirit => &self.spirit,
        }
    }

    fn pool_mut(&mut self, resource: Resource) -> &mut ResourcePool {
        match resource {
            Resource::Health => &mut self.health,
            Resource::Stamina => &mut self.stamina,
            Resource::Focus => &mut self.focus,
            Resource::Spirit => &mut self.spirit,
        }
    }

    /// `current / max` health.
    #[must_use]
    pub fn health_ratio(&self) -> f64 {
        self.health.ratio()
    }

    /// Returns `true` once health reaches 0.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health.current() == 0
    }

    /// Current stance.
    #[must_use]
    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Changes stance; takes effect from the next round.
    pub fn set_stance(&mut self, stance: Stance) {
        self.stance = stance;
    }

    /// `cost` as scaled by the current stance.
    #[must_use]
    pub fn effective_cost(&self, cost: &MoveCost) -> MoveCost {
        self.stance.effect().scale(cost)
    }

    /// The first pool that cannot cover `cost` after stance scaling, if any.
    #[must_use]
    pub fn shortfall(&self, cost: &MoveCost) -> Option<Shortfall> {
        let cost = self.effective_cost(cost);
        [
            (Resource::Stamina, cost.stamina),
            (Resource::Focus, cost.focus),
            (Resource::Spirit, cost.spirit),
        ]
        .into_iter()
        .find_map(|(resource, required)| {
            let available = self.pool(resource).current();
            (required > available).then_some(Shortfall {
                resource,
                required,
                available,
            })
        })
    }

    /// Returns `true` if every pool covers `cost` after stance scaling.
    #[must_use]
    pub fn can_afford(&self, cost: &MoveCost) -> bool {
        self.shortfall(cost).is_none()
    }

    /// Deducts `cost` after stance scaling. Callers check
    /// [`Combatant::can_afford`] first.
    pub(crate) fn pay(&mut self, cost: &MoveCost) {
        let cost = self.effective_cost(cost);
        self.stamina.drain(cost.stamina);
        self.focus.drain(cost.focus);
        self.spirit.drain(cost.spirit);
    }

    /// Removes health and reports whether the half-health mark was crossed
    /// for the first time this encounter.
    pub fn apply_damage(&mut self, amount: u32) -> DamageReport {
        let dealt = self.health.drain(amount);
        let below_half = u64::from(self.health.current()) * 2 < u64::from(self.health.max());
        let crossed_half = below_half && !self.bloodied;
        if crossed_half {
            self.bloodied = true;
        }
        DamageReport {
            dealt,
            remaining: self.health.current(),
            crossed_half,
        }
    }

    /// Restores health up to max; returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health.restore(amount)
    }

    /// Restores stamina by `base` plus the stamina-regen modifiers of active
    /// statuses and consequences, floored at 0. Returns the amount restored.
    pub fn regenerate(&mut self, base: u32) -> u32 {
        let amount = i64::from(base) + i64::from(self.stamina_regen_modifier());
        let amount = u32::try_from(amount.max(0)).unwrap_or(u32::MAX);
        self.stamina.restore(amount)
    }

    // -------------------------------------------------------------------------
    // Ratings
    // -------------------------------------------------------------------------

    /// Unmodified rating; 0 for a domain with no entry.
    #[must_use]
    pub fn base_rating(&self, domain: Domain) -> i32 {
        self.ratings.get(&domain).copied().unwrap_or(0)
    }

    /// Sum of active status modifiers for a domain.
    #[must_use]
    pub fn status_domain_modifier(&self, domain: Domain) -> i32 {
        self.active_statuses
            .iter()
            .map(|active| active.status.domain_modifier(domain))
            .sum()
    }

    /// Base rating plus status modifiers, floored at 0.
    #[must_use]
    pub fn effective_rating(&self, domain: Domain) -> i32 {
        (self.base_rating(domain) + self.status_domain_modifier(domain)).max(0)
    }

    /// Highest effective rating among `domains`; 0 if empty.
    #[must_use]
    pub fn best_rating(&self, domains: &[Domain]) -> i32 {
        domains
            .iter()
            .map(|d| self.effective_rating(*d))
            .max()
            .unwrap_or(0)
    }

    /// Domains this combatant is vulnerable to.
    #[must_use]
    pub fn weak_domains(&self) -> &[Domain] {
        &self.weak_domains
    }

    /// Domains this combatant excels in.
    #[must_use]
    pub fn strong_domains(&self) -> &[Domain] {
        &self.strong_domains
    }

    /// Returns `true` if listed weak against `domain`.
    #[must_use]
    pub fn is_weak_to(&self, domain: Domain) -> bool {
        self.weak_domains.contains(&domain)
    }

    /// Returns `true` if listed strong in `domain`.
    #[must_use]
    pub fn is_strong_in(&self, domain: Domain) -> bool {
        self.strong_domains.contains(&domain)
    }

    // -------------------------------------------------------------------------
    // Momentum
    // -------------------------------------------------------------------------

    /// Current momentum.
    #[must_use]
    pub fn momentum(&self) -> Momentum {
        self.momentum
    }

    pub(crate) fn momentum_mut(&mut self) -> &mut Momentum {
        &mut self.momentum
    }

    // -------------------------------------------------------------------------
    // Statuses
    // -------------------------------------------------------------------------

    /// Coarse status tags.
    #[must_use]
    pub fn statuses(&self) -> StatusFlags {
        self.statuses
    }

    /// Returns `true` if the coarse tag for `status` is set.
    #[must_use]
    pub fn has_status(&self, status: Status) -> bool {
        self.statuses.contains(status.flag())
    }

    /// Active enhanced statuses, oldest first.
    #[must_use]
    pub fn active_statuses(&self) -> &[ActiveStatus] {
        &self.active_statuses
    }

    /// Adds the tag, records the status and applies its pool modifiers.
    ///
    /// A status of a kind already active replaces the existing record when
    /// its tier is at least as high; otherwise the existing record's duration
    /// is refreshed. Modifiers of the same kind never stack.
    pub fn apply_status(&mut self, status: EnhancedStatus) {
        self.statuses.insert(status.base.flag());

        if let Some(index) = self
            .active_statuses
            .iter()
            .position(|active| active.status.base == status.base)
        {
            if status.tier < self.active_statuses[index].status.tier {
                let existing = &mut self.active_statuses[index];
                existing.remaining = existing.remaining.max(status.duration);
                return;
            }
            let replaced = self.active_statuses.remove(index);
            self.revert(&replaced.applied);
        }

        let applied = status
            .stat_modifiers
            .iter()
            .filter_map(|(stat, delta)| stat.pool().map(|pool| (pool, *delta)))
            .map(|(pool, delta)| (pool, self.pool_mut(pool).adjust_max(delta)))
            .collect();

        self.active_statuses.push(ActiveStatus {
            remaining: status.duration,
            status,
            applied,
        });
    }

    fn revert(&mut self, applied: &[(Resource, i32)]) {
        for (pool, delta) in applied {
            self.pool_mut(*pool).adjust_max(-delta);
        }
    }

    // -------------------------------------------------------------------------
    // Consequences
    // -------------------------------------------------------------------------

    /// Lasting consequences, in the order they were suffered.
    #[must_use]
    pub fn consequences(&self) -> &[Consequence] {
        &self.consequences
    }

    /// Records a consequence and applies its pool-maximum modifiers.
    ///
    /// These modifiers are persistent and are not reverted when a timed
    /// consequence expires.
    pub fn add_consequence(&mut self, consequence: Consequence) {
        for (stat, delta) in &consequence.stat_modifiers {
            if let Some(pool) = stat.pool() {
                self.pool_mut(pool).adjust_max(*delta);
            }
        }
        self.consequences.push(consequence);
    }

    /// Net stamina-regen modifier from statuses and consequences.
    #[must_use]
    pub fn stamina_regen_modifier(&self) -> i32 {
        let from_statuses: i32 = self
            .active_statuses
            .iter()
            .map(|active| active.status.stat_modifier(Stat::StaminaRegen))
            .sum();
        let from_consequences: i32 = self
            .consequences
            .iter()
            .map(|c| c.stat_modifier(Stat::StaminaRegen))
            .sum();
        from_statuses + from_consequences
    }

    /// Advances every status and timed consequence by one round.
    ///
    /// Expired statuses revert their pool modifiers and, once no record of a
    /// kind remains, clear its coarse tag. Permanent consequences never expire.
    pub fn tick_statuses(&mut self) -> Upkeep {
        let mut upkeep = Upkeep::default();

        let mut expired = Vec::new();
        self.active_statuses.retain_mut(|active| {
            active.remaining = active.remaining.saturating_sub(1);
            if active.remaining == 0 {
                expired.push(active.clone());
                false
            } else {
                true
            }
        });
        for active in expired {
            self.revert(&active.applied);
            let still_held = self
                .active_statuses
                .iter()
                .any(|a| a.status.base == active.status.base);
            if !still_held {
                self.statuses.remove(active.status.base.flag());
            }
            upkeep.expired_statuses.push(active.status.name);
        }

        self.consequences.retain_mut(|consequence| {
            if consequence.tick() {
                true
            } else {
                upkeep
                    .expired_consequences
                    .push(consequence.description.clone());
                false
            }
        });

        upkeep
    }
}
