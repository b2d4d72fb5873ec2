//! Encounter configuration loaded from JSON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use riposte_ai::Personality;
use riposte_core::{
    CombatMove, Combatant, CombatantId, CombatantKind, Domain, MoveLibrary, Resource,
    ResolverConfig, SceneTag, SessionConfig, Stance,
};
use serde::{Deserialize, Serialize};

/// One side of the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantSpec {
    pub name: String,
    pub ratings: BTreeMap<Domain, i32>,
    pub health: u32,
    pub stamina: u32,
    pub focus: u32,
    pub spirit: u32,
    pub weak_domains: Vec<Domain>,
    pub strong_domains: Vec<Domain>,
    pub stance: Stance,
}

impl Default for CombatantSpec {
    fn default() -> Self {
        Self {
            name: "Combatant".to_string(),
            ratings: BTreeMap::new(),
            health: 100,
            stamina: 100,
            focus: 100,
            spirit: 100,
            weak_domains: Vec::new(),
            strong_domains: Vec::new(),
            stance: Stance::default(),
        }
    }
}

impl CombatantSpec {
    fn rated(name: &str, ratings: [i32; 7]) -> Self {
        Self {
            name: name.to_string(),
            ratings: Domain::ALL.into_iter().zip(ratings).collect(),
            ..Self::default()
        }
    }

    /// Builds a fresh combatant with full pools.
    pub fn build(&self, id: CombatantId, kind: CombatantKind) -> Combatant {
        Combatant::new(id, self.name.clone(), self.ratings.clone())
            .with_kind(kind)
            .with_max(Resource::Health, self.health)
            .with_max(Resource::Stamina, self.stamina)
            .with_max(Resource::Focus, self.focus)
            .with_max(Resource::Spirit, self.spirit)
            .with_weak_domains(self.weak_domains.iter().copied())
            .with_strong_domains(self.strong_domains.iter().copied())
            .with_stance(self.stance)
    }
}

/// Everything needed to replay an encounter from a seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub player: CombatantSpec,
    pub opponent: CombatantSpec,
    pub personality: Personality,
    pub scene: Vec<SceneTag>,
    /// Player moves, played in rotation; unaffordable ones are skipped
    pub player_moves: Vec<String>,
    /// Moves the adaptive opponent may choose from
    pub opponent_moves: Vec<String>,
    /// Moves added to the standard library, replacing same-named ones
    pub custom_moves: Vec<CombatMove>,
    pub seed: u64,
    pub session: SessionConfig,
    pub resolver: ResolverConfig,
}

impl Default for EncounterConfig {
    /// Hero against an aggressive Bandit in the dark.
    fn default() -> Self {
        let mut bandit = CombatantSpec::rated("Bandit", [3, 1, 1, 2, 1, 2, 1]);
        bandit.weak_domains = vec![Domain::Mind];
        let mut hero = CombatantSpec::rated("Hero", [3, 2, 2, 3, 1, 1, 2]);
        hero.strong_domains = vec![Domain::Awareness];

        Self {
            player: hero,
            opponent: bandit,
            personality: Personality {
                aggression: 0.7,
                adaptability: 0.5,
                risk_taking: 0.6,
                calculation: 0.3,
                specialization: vec![Domain::Body],
                preferred_moves: Vec::new(),
            },
            scene: vec![SceneTag::Darkness],
            player_moves: names(&[
                "Hammer Blow",
                "Feinting Strike",
                "Analytical Defense",
                "Shadow Step",
                "Spiritual Insight",
            ]),
            opponent_moves: names(&[
                "Hammer Blow",
                "Raging Strike",
                "Shadow Step",
                "Analytical Defense",
                "Intimidating Roar",
                "Unnerving Glare",
            ]),
            custom_moves: Vec::new(),
            seed: 42,
            session: SessionConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|&name| name.to_string()).collect()
}

impl EncounterConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading encounter config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing encounter config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the personality is in range, every custom move has a
    /// domain and every named move exists.
    pub fn validate(&self) -> Result<()> {
        self.personality
            .validate()
            .context("invalid opponent personality")?;
        if self.player_moves.is_empty() {
            bail!("player_moves must name at least one move");
        }
        if let Some(combat_move) = self.custom_moves.iter().find(|m| m.domains.is_empty()) {
            bail!("custom move {:?} must name at least one domain", combat_move.name);
        }
        self.player_rotation()?;
        self.opponent_kit()?;
        Ok(())
    }

    /// The standard library with the custom moves layered on top.
    pub fn library(&self) -> MoveLibrary {
        let mut library = MoveLibrary::standard();
        for combat_move in &self.custom_moves {
            library.insert(combat_move.clone());
        }
        library
    }

    /// Player moves in rotation order.
    pub fn player_rotation(&self) -> Result<Vec<CombatMove>> {
        lookup(&self.library(), &self.player_moves).context("resolving player_moves")
    }

    /// Moves available to the opponent.
    pub fn opponent_kit(&self) -> Result<Vec<CombatMove>> {
        lookup(&self.library(), &self.opponent_moves).context("resolving opponent_moves")
    }
}

fn lookup(library: &MoveLibrary, names: &[String]) -> Result<Vec<CombatMove>> {
    names
        .iter()
        .map(|name| {
            library
                .get(name)
                .cloned()
                .with_context(|| format!("unknown move {name:?}"))
        })
        .collect()
}
