//! Roster lookup: resolves combatant identifiers to species and builds their
//! action pools from a move catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RosterError;
use crate::sample::{pick_one, sample_without_replacement};
use crate::{Action, Rolls};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub moves: Vec<String>,
}

/// Move table entry; status moves carry no power and some moves never miss
/// (no accuracy). Neither kind is usable in a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveEntry {
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
}

impl MoveEntry {
    fn to_action(self, name: &str) -> Option<Action> {
        match (self.power, self.accuracy) {
            (Some(power), Some(accuracy)) if power > 0 && (1..=100).contains(&accuracy) => {
                Some(Action::new(name, power, accuracy))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRules {
    /// Candidate move names drawn before filtering.
    pub sample: usize,
    /// Fewer usable moves than this is an error.
    pub min_valid: usize,
}

impl Default for PoolRules {
    fn default() -> Self {
        Self { sample: 40, min_valid: 5 }
    }
}

pub trait RosterProvider {
    /// Resolve a name (case-insensitive) or numeric id.
    fn fetch_combatant(&self, query: &str) -> Result<Species, RosterError>;

    /// Sample candidate moves and keep the ones with both power and accuracy.
    fn fetch_action_pool(
        &self,
        species: &Species,
        rules: &PoolRules,
        rng: &mut dyn Rolls,
    ) -> Result<Vec<Action>, RosterError>;

    fn species_ids(&self) -> Vec<u32>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub species: Vec<Species>,
    #[serde(default)]
    pub moves: IndexMap<String, MoveEntry>,
}

impl Catalog {
    pub fn from_json_str(text: &str) -> Result<Self, RosterError> {
        let catalog: Catalog = serde_json::from_str(text)?;
        if catalog.species.is_empty() {
            return Err(RosterError::EmptyCatalog);
        }
        Ok(catalog)
    }

    pub fn builtin() -> Result<Self, RosterError> {
        Self::from_json_str(crate::content::BUILTIN_CATALOG)
    }

    /// Every move of `species` that passes the power/accuracy filter, in list order.
    pub fn usable_moves(&self, species: &Species) -> Vec<Action> {
        species
            .moves
            .iter()
            .filter_map(|name| self.moves.get(name).and_then(|m| m.to_action(name)))
            .collect()
    }
}

impl RosterProvider for Catalog {
    fn fetch_combatant(&self, query: &str) -> Result<Species, RosterError> {
        let key = query.trim().to_lowercase();
        let found = match key.parse::<u32>() {
            Ok(id) => self.species.iter().find(|s| s.id == id),
            Err(_) => self.species.iter().find(|s| s.name.eq_ignore_ascii_case(&key)),
        };
        found.cloned().ok_or_else(|| RosterError::NotFound(query.trim().to_string()))
    }

    fn fetch_action_pool(
        &self,
        species: &Species,
        rules: &PoolRules,
        rng: &mut dyn Rolls,
    ) -> Result<Vec<Action>, RosterError> {
        let candidates = sample_without_replacement(&species.moves, rules.sample, rng);
        let mut pool = Vec::with_capacity(candidates.len());
        for name in &candidates {
            match self.moves.get(name) {
                Some(entry) => pool.extend(entry.to_action(name)),
                None => warn!(species = %species.name, %name, "move missing from catalog"),
            }
        }
        debug!(species = %species.name, sampled = candidates.len(), usable = pool.len(), "action pool");
        if pool.len() < rules.min_valid {
            return Err(RosterError::InsufficientActions {
                combatant: species.name.clone(),
                found: pool.len(),
                required: rules.min_valid,
            });
        }
        Ok(pool)
    }

    fn species_ids(&self) -> Vec<u32> {
        self.species.iter().map(|s| s.id).collect()
    }
}

/// Uniform pick among the provider's species with an id in `1..=max_id`.
pub fn random_species(
    provider: &dyn RosterProvider,
    max_id: u32,
    rng: &mut dyn Rolls,
) -> Result<Species, RosterError> {
    let ids: Vec<u32> = provider
        .species_ids()
        .into_iter()
        .filter(|id| (1..=max_id).contains(id))
        .collect();
    let id = pick_one(&ids, rng).ok_or(RosterError::EmptyCatalog)?;
    provider.fetch_combatant(&id.to_string())
}
