//! Roster dataset: loading, indexing and tier pools.
//!
//! The dataset is loaded once at startup from a JSON file and is read-only
//! afterwards. [`Roster`] implements the engine's lookup and sampling seams
//! so it can be handed to `GameService` directly.

use std::{collections::HashMap, fs, path::Path};

use chrono::{Datelike as _, Utc};
use prodle_engine::{
    Candidate, Difficulty, RosterLookup, RosterProvider, filter_roster, is_eligible,
};
use rand::seq::SliceRandom as _;
use serde::Serialize;

/// Queries shorter than this are treated as "browse", not "search".
const MIN_QUERY_LEN: usize = 2;

/// Failures while loading the roster dataset.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    /// The dataset file could not be read.
    #[display("failed to read roster file: {source}")]
    Io { source: std::io::Error },
    /// The dataset file is not valid roster JSON.
    #[display("failed to parse roster file: {source}")]
    Parse { source: serde_json::Error },
}

/// Per-tier pool summary for display surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct DifficultyInfo {
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub pool_size: usize,
}

/// The full player dataset with a case-insensitive name index.
#[derive(Debug, Clone)]
pub struct Roster {
    candidates: Vec<Candidate>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    /// Loads the dataset from a JSON file and derives each player's age
    /// from their birth year.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RosterError::Io { source })?;
        let mut candidates: Vec<Candidate> =
            serde_json::from_str(&text).map_err(|source| RosterError::Parse { source })?;
        let current_year = Utc::now().year();
        for candidate in &mut candidates {
            candidate.derive_age(current_year);
        }
        let roster = Self::from_candidates(candidates);
        tracing::info!(players = roster.len(), path = %path.display(), "loaded roster");
        Ok(roster)
    }

    /// Builds a roster from an in-memory candidate list.
    #[must_use]
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let mut by_name = HashMap::new();
        for (index, candidate) in candidates.iter().enumerate() {
            by_name.insert(candidate.id.to_lowercase(), index);
            if !candidate.real_name.is_empty() {
                by_name.entry(candidate.real_name.to_lowercase()).or_insert(index);
            }
        }
        Self {
            candidates,
            by_name,
        }
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// All in-game names, sorted case-insensitively.
    #[must_use]
    pub fn player_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.candidates.iter().map(|c| c.id.clone()).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    /// Distinct team names, sorted.
    #[must_use]
    pub fn teams(&self) -> Vec<String> {
        distinct(self.candidates.iter().map(|c| c.team.as_str()))
    }

    /// Distinct league names, sorted.
    #[must_use]
    pub fn leagues(&self) -> Vec<String> {
        distinct(self.candidates.iter().map(|c| c.league.as_str()))
    }

    /// Distinct role names, sorted.
    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        distinct(self.candidates.iter().map(|c| c.role.as_str()))
    }

    /// The candidate pool for one tier.
    #[must_use]
    pub fn tier_pool(&self, difficulty: Difficulty) -> Vec<Candidate> {
        filter_roster(&self.candidates, difficulty)
    }

    /// Pool summaries for every tier, in ascending difficulty order.
    #[must_use]
    pub fn difficulty_info(&self) -> Vec<DifficultyInfo> {
        Difficulty::ALL
            .iter()
            .map(|&difficulty| DifficultyInfo {
                difficulty,
                description: difficulty.description(),
                pool_size: self.tier_pool(difficulty).len(),
            })
            .collect()
    }

    /// In-game names matching `query` within the tier's pool, capped at
    /// `limit`. A query below the minimum length browses the pool from the
    /// top instead of matching.
    #[must_use]
    pub fn autocomplete(&self, query: &str, difficulty: Difficulty, limit: usize) -> Vec<String> {
        let query = query.trim().to_lowercase();
        let eligible = self
            .candidates
            .iter()
            .filter(|candidate| is_eligible(candidate, difficulty));
        if query.chars().count() < MIN_QUERY_LEN {
            return eligible.take(limit).map(|c| c.id.clone()).collect();
        }
        eligible
            .filter(|candidate| {
                candidate.id.to_lowercase().contains(&query)
                    || candidate.real_name.to_lowercase().contains(&query)
            })
            .take(limit)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Draws up to `count` candidates from the tier's pool using the given
    /// generator. Deterministic for a seeded generator.
    #[must_use]
    pub fn sample_with_rng<R: rand::Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        count: usize,
        rng: &mut R,
    ) -> Vec<Candidate> {
        let mut pool = self.tier_pool(difficulty);
        pool.shuffle(rng);
        pool.truncate(count);
        pool
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut values: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    values.sort();
    values.dedup();
    values
}

impl RosterLookup for Roster {
    fn resolve(&self, name: &str) -> Option<Candidate> {
        let key = name.trim().to_lowercase();
        let hit = self
            .by_name
            .get(&key)
            .map(|&index| self.candidates[index].clone());
        if hit.is_none() {
            tracing::debug!(name, "player name did not resolve");
        }
        hit
    }
}

impl RosterProvider for Roster {
    fn sample(&self, difficulty: Difficulty, count: usize) -> Vec<Candidate> {
        self.sample_with_rng(difficulty, count, &mut rand::rng())
    }
}
