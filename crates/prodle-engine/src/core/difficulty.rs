use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// League names as they appear in the roster dataset.
pub mod league {
    pub const LEC: &str = "LoL EMEA Championship";
    pub const LFL: &str = "La Ligue Française";
    pub const LCK: &str = "LoL Champions Korea";
    pub const LPL: &str = "Tencent LoL Pro League";
    pub const LTAN: &str = "League of Legends Championship of The Americas North";
    pub const LCP: &str = "League of Legends Championship Pacific";
}

/// Difficulty tier of a game session.
///
/// Each tier is defined by a data table of per-league inclusion rules (see
/// [`Difficulty::rules`]), so new tiers or leagues are added without
/// touching the engine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[default]
    #[display("hard")]
    Hard,
}

/// Inclusion rule for one league within a tier: either every player of the
/// league, or only those whose parsed last-split rank is at most `max_rank`.
#[derive(Debug, Clone, Copy)]
pub struct LeagueRule {
    pub league: &'static str,
    pub max_rank: Option<u32>,
}

const fn all_of(league: &'static str) -> LeagueRule {
    LeagueRule {
        league,
        max_rank: None,
    }
}

const fn top_of(league: &'static str, max_rank: u32) -> LeagueRule {
    LeagueRule {
        league,
        max_rank: Some(max_rank),
    }
}

const EASY_RULES: &[LeagueRule] = &[
    all_of(league::LEC),
    top_of(league::LFL, 5),
    top_of(league::LCK, 5),
];

const MEDIUM_RULES: &[LeagueRule] = &[
    all_of(league::LEC),
    all_of(league::LFL),
    all_of(league::LCK),
    top_of(league::LPL, 6),
];

const HARD_RULES: &[LeagueRule] = &[
    top_of(league::LTAN, 4),
    all_of(league::LCK),
    top_of(league::LPL, 10),
    all_of(league::LEC),
    all_of(league::LFL),
    top_of(league::LCP, 3),
];

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The tier's inclusion table.
    #[must_use]
    pub fn rules(self) -> &'static [LeagueRule] {
        match self {
            Difficulty::Easy => EASY_RULES,
            Difficulty::Medium => MEDIUM_RULES,
            Difficulty::Hard => HARD_RULES,
        }
    }

    /// Human-readable summary of the tier's pool.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "LEC, Top 5 LFL, Top 5 LCK",
            Difficulty::Medium => "LEC, LFL, LCK, Top 6 LPL",
            Difficulty::Hard => "Top 4 LTAN, LCK, Top 10 LPL, LEC, LFL, Top 3 LCP",
        }
    }
}

/// Whether a candidate belongs to the given tier's pool.
///
/// Consistent with [`filter_roster`]: filtering is exactly the set of
/// candidates for which this predicate holds.
#[must_use]
pub fn is_eligible(candidate: &Candidate, difficulty: Difficulty) -> bool {
    let rank = candidate.last_split_rank();
    difficulty
        .rules()
        .iter()
        .any(|rule| rule.league == candidate.league && rule.max_rank.is_none_or(|max| rank <= max))
}

/// Partitions the full roster into the tier's candidate pool.
#[must_use]
pub fn filter_roster(candidates: &[Candidate], difficulty: Difficulty) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|candidate| is_eligible(candidate, difficulty))
        .cloned()
        .collect()
}
