use serde::{Deserialize, Serialize};

/// Rank used when a ranking string is empty or contains no digits.
///
/// Behaves as "worst possible rank" so that rank-threshold rules naturally
/// exclude unranked candidates.
pub const RANK_SENTINEL: u32 = 999;

/// One profile from the professional player roster.
///
/// Loaded once at startup and read-only thereafter; sessions hold copies
/// with value semantics, so no per-session mutation is observable to other
/// sessions. The per-game statistics (`avg_*`, `kda_ratio`) and
/// `most_played_champion` are optional in the dataset and default to
/// zero/empty when no statistics feed exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique in-game name, the primary identity key.
    pub id: String,
    /// Real name, used as a secondary lookup key when present.
    #[serde(default)]
    pub real_name: String,
    pub team: String,
    pub league: String,
    pub role: String,
    pub nationality: String,
    pub continent: String,
    #[serde(default)]
    pub year_of_birth: u32,
    /// Derived from `year_of_birth` at data-load time, not stored in the
    /// dataset.
    #[serde(default)]
    pub age: u32,
    /// Every team the player has been on; the comparison engine reads the
    /// count.
    #[serde(default)]
    pub teams_played: Vec<String>,
    /// Free-text placement in the last split, e.g. "3rd" or "#5".
    #[serde(default)]
    pub last_split_result: String,
    /// Year of the player's first split in their current league.
    #[serde(default)]
    pub first_split_in_league: u32,
    #[serde(default)]
    pub most_played_champion: String,
    #[serde(default)]
    pub avg_kills: f64,
    #[serde(default)]
    pub avg_deaths: f64,
    #[serde(default)]
    pub avg_assists: f64,
    #[serde(default)]
    pub kda_ratio: f64,
}

impl Candidate {
    /// Number of teams the player has been on.
    #[must_use]
    pub fn club_count(&self) -> usize {
        self.teams_played.len()
    }

    /// Last split placement as a numeric rank (lower = better placement).
    #[must_use]
    pub fn last_split_rank(&self) -> u32 {
        parse_rank(&self.last_split_result)
    }

    /// Fills in `age` from the birth year. Called by the roster loader.
    pub fn derive_age(&mut self, current_year: i32) {
        if self.year_of_birth > 0 {
            let year_of_birth = i32::try_from(self.year_of_birth).unwrap_or(i32::MAX);
            self.age = current_year.saturating_sub(year_of_birth).max(0) as u32;
        }
    }
}

/// Converts a free-text ranking into a numeric rank.
///
/// Keeps all digits in their original order and parses the concatenation,
/// so "3rd", "#3" and "3" all yield 3. Returns [`RANK_SENTINEL`] when the
/// text contains no digits at all.
#[must_use]
pub fn parse_rank(text: &str) -> u32 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return RANK_SENTINEL;
    }
    digits.parse().unwrap_or(u32::MAX)
}
