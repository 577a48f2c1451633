//! Score persistence and ranking.
//!
//! One board per difficulty tier, kept sorted by score (descending) with
//! session duration as the tie-breaker. Optionally backed by a JSON file so
//! boards survive restarts.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use chrono::{DateTime, Utc};
use prodle_engine::{Difficulty, SessionSummary, sanitize};
use serde::{Deserialize, Serialize};

pub const MAX_USERNAME_LEN: usize = 50;

/// Failures while recording or persisting scores.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LeaderboardError {
    /// The username is empty after sanitization or exceeds the length cap.
    #[display("invalid username")]
    InvalidUsername,
    /// The backing file could not be read or written.
    #[display("leaderboard file error: {source}")]
    Io { source: std::io::Error },
    /// The backing file holds malformed JSON.
    #[display("leaderboard format error: {source}")]
    Format { source: serde_json::Error },
}

/// One recorded game on a tier's board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    pub date: DateTime<Utc>,
    pub duration_secs: u64,
    pub guess_count: u32,
}

/// A board row prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedEntry {
    pub rank: usize,
    pub username: String,
    pub score: u32,
    pub duration: String,
    pub date: String,
}

type Boards = HashMap<Difficulty, Vec<LeaderboardEntry>>;

/// All tiers' boards behind one lock.
#[derive(Debug, Default)]
pub struct Leaderboard {
    boards: RwLock<Boards>,
    path: Option<PathBuf>,
}

impl Leaderboard {
    /// An in-memory board with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A board backed by a JSON file. Loads existing entries if the file
    /// exists; a missing file starts empty and is created on first write.
    pub fn with_file(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();
        let boards = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| LeaderboardError::Io { source })?;
            serde_json::from_str(&text).map_err(|source| LeaderboardError::Format { source })?
        } else {
            Boards::default()
        };
        Ok(Self {
            boards: RwLock::new(boards),
            path: Some(path),
        })
    }

    /// Records a finished session under `username` and returns the stored
    /// entry. The username is sanitized the same way guesses are.
    pub fn record_summary(
        &self,
        username: &str,
        summary: &SessionSummary,
    ) -> Result<LeaderboardEntry, LeaderboardError> {
        let username = sanitize(username);
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
            return Err(LeaderboardError::InvalidUsername);
        }
        let entry = LeaderboardEntry {
            username,
            score: summary.score,
            date: Utc::now(),
            duration_secs: summary.duration_secs,
            guess_count: summary.guess_count,
        };

        {
            let mut boards = self.write();
            let board = boards.entry(summary.difficulty).or_default();
            let at = board.partition_point(|e| {
                e.score > entry.score
                    || (e.score == entry.score && e.duration_secs <= entry.duration_secs)
            });
            board.insert(at, entry.clone());
            self.persist(&boards)?;
        }
        tracing::info!(
            username = %entry.username,
            difficulty = %summary.difficulty,
            score = entry.score,
            "recorded leaderboard entry"
        );
        Ok(entry)
    }

    /// The top `limit` entries for a tier, best first.
    #[must_use]
    pub fn top(&self, difficulty: Difficulty, limit: usize) -> Vec<LeaderboardEntry> {
        self.read()
            .get(&difficulty)
            .map(|board| board.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// The top `limit` entries with ranks and human-readable durations.
    #[must_use]
    pub fn formatted_top(&self, difficulty: Difficulty, limit: usize) -> Vec<FormattedEntry> {
        self.top(difficulty, limit)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| FormattedEntry {
                rank: index + 1,
                duration: format_duration(entry.duration_secs),
                date: entry.date.format("%Y-%m-%d").to_string(),
                username: entry.username,
                score: entry.score,
            })
            .collect()
    }

    /// The 1-based rank a result would place at on a tier's board. Ties on
    /// score are broken by duration, faster first.
    #[must_use]
    pub fn rank(&self, difficulty: Difficulty, score: u32, duration_secs: u64) -> usize {
        let boards = self.read();
        let better = boards
            .get(&difficulty)
            .map(|board| {
                board
                    .iter()
                    .filter(|e| {
                        e.score > score || (e.score == score && e.duration_secs < duration_secs)
                    })
                    .count()
            })
            .unwrap_or_default();
        better + 1
    }

    /// The user's best entry on a tier's board, if any.
    #[must_use]
    pub fn best_for_user(&self, difficulty: Difficulty, username: &str) -> Option<LeaderboardEntry> {
        let key = sanitize(username).to_lowercase();
        self.read()
            .get(&difficulty)?
            .iter()
            .find(|e| e.username.to_lowercase() == key)
            .cloned()
    }

    #[must_use]
    pub fn len(&self, difficulty: Difficulty) -> usize {
        self.read().get(&difficulty).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self, difficulty: Difficulty) -> bool {
        self.len(difficulty) == 0
    }

    fn persist(&self, boards: &Boards) -> Result<(), LeaderboardError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(boards)
            .map_err(|source| LeaderboardError::Format { source })?;
        fs::write(path, text).map_err(|source| LeaderboardError::Io { source })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Boards> {
        self.boards.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Boards> {
        self.boards.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Leaderboard {
    /// The backing file, if this board persists.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Formats a duration in seconds as `42s`, `3m07s` or `1h02m03s`.
#[must_use]
pub fn format_duration(secs: u64) -> String {
    let (hours, rest) = (secs / 3600, secs % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    if hours > 0 {
        format!("{hours}h{minutes:02}m{seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
