use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    GuessError,
    core::{
        candidate::Candidate,
        compare::{FieldComparisons, compare},
        difficulty::{Difficulty, is_eligible},
        input, scoring,
    },
};

use super::provider::RosterLookup;

/// Lifecycle state of a session. The transition is one-way: a completed
/// session accepts no further guesses and never scores again.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Active,
    Completed,
}

/// Outcome of one accepted guess attempt.
///
/// Immutable once created; discarded when the cursor advances to the next
/// target. The target copy is withheld from serialization so clients never
/// see the answer.
#[derive(Debug, Clone, Serialize)]
pub struct GuessResult {
    pub guessed: Candidate,
    #[serde(skip)]
    pub target: Candidate,
    pub timestamp: DateTime<Utc>,
    pub comparisons: FieldComparisons,
    pub correct: bool,
}

/// Final figures handed to the leaderboard sink when a session ends.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub duration_secs: u64,
    /// Accepted guesses across the whole session, every target included.
    pub guess_count: u32,
    pub targets_found: u32,
    pub roster_len: usize,
}

/// One game's state machine.
///
/// Tracks the cursor through a fixed roster of targets, the score
/// accumulator and the guesses against the current target. The whole
/// session shares a single wall-clock time budget; timeouts are detected
/// lazily on the next guess or status check, never by a timer.
#[derive(Debug, Clone)]
pub struct GameSession {
    session_id: String,
    difficulty: Difficulty,
    roster: Vec<Candidate>,
    current_index: usize,
    score: u32,
    start_time: DateTime<Utc>,
    time_budget_secs: u32,
    guesses: Vec<GuessResult>,
    total_guesses: u32,
    targets_skipped: u32,
    state: SessionState,
    completion_time: Option<DateTime<Utc>>,
}

impl GameSession {
    #[must_use]
    pub fn new(
        session_id: String,
        difficulty: Difficulty,
        roster: Vec<Candidate>,
        time_budget_secs: u32,
    ) -> Self {
        Self {
            session_id,
            difficulty,
            roster,
            current_index: 0,
            score: 0,
            start_time: Utc::now(),
            time_budget_secs,
            guesses: Vec::new(),
            total_guesses: 0,
            targets_skipped: 0,
            state: SessionState::Active,
            completion_time: None,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    /// Guesses against the current target only; cleared on every advance.
    #[must_use]
    pub fn guesses(&self) -> &[GuessResult] {
        &self.guesses
    }

    #[must_use]
    pub fn total_guesses(&self) -> u32 {
        self.total_guesses
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    #[must_use]
    pub fn completion_time(&self) -> Option<DateTime<Utc>> {
        self.completion_time
    }

    /// The target the cursor points at, if the roster is not exhausted.
    #[must_use]
    pub fn current_target(&self) -> Option<&Candidate> {
        self.roster.get(self.current_index)
    }

    #[must_use]
    pub fn targets_found(&self) -> u32 {
        u32::try_from(self.current_index).unwrap_or(u32::MAX) - self.targets_skipped
    }

    /// Total wall-clock seconds since the session started.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        let elapsed = (Utc::now() - self.start_time).num_seconds();
        u64::try_from(elapsed).unwrap_or(0)
    }

    /// Seconds left of the session-wide time budget.
    #[must_use]
    pub fn time_remaining(&self) -> u64 {
        u64::from(self.time_budget_secs).saturating_sub(self.elapsed_secs())
    }

    /// Whether the game should end: completed, budget elapsed, or roster
    /// exhausted.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_completed()
            || self.elapsed_secs() >= u64::from(self.time_budget_secs)
            || self.current_index >= self.roster.len()
    }

    /// Display-only running score estimate; does not feed the accumulator.
    #[must_use]
    pub fn score_estimate(&self) -> u32 {
        let wrong = u32::try_from(self.guesses.len()).unwrap_or(u32::MAX);
        scoring::display_score_estimate(self.elapsed_secs(), wrong, self.targets_found())
    }

    /// Validates and applies one guess.
    ///
    /// A rejected guess (any `Err`) leaves the session untouched. An
    /// accepted guess is recorded; a correct one scores and advances the
    /// cursor, and an incorrect one past the time budget forces the same
    /// advance without awarding points for the unresolved target.
    pub fn submit_guess(
        &mut self,
        roster: &(impl RosterLookup + ?Sized),
        raw_name: &str,
    ) -> Result<GuessResult, GuessError> {
        if self.state.is_completed() {
            return Err(GuessError::SessionTerminated);
        }

        let name = input::sanitize(raw_name);
        input::validate_guess(&name).map_err(|reason| GuessError::InvalidInput { reason })?;

        let guessed = roster
            .resolve(&name)
            .ok_or(GuessError::UnknownPlayer { name })?;
        if !is_eligible(&guessed, self.difficulty) {
            return Err(GuessError::NotInDifficulty {
                name: guessed.id,
                difficulty: self.difficulty,
            });
        }

        let Some(target) = self.current_target().cloned() else {
            return Err(GuessError::SessionTerminated);
        };

        let correct = guessed.id == target.id;
        let result = GuessResult {
            comparisons: compare(&guessed, &target),
            guessed,
            target,
            timestamp: Utc::now(),
            correct,
        };
        self.guesses.push(result.clone());
        self.total_guesses += 1;

        let elapsed = self.elapsed_secs();
        if correct {
            let wrong = u32::try_from(self.guesses.len().saturating_sub(1)).unwrap_or(u32::MAX);
            let points = scoring::points_for_find(elapsed, wrong, self.time_budget_secs);
            self.score += points;
            tracing::info!(
                session_id = %self.session_id,
                target = self.current_index,
                elapsed,
                wrong,
                points,
                total = self.score,
                "target found"
            );
            self.advance();
        } else if elapsed >= u64::from(self.time_budget_secs) {
            tracing::info!(
                session_id = %self.session_id,
                target = self.current_index,
                "time budget elapsed, skipping unresolved target"
            );
            self.targets_skipped += 1;
            self.advance();
        }

        Ok(result)
    }

    /// Ends the session early, e.g. when the client navigated away.
    /// Idempotent; runs the same completion transition as the internal
    /// paths.
    pub fn force_complete(&mut self) {
        self.complete();
    }

    /// Figures for the leaderboard sink.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let duration = self
            .completion_time
            .map_or_else(|| Utc::now() - self.start_time, |t| t - self.start_time);
        SessionSummary {
            session_id: self.session_id.clone(),
            difficulty: self.difficulty,
            score: self.score,
            duration_secs: u64::try_from(duration.num_seconds()).unwrap_or(0),
            guess_count: self.total_guesses,
            targets_found: self.targets_found(),
            roster_len: self.roster.len(),
        }
    }

    fn advance(&mut self) {
        self.current_index += 1;
        self.guesses.clear();
        if self.current_index >= self.roster.len() {
            self.complete();
        }
    }

    fn complete(&mut self) {
        if self.state.is_completed() {
            return;
        }
        self.state = SessionState::Completed;
        self.completion_time = Some(Utc::now());
        // The bonus condition is re-checked here rather than read off the
        // completed flag: every target found, none skipped.
        if self.current_index >= self.roster.len() && self.targets_skipped == 0 {
            self.score += scoring::COMPLETION_BONUS;
            tracing::info!(
                session_id = %self.session_id,
                total = self.score,
                "all targets found, completion bonus awarded"
            );
        }
        tracing::info!(
            session_id = %self.session_id,
            found = self.targets_found(),
            skipped = self.targets_skipped,
            roster = self.roster.len(),
            score = self.score,
            "session completed"
        );
    }

    /// Shifts the start time into the past so tests can simulate elapsed
    /// time without sleeping.
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, secs: i64) {
        self.start_time -= chrono::TimeDelta::seconds(secs);
    }
}
