use rand::TryRngCore as _;
use serde::Serialize;

use crate::{
    CreateSessionError, GuessError,
    core::{candidate::Candidate, difficulty::Difficulty},
};

use super::{
    provider::RosterProvider,
    session::{GameSession, GuessResult, SessionSummary},
    session_store::{SessionStore, SharedSession, StoreStats, lock_session},
};

/// Static game parameters, echoed verbatim to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    /// Wall-clock budget for a whole session, in seconds.
    pub time_budget_secs: u32,
    /// Targets drawn into each session's roster.
    pub roster_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 120,
            roster_size: 20,
        }
    }
}

/// Everything a transport needs to render one guess response.
#[derive(Debug, Clone, Serialize)]
pub struct GuessOutcome {
    pub result: GuessResult,
    pub correct: bool,
    pub score: u32,
    pub time_remaining: u64,
    pub game_over: bool,
    /// Whether the cursor moved on (correct guess or timeout skip).
    pub advanced: bool,
}

/// Result of ending a session, revealing the unresolved target if any.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEnd {
    pub summary: SessionSummary,
    pub missed_target: Option<Candidate>,
}

/// Façade over the session store and the injected roster collaborator.
///
/// Constructed once at process start; every public operation maps 1:1 onto
/// the transport boundary without this type knowing about JSON or HTTP.
#[derive(Debug)]
pub struct GameService<R> {
    roster: R,
    store: SessionStore,
    config: GameConfig,
}

impl<R: RosterProvider> GameService<R> {
    #[must_use]
    pub fn new(roster: R, config: GameConfig) -> Self {
        Self {
            roster,
            store: SessionStore::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn roster(&self) -> &R {
        &self.roster
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Draws a fresh roster for the tier, registers the session and returns
    /// the shared handle.
    pub fn create_session(
        &self,
        difficulty: Difficulty,
    ) -> Result<SharedSession, CreateSessionError> {
        let roster = self.roster.sample(difficulty, self.config.roster_size);
        if roster.is_empty() {
            return Err(CreateSessionError::DataUnavailable { difficulty });
        }
        let session_id = generate_session_id()?;
        let session = GameSession::new(
            session_id,
            difficulty,
            roster,
            self.config.time_budget_secs,
        );
        tracing::info!(
            session_id = %session.session_id(),
            %difficulty,
            targets = session.roster_len(),
            "created session"
        );
        Ok(self.store.insert(session))
    }

    #[must_use]
    pub fn session(&self, session_id: &str) -> Option<SharedSession> {
        self.store.get(session_id)
    }

    /// Runs one guess through the session state machine and writes the
    /// mutated session back before returning.
    pub fn submit_guess(
        &self,
        session_id: &str,
        raw_name: &str,
    ) -> Result<GuessOutcome, GuessError> {
        let shared = self
            .store
            .get(session_id)
            .ok_or(GuessError::SessionNotFound)?;
        let mut session = lock_session(&shared);

        let index_before = session.current_index();
        let result = session.submit_guess(&self.roster, raw_name)?;
        Ok(GuessOutcome {
            correct: result.correct,
            score: session.score(),
            time_remaining: session.time_remaining(),
            game_over: session.is_over(),
            advanced: session.current_index() > index_before,
            result,
        })
    }

    /// Ends a session (idempotently) and reveals the missed target so the
    /// front end can show it.
    pub fn end_session(&self, session_id: &str) -> Result<SessionEnd, GuessError> {
        let shared = self
            .store
            .get(session_id)
            .ok_or(GuessError::SessionNotFound)?;
        let mut session = lock_session(&shared);
        session.force_complete();
        Ok(SessionEnd {
            missed_target: session.current_target().cloned(),
            summary: session.summary(),
        })
    }

    #[must_use]
    pub fn session_stats(&self) -> StoreStats {
        self.store.stats()
    }
}

/// 16 bytes from the OS entropy source, hex-encoded.
fn generate_session_id() -> Result<String, CreateSessionError> {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| CreateSessionError::GenerationError)?;
    Ok(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::difficulty::{filter_roster, league},
        engine::provider::RosterLookup,
    };

    struct FixedRoster(Vec<Candidate>);

    impl RosterLookup for FixedRoster {
        fn resolve(&self, name: &str) -> Option<Candidate> {
            let key = name.to_lowercase();
            self.0
                .iter()
                .find(|c| c.id.to_lowercase() == key)
                .cloned()
        }
    }

    impl RosterProvider for FixedRoster {
        fn sample(&self, difficulty: Difficulty, count: usize) -> Vec<Candidate> {
            let mut pool = filter_roster(&self.0, difficulty);
            pool.truncate(count);
            pool
        }
    }

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: id.to_owned(),
            real_name: String::new(),
            team: format!("{id} team"),
            league: league::LEC.to_owned(),
            role: "Mid".to_owned(),
            nationality: "France".to_owned(),
            continent: "Europe".to_owned(),
            year_of_birth: 2000,
            age: 26,
            teams_played: vec![format!("{id} team")],
            last_split_result: "1st".to_owned(),
            first_split_in_league: 2020,
            most_played_champion: String::new(),
            avg_kills: 0.0,
            avg_deaths: 0.0,
            avg_assists: 0.0,
            kda_ratio: 0.0,
        }
    }

    fn service(count: usize) -> GameService<FixedRoster> {
        let pool = (0..count)
            .map(|i| candidate(&format!("player-{i}")))
            .collect();
        GameService::new(FixedRoster(pool), GameConfig::default())
    }

    #[test]
    fn create_session_registers_a_hex_id() {
        let service = service(20);
        let shared = service.create_session(Difficulty::Hard).unwrap();
        let session = lock_session(&shared);

        assert_eq!(session.session_id().len(), 32);
        assert!(session.session_id().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(session.roster_len(), 20);
        assert!(service.session(session.session_id()).is_some());
    }

    #[test]
    fn create_session_with_empty_pool_fails() {
        let service = service(0);
        let err = service.create_session(Difficulty::Easy).unwrap_err();
        assert_eq!(
            err,
            CreateSessionError::DataUnavailable {
                difficulty: Difficulty::Easy
            }
        );
    }

    #[test]
    fn small_pool_yields_a_shorter_roster() {
        let service = service(3);
        let shared = service.create_session(Difficulty::Hard).unwrap();
        assert_eq!(lock_session(&shared).roster_len(), 3);
    }

    #[test]
    fn guess_on_unknown_session_is_not_found() {
        let service = service(5);
        let err = service.submit_guess("deadbeef", "player-0").unwrap_err();
        assert_eq!(err, GuessError::SessionNotFound);
    }

    #[test]
    fn outcome_reports_advancement_and_score() {
        let service = service(5);
        let shared = service.create_session(Difficulty::Hard).unwrap();
        let (session_id, target_id) = {
            let session = lock_session(&shared);
            (
                session.session_id().to_owned(),
                session.current_target().unwrap().id.clone(),
            )
        };

        let wrong = service
            .submit_guess(&session_id, "player-4")
            .or_else(|_| service.submit_guess(&session_id, "player-3"))
            .unwrap();
        assert!(!wrong.advanced || wrong.correct);

        let outcome = service.submit_guess(&session_id, &target_id).unwrap();
        assert!(outcome.correct);
        assert!(outcome.advanced);
        assert!(outcome.score >= 4900);
        assert!(!outcome.game_over);
    }

    #[test]
    fn end_session_reveals_missed_target_and_is_idempotent() {
        let service = service(5);
        let shared = service.create_session(Difficulty::Hard).unwrap();
        let session_id = lock_session(&shared).session_id().to_owned();

        let end = service.end_session(&session_id).unwrap();
        assert!(end.missed_target.is_some());
        assert_eq!(end.summary.targets_found, 0);

        let again = service.end_session(&session_id).unwrap();
        assert_eq!(again.summary.score, end.summary.score);
    }

    #[test]
    fn session_stats_counts_completions() {
        let service = service(5);
        let shared = service.create_session(Difficulty::Hard).unwrap();
        let session_id = lock_session(&shared).session_id().to_owned();
        service.create_session(Difficulty::Hard).unwrap();

        service.end_session(&session_id).unwrap();
        let stats = service.session_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
    }
}
