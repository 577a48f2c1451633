use crate::core::{candidate::Candidate, difficulty::Difficulty};

/// Name resolution against the roster dataset.
///
/// Matching is case-insensitive on the primary id or the real name.
/// Candidates are returned by value: the dataset is immutable and sessions
/// keep their own copies.
pub trait RosterLookup {
    fn resolve(&self, name: &str) -> Option<Candidate>;
}

/// Full roster collaborator needed to create sessions.
pub trait RosterProvider: RosterLookup {
    /// Draws up to `count` candidates from the tier's pool, uniformly and
    /// without replacement. Returns fewer when the pool is smaller, empty
    /// when the pool is empty.
    fn sample(&self, difficulty: Difficulty, count: usize) -> Vec<Candidate>;
}
