//! Scoring formulas.
//!
//! [`points_for_find`] is the authoritative per-target award fed into the
//! session's score accumulator. [`display_score_estimate`] is a display-only
//! estimator for front ends; it never feeds back into the accumulator.

/// Points for a target found instantly with no wrong guesses.
const MAX_TARGET_POINTS: f64 = 5000.0;
/// Share of the maximum that decays away linearly over the time budget.
const TIME_DECAY_FACTOR: f64 = 0.7;
/// Deduction per wrong guess against the current target.
const WRONG_GUESS_PENALTY: i64 = 100;
/// A found target never pays less than this.
const MIN_TARGET_POINTS: i64 = 300;

/// Awarded once at completion, only when every target was found.
pub const COMPLETION_BONUS: u32 = 10_000;

/// Points for finding the current target.
///
/// `elapsed_secs` is the total session elapsed time, not per-target time;
/// the decay saturates once the budget has fully elapsed.
#[must_use]
pub fn points_for_find(elapsed_secs: u64, wrong_guesses: u32, budget_secs: u32) -> u32 {
    let progress = if budget_secs == 0 {
        1.0
    } else {
        (elapsed_secs as f64 / f64::from(budget_secs)).min(1.0)
    };
    let base = (MAX_TARGET_POINTS * (1.0 - TIME_DECAY_FACTOR * progress)).floor() as i64;
    let points = base - WRONG_GUESS_PENALTY * i64::from(wrong_guesses);
    points.max(MIN_TARGET_POINTS) as u32
}

/// Rough running-score estimate for display while a session is in flight.
///
/// Monotonically decreasing in elapsed time and wrong guesses, increasing
/// in targets found, floored at zero. Need not match the authoritative
/// accumulator.
#[must_use]
pub fn display_score_estimate(elapsed_secs: u64, wrong_guesses: u32, targets_found: u32) -> u32 {
    const PER_TARGET_BASELINE: i64 = 3000;
    const TIME_PENALTY_PER_SEC: i64 = 10;
    const WRONG_GUESS_PENALTY: i64 = 50;

    let elapsed = i64::try_from(elapsed_secs).unwrap_or(i64::MAX);
    let estimate = i64::from(targets_found) * PER_TARGET_BASELINE
        - elapsed.saturating_mul(TIME_PENALTY_PER_SEC)
        - i64::from(wrong_guesses) * WRONG_GUESS_PENALTY;
    u32::try_from(estimate.max(0)).unwrap_or(u32::MAX)
}
