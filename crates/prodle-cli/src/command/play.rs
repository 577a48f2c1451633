use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;
use prodle_engine::{Difficulty, GameConfig, GameService, GuessError, lock_session};
use prodle_leaderboard::{Leaderboard, format_duration};
use prodle_roster::Roster;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Difficulty tier to play
    #[arg(long, default_value = "hard")]
    difficulty: Difficulty,
    /// Roster dataset file
    #[arg(long, default_value = "data/prodle.json")]
    roster: PathBuf,
    /// Leaderboard file; scores are not recorded without one
    #[arg(long)]
    leaderboard: Option<PathBuf>,
    /// Session time budget in seconds
    #[arg(long)]
    time_budget: Option<u32>,
    /// Number of targets per session
    #[arg(long)]
    roster_size: Option<usize>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            roster: PathBuf::from("data/prodle.json"),
            leaderboard: None,
            time_budget: None,
            roster_size: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let roster = Roster::load(&arg.roster)
        .with_context(|| format!("failed to load roster from {}", arg.roster.display()))?;

    let defaults = GameConfig::default();
    let config = GameConfig {
        time_budget_secs: arg.time_budget.unwrap_or(defaults.time_budget_secs),
        roster_size: arg.roster_size.unwrap_or(defaults.roster_size),
    };
    let service = GameService::new(roster, config);

    let shared = service
        .create_session(arg.difficulty)
        .context("failed to create a game session")?;
    let session_id = lock_session(&shared).session_id().to_owned();

    println!(
        "Guess the pro player! Tier: {}, {} targets, {}s on the clock.",
        arg.difficulty, config.roster_size, config.time_budget_secs
    );
    println!("Type a player name, '?prefix' for suggestions, or 'quit' to give up.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        {
            let session = lock_session(&shared);
            if session.is_over() {
                break;
            }
            print!(
                "[target {}/{} | {}s left | ~{} pts] guess> ",
                session.current_index() + 1,
                session.roster_len(),
                session.time_remaining(),
                session.score_estimate()
            );
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        if let Some(query) = input.strip_prefix('?') {
            let suggestions = service.roster().autocomplete(query, arg.difficulty, 10);
            if suggestions.is_empty() {
                println!("No matching players.\n");
            } else {
                println!("{}\n", suggestions.join(", "));
            }
            continue;
        }

        match service.submit_guess(&session_id, input) {
            Ok(outcome) => {
                for (field, verdict) in &outcome.result.comparisons {
                    println!("  {field:18} {verdict}");
                }
                if outcome.correct {
                    println!(
                        "Correct! {} found. Score: {}\n",
                        outcome.result.guessed.id, outcome.score
                    );
                } else if outcome.advanced {
                    println!("Time ran out on that target, moving on.\n");
                } else {
                    println!("Not {}. Try again.\n", outcome.result.guessed.id);
                }
                if outcome.game_over {
                    break;
                }
            }
            Err(GuessError::SessionTerminated) => break,
            Err(err) => println!("{err}\n"),
        }
    }

    let end = service
        .end_session(&session_id)
        .context("failed to end the game session")?;
    println!("\nGame over!");
    if let Some(missed) = &end.missed_target {
        println!(
            "The player you missed was {} ({}, {}).",
            missed.id, missed.team, missed.league
        );
    }
    println!(
        "Found {}/{} targets in {} with {} guesses. Final score: {}",
        end.summary.targets_found,
        end.summary.roster_len,
        format_duration(end.summary.duration_secs),
        end.summary.guess_count,
        end.summary.score
    );

    if let Some(path) = &arg.leaderboard {
        let board = Leaderboard::with_file(path)
            .with_context(|| format!("failed to open leaderboard at {}", path.display()))?;
        print!("Enter a name for the leaderboard (blank to skip): ");
        io::stdout().flush()?;
        if let Some(line) = lines.next() {
            let username = line?;
            if !username.trim().is_empty() {
                let entry = board
                    .record_summary(&username, &end.summary)
                    .context("failed to record the score")?;
                let rank = board.rank(arg.difficulty, entry.score, entry.duration_secs);
                println!("Recorded {} pts for {} (rank #{rank}).", entry.score, entry.username);
            }
        }
    }

    Ok(())
}
