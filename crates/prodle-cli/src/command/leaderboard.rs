use std::path::PathBuf;

use anyhow::Context;
use prodle_engine::Difficulty;
use prodle_leaderboard::Leaderboard;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LeaderboardArg {
    /// Leaderboard file
    #[arg(long, default_value = "data/leaderboard.json")]
    file: PathBuf,
    /// Difficulty tier to show
    #[arg(long, default_value = "hard")]
    difficulty: Difficulty,
    /// Number of entries to show
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

pub(crate) fn run(arg: &LeaderboardArg) -> anyhow::Result<()> {
    let board = Leaderboard::with_file(&arg.file)
        .with_context(|| format!("failed to open leaderboard at {}", arg.file.display()))?;

    let rows = board.formatted_top(arg.difficulty, arg.limit);
    if rows.is_empty() {
        println!("No entries yet for the {} tier.", arg.difficulty);
        return Ok(());
    }

    println!("Top {} on the {} tier:", rows.len(), arg.difficulty);
    for row in rows {
        println!(
            "{:3}. {:20} {:6} pts  {:>8}  {}",
            row.rank, row.username, row.score, row.duration, row.date
        );
    }
    Ok(())
}
