use std::path::PathBuf;

use anyhow::Context;
use prodle_roster::Roster;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RosterArg {
    /// Roster dataset file
    #[arg(long, default_value = "data/prodle.json")]
    roster: PathBuf,
}

pub(crate) fn run(arg: &RosterArg) -> anyhow::Result<()> {
    let roster = Roster::load(&arg.roster)
        .with_context(|| format!("failed to load roster from {}", arg.roster.display()))?;

    println!(
        "{} players across {} leagues ({} roles).\n",
        roster.len(),
        roster.leagues().len(),
        roster.roles().len()
    );
    for info in roster.difficulty_info() {
        println!(
            "{:8} {:4} players  {}",
            info.difficulty.to_string(),
            info.pool_size,
            info.description
        );
    }
    Ok(())
}
