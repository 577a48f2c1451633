use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// Symbolic outcome of comparing one attribute of a guess with the target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[display("exact")]
    Exact,
    /// The guessed value is above the target's.
    #[display("higher")]
    Higher,
    /// The guessed value is below the target's.
    #[display("lower")]
    Lower,
    /// Close but not identical, e.g. same league or same continent.
    #[display("partial")]
    Partial,
    #[display("wrong")]
    Wrong,
}

/// Per-field verdicts for one guess, keyed by attribute name.
pub type FieldComparisons = BTreeMap<String, Verdict>;

/// Absolute tolerance for KDA ratio equality.
const KDA_TOLERANCE: f64 = 0.01;
/// Absolute tolerance for per-game average stat equality.
const AVG_STAT_TOLERANCE: f64 = 0.1;

/// Compares two candidates attribute by attribute.
///
/// Pure and deterministic. Note the two different directionality
/// conventions: a later birth year or
/// first split reads as `Lower` (the guess is younger / more recent), while
/// a numerically larger last-split rank reads as `Higher` (the guess placed
/// worse).
#[must_use]
pub fn compare(guessed: &Candidate, target: &Candidate) -> FieldComparisons {
    let mut fields = FieldComparisons::new();

    let team = if guessed.team == target.team {
        Verdict::Exact
    } else if guessed.league == target.league {
        // Same league, different team
        Verdict::Partial
    } else {
        Verdict::Wrong
    };
    fields.insert("team".to_owned(), team);

    fields.insert(
        "league".to_owned(),
        exact_or_wrong(&guessed.league, &target.league),
    );
    fields.insert(
        "role".to_owned(),
        exact_or_wrong(&guessed.role, &target.role),
    );

    let country = if guessed.nationality == target.nationality {
        Verdict::Exact
    } else if guessed.continent == target.continent {
        // Same continent, different country
        Verdict::Partial
    } else {
        Verdict::Wrong
    };
    fields.insert("country".to_owned(), country);

    fields.insert("age".to_owned(), ordered(guessed.age, target.age));
    fields.insert(
        "clubs".to_owned(),
        ordered(guessed.club_count(), target.club_count()),
    );
    fields.insert(
        "kda".to_owned(),
        ordered_f64(guessed.kda_ratio, target.kda_ratio, KDA_TOLERANCE),
    );
    fields.insert(
        "champion".to_owned(),
        exact_or_wrong(&guessed.most_played_champion, &target.most_played_champion),
    );
    fields.insert(
        "avg_kills".to_owned(),
        ordered_f64(guessed.avg_kills, target.avg_kills, AVG_STAT_TOLERANCE),
    );
    fields.insert(
        "avg_deaths".to_owned(),
        ordered_f64(guessed.avg_deaths, target.avg_deaths, AVG_STAT_TOLERANCE),
    );
    fields.insert(
        "avg_assists".to_owned(),
        ordered_f64(guessed.avg_assists, target.avg_assists, AVG_STAT_TOLERANCE),
    );

    // A later birth year means a younger player, so the raw comparison is
    // inverted.
    fields.insert(
        "birth_year".to_owned(),
        inverted(guessed.year_of_birth, target.year_of_birth),
    );
    // Rank keeps the raw direction: a numerically larger rank placed worse.
    fields.insert(
        "last_split_result".to_owned(),
        ordered(guessed.last_split_rank(), target.last_split_rank()),
    );
    // First split is year-like and inverted, same as birth year.
    fields.insert(
        "first_split".to_owned(),
        inverted(guessed.first_split_in_league, target.first_split_in_league),
    );

    fields
}

fn exact_or_wrong(guess: &str, target: &str) -> Verdict {
    if guess == target {
        Verdict::Exact
    } else {
        Verdict::Wrong
    }
}

fn ordered<T: Ord>(guess: T, target: T) -> Verdict {
    match guess.cmp(&target) {
        std::cmp::Ordering::Equal => Verdict::Exact,
        std::cmp::Ordering::Greater => Verdict::Higher,
        std::cmp::Ordering::Less => Verdict::Lower,
    }
}

fn ordered_f64(guess: f64, target: f64, tolerance: f64) -> Verdict {
    if (guess - target).abs() < tolerance {
        Verdict::Exact
    } else if guess > target {
        Verdict::Higher
    } else {
        Verdict::Lower
    }
}

fn inverted<T: Ord>(guess: T, target: T) -> Verdict {
    match guess.cmp(&target) {
        std::cmp::Ordering::Equal => Verdict::Exact,
        std::cmp::Ordering::Greater => Verdict::Lower,
        std::cmp::Ordering::Less => Verdict::Higher,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: id.to_owned(),
            real_name: String::new(),
            team: "G2 Esports".to_owned(),
            league: "LoL EMEA Championship".to_owned(),
            role: "Mid".to_owned(),
            nationality: "Denmark".to_owned(),
            continent: "Europe".to_owned(),
            year_of_birth: 1999,
            age: 27,
            teams_played: vec!["Fnatic".to_owned(), "G2 Esports".to_owned()],
            last_split_result: "1st".to_owned(),
            first_split_in_league: 2016,
            most_played_champion: "Azir".to_owned(),
            avg_kills: 4.2,
            avg_deaths: 2.1,
            avg_assists: 6.3,
            kda_ratio: 5.0,
        }
    }

    #[test]
    fn candidate_against_itself_is_exact_everywhere() {
        let caps = candidate("Caps");
        let fields = compare(&caps, &caps);
        for (field, verdict) in &fields {
            assert_eq!(*verdict, Verdict::Exact, "field {field} not exact");
        }
    }

    #[test]
    fn same_league_different_team_is_partial() {
        let guessed = candidate("Caps");
        let mut target = candidate("Humanoid");
        target.team = "Fnatic".to_owned();
        let fields = compare(&guessed, &target);
        assert_eq!(fields["team"], Verdict::Partial);
        assert_eq!(fields["league"], Verdict::Exact);
    }

    #[test]
    fn different_league_team_is_wrong() {
        let guessed = candidate("Caps");
        let mut target = candidate("Faker");
        target.team = "T1".to_owned();
        target.league = "LoL Champions Korea".to_owned();
        let fields = compare(&guessed, &target);
        assert_eq!(fields["team"], Verdict::Wrong);
        assert_eq!(fields["league"], Verdict::Wrong);
    }

    #[test]
    fn same_continent_different_country_is_partial() {
        let guessed = candidate("Caps");
        let mut target = candidate("Humanoid");
        target.nationality = "Czech Republic".to_owned();
        let fields = compare(&guessed, &target);
        assert_eq!(fields["country"], Verdict::Partial);
    }

    #[test]
    fn age_follows_raw_direction() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        guessed.age = 30;
        assert_eq!(compare(&guessed, &target)["age"], Verdict::Higher);
        guessed.age = 20;
        assert_eq!(compare(&guessed, &target)["age"], Verdict::Lower);
    }

    #[test]
    fn birth_year_direction_is_inverted() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        // Born later = younger = "lower" in age terms.
        guessed.year_of_birth = 2004;
        assert_eq!(compare(&guessed, &target)["birth_year"], Verdict::Lower);
        guessed.year_of_birth = 1995;
        assert_eq!(compare(&guessed, &target)["birth_year"], Verdict::Higher);
    }

    #[test]
    fn last_split_rank_keeps_raw_direction() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        // Guess placed worse (3rd vs 1st) reads as Higher.
        guessed.last_split_result = "3rd".to_owned();
        assert_eq!(
            compare(&guessed, &target)["last_split_result"],
            Verdict::Higher
        );
    }

    #[test]
    fn unranked_guess_reads_as_higher_than_any_ranked_target() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        guessed.last_split_result = String::new();
        assert_eq!(
            compare(&guessed, &target)["last_split_result"],
            Verdict::Higher
        );
    }

    #[test]
    fn first_split_direction_is_inverted() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        guessed.first_split_in_league = 2023;
        assert_eq!(compare(&guessed, &target)["first_split"], Verdict::Lower);
        guessed.first_split_in_league = 2013;
        assert_eq!(compare(&guessed, &target)["first_split"], Verdict::Higher);
    }

    #[test]
    fn kda_within_tolerance_is_exact() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        guessed.kda_ratio = 5.005;
        assert_eq!(compare(&guessed, &target)["kda"], Verdict::Exact);
        guessed.kda_ratio = 5.5;
        assert_eq!(compare(&guessed, &target)["kda"], Verdict::Higher);
    }

    #[test]
    fn avg_stats_use_wider_tolerance() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        guessed.avg_kills = 4.25;
        assert_eq!(compare(&guessed, &target)["avg_kills"], Verdict::Exact);
        guessed.avg_kills = 3.0;
        assert_eq!(compare(&guessed, &target)["avg_kills"], Verdict::Lower);
    }

    #[test]
    fn empty_champion_matches_empty_champion() {
        let mut guessed = candidate("Caps");
        let mut target = candidate("Humanoid");
        guessed.most_played_champion = String::new();
        target.most_played_champion = String::new();
        assert_eq!(compare(&guessed, &target)["champion"], Verdict::Exact);
    }

    #[test]
    fn clubs_compare_by_count() {
        let mut guessed = candidate("Caps");
        let target = candidate("Humanoid");
        guessed.teams_played.push("Team Heretics".to_owned());
        assert_eq!(compare(&guessed, &target)["clubs"], Verdict::Higher);
    }
}
