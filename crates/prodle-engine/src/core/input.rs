//! Guess text sanitization and validation.

/// Characters stripped from raw input before validation.
const DISALLOWED: [char; 5] = ['<', '>', '"', '\'', '&'];

pub const MIN_GUESS_LEN: usize = 2;
pub const MAX_GUESS_LEN: usize = 50;

/// Why a guess string was rejected by [`validate_guess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("player name cannot be empty")]
    Empty,
    #[display("player name must be at least 2 characters long")]
    TooShort,
    #[display("player name is too long")]
    TooLong,
}

/// Strips disallowed characters and surrounding whitespace.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !DISALLOWED.contains(c))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Checks the length bounds on an already-sanitized guess.
pub fn validate_guess(guess: &str) -> Result<(), InputError> {
    let trimmed = guess.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let len = trimmed.chars().count();
    if len < MIN_GUESS_LEN {
        return Err(InputError::TooShort);
    }
    if len > MAX_GUESS_LEN {
        return Err(InputError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_markup_and_whitespace() {
        let cleaned = sanitize("  <script>alert('x')</script>  ");
        assert_eq!(cleaned, "scriptalert(x)/script");
        assert!(validate_guess(&cleaned).is_ok());
    }

    #[test]
    fn sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize(" Caps "), "Caps");
        assert_eq!(sanitize("Hans Sama"), "Hans Sama");
    }

    #[test]
    fn empty_after_sanitize_is_rejected() {
        let cleaned = sanitize("  <>&\"'  ");
        assert_eq!(validate_guess(&cleaned), Err(InputError::Empty));
    }

    #[test]
    fn single_character_is_too_short() {
        assert_eq!(validate_guess("x"), Err(InputError::TooShort));
    }

    #[test]
    fn length_bound_applies_to_cleaned_string() {
        let long = "a".repeat(51);
        assert_eq!(validate_guess(&long), Err(InputError::TooLong));
        let max = "a".repeat(50);
        assert!(validate_guess(&max).is_ok());
    }
}
