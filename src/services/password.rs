//! Password strength scoring for the registration form.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0..=1 => StrengthLabel::Weak,
            2 => StrengthLabel::Fair,
            3 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PasswordStrength {
    /// 0-5, one point per satisfied rule
    pub score: u8,
    pub label: StrengthLabel,
}

/// Score a password: one point each for length, lowercase, uppercase, digit
/// and symbol.
pub fn score(password: &str) -> PasswordStrength {
    let rules = [
        password.chars().count() >= MIN_LENGTH,
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
    ];
    let score = rules.iter().filter(|&&ok| ok).count() as u8;

    PasswordStrength {
        score,
        label: StrengthLabel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores() {
        assert_eq!(score("").score, 0);
        assert_eq!(score("").label, StrengthLabel::Weak);
        assert_eq!(score("abc").score, 1);
        assert_eq!(score("abcdefgh").label, StrengthLabel::Fair);
        assert_eq!(score("abcdefgH").label, StrengthLabel::Good);
        assert_eq!(score("abcdefH1").score, 4);
        assert_eq!(score("abcdefH1!").score, 5);
        assert_eq!(score("abcdefH1!").label, StrengthLabel::Strong);
    }

    #[test]
    fn test_spaces_are_not_symbols() {
        assert_eq!(score("a b").score, 1);
    }
}
