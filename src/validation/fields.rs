use crate::core::error::FieldIssue;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Score at which a password is accepted for registration
pub const PASSWORD_PASS_SCORE: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid,
    /// Nothing to judge yet (e.g. an empty confirm field)
    Neutral,
}

/// Feedback for one form field, recomputed on every input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub state: FieldState,
    pub message: String,
    pub issue: Option<FieldIssue>,
}

impl ValidationResult {
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Valid,
            message: message.into(),
            issue: None,
        }
    }

    pub fn invalid(issue: FieldIssue) -> Self {
        Self {
            state: FieldState::Invalid,
            message: issue.to_string(),
            issue: Some(issue),
        }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Neutral,
            message: message.into(),
            issue: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state == FieldState::Valid
    }

    pub fn is_invalid(&self) -> bool {
        self.state == FieldState::Invalid
    }

    pub fn is_neutral(&self) -> bool {
        self.state == FieldState::Neutral
    }
}

pub fn validate_username(value: &str) -> ValidationResult {
    let len = value.chars().count();

    if len < USERNAME_MIN_LEN {
        return ValidationResult::invalid(FieldIssue::TooShort {
            min: USERNAME_MIN_LEN,
        });
    }

    if len > USERNAME_MAX_LEN {
        return ValidationResult::invalid(FieldIssue::TooLong {
            max: USERNAME_MAX_LEN,
        });
    }

    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return ValidationResult::invalid(FieldIssue::InvalidCharacters);
    }

    ValidationResult::valid("USERNAME OK")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLabel {
    Weak,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "WEAK",
            StrengthLabel::Good => "GOOD",
            StrengthLabel::Strong => "STRONG",
        }
    }
}

/// Password score and the four requirement flags behind it
///
/// Each satisfied rule adds 25. Note the two thresholds: a password passes at
/// 75 (three rules) but is only labelled STRONG at 100 (all four). A "GOOD"
/// password with a 75 score is therefore accepted. Both numbers are kept as
/// deployed clients show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub has_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
}

impl PasswordStrength {
    pub fn valid(&self) -> bool {
        self.score >= PASSWORD_PASS_SCORE
    }

    pub fn label(&self) -> StrengthLabel {
        match self.score {
            s if s < 50 => StrengthLabel::Weak,
            s if s < 100 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

pub fn validate_password(value: &str) -> PasswordStrength {
    let has_length = value.chars().count() >= PASSWORD_MIN_LEN;
    let has_uppercase = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    let score = [has_length, has_uppercase, has_lowercase, has_digit]
        .iter()
        .filter(|&&rule| rule)
        .count() as u8
        * 25;

    PasswordStrength {
        score,
        has_length,
        has_uppercase,
        has_lowercase,
        has_digit,
    }
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> ValidationResult {
    if confirm.is_empty() {
        return ValidationResult::neutral("");
    }

    if password != confirm {
        return ValidationResult::invalid(FieldIssue::PasswordMismatch);
    }

    ValidationResult::valid("PASSWORDS MATCH")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_allowed_charset_at_bounds() {
        let longest = "x".repeat(20);
        for name in ["abc", "a_1", "Player_One", longest.as_str(), "___", "123"] {
            let result = validate_username(name);
            assert!(result.is_valid(), "{} should be valid", name);
            assert_eq!(result.message, "USERNAME OK");
        }
    }

    #[test]
    fn test_username_too_short() {
        for name in ["", "a", "ab"] {
            let result = validate_username(name);
            assert!(result.is_invalid());
            assert_eq!(result.issue, Some(FieldIssue::TooShort { min: 3 }));
        }
    }

    #[test]
    fn test_username_too_long() {
        let result = validate_username(&"a".repeat(21));
        assert_eq!(result.issue, Some(FieldIssue::TooLong { max: 20 }));
        assert_eq!(result.message, "TOO LONG (MAX 20)");
    }

    #[test]
    fn test_username_invalid_characters() {
        for name in ["bob smith", "bob-1", "bób", "name!", " abc"] {
            let result = validate_username(name);
            assert_eq!(
                result.issue,
                Some(FieldIssue::InvalidCharacters),
                "{} should be rejected for its characters",
                name
            );
        }
    }

    #[test]
    fn test_username_length_checked_before_charset() {
        // Two characters, one of them invalid: the length rule wins
        let result = validate_username("a!");
        assert_eq!(result.issue, Some(FieldIssue::TooShort { min: 3 }));
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        // 20 multi-byte characters: too long is not reported, charset is
        let result = validate_username(&"é".repeat(20));
        assert_eq!(result.issue, Some(FieldIssue::InvalidCharacters));
    }

    #[test]
    fn test_password_all_rules() {
        let strength = validate_password("Aa1aaaaa");
        assert_eq!(strength.score, 100);
        assert!(strength.valid());
        assert_eq!(strength.label(), StrengthLabel::Strong);
    }

    #[test]
    fn test_password_length_and_lowercase() {
        // Lowercase letters count as their own rule
        let strength = validate_password("aaaaaaaa");
        assert_eq!(strength.score, 50);
        assert!(strength.has_length);
        assert!(!strength.has_uppercase);
        assert!(!strength.valid());
    }

    #[test]
    fn test_password_lowercase_only_short() {
        let strength = validate_password("aaaa");
        assert_eq!(strength.score, 25);
        assert!(strength.has_lowercase);
        assert!(!strength.has_length);
        assert!(!strength.valid());
        assert_eq!(strength.label(), StrengthLabel::Weak);
    }

    #[test]
    fn test_password_three_rules_passes_but_is_not_strong() {
        let strength = validate_password("aaaaaaa1");
        assert_eq!(strength.score, 75);
        assert!(strength.valid());
        assert_eq!(strength.label(), StrengthLabel::Good);
    }

    #[test]
    fn test_password_empty() {
        let strength = validate_password("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.label(), StrengthLabel::Weak);
    }

    #[test]
    fn test_confirm_password_states() {
        assert!(validate_confirm_password("x", "x").is_valid());

        let mismatch = validate_confirm_password("x", "y");
        assert!(mismatch.is_invalid());
        assert_eq!(mismatch.issue, Some(FieldIssue::PasswordMismatch));

        let empty = validate_confirm_password("x", "");
        assert!(empty.is_neutral());
        assert!(!empty.is_valid());
        assert!(!empty.is_invalid());
    }
}
