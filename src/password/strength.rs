use strum::Display;

use crate::config::{PASSWORD_GOOD_LENGTH, PASSWORD_MIN_LENGTH};

const COMMON_PATTERNS: &[&str] = &["123", "456", "789", "abc", "qwerty", "password", "admin"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum StrengthLevel {
    #[strum(to_string = "Very Weak")]
    VeryWeak,
    #[strum(to_string = "Weak")]
    Weak,
    #[strum(to_string = "Moderate")]
    Moderate,
    #[strum(to_string = "Strong")]
    Strong,
    #[strum(to_string = "Very Strong")]
    VeryStrong,
}

impl StrengthLevel {
    fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::VeryStrong,
            60..=79 => Self::Strong,
            40..=59 => Self::Moderate,
            20..=39 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }

    /// Hex color hint for rendering.
    pub fn color(self) -> &'static str {
        match self {
            Self::VeryStrong => "#2E7D32",
            Self::Strong => "#4CAF50",
            Self::Moderate => "#FFA726",
            Self::Weak => "#F44336",
            Self::VeryWeak => "#B71C1C",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::VeryStrong => "Very strong password",
            Self::Strong => "Strong password",
            Self::Moderate => "Moderate password",
            Self::Weak => "Weak password",
            Self::VeryWeak => "Very weak password",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordStrengthReport {
    /// `0..=100`.
    pub score: u8,
    /// Findings in evaluation order; the last entry names the level.
    pub feedback: Vec<String>,
    pub level: StrengthLevel,
    pub color: &'static str,
}

/// Scores a password with a fixed set of heuristics.
///
/// Length earns up to 20 points and each character class (upper, lower,
/// digit, other) 10 more. Runs of three identical characters, single-class
/// letter or digit passwords and well-known sequences each cost 10.
pub fn evaluate_password_strength(password: &str) -> PasswordStrengthReport {
    let mut feedback = Vec::new();
    let mut score: i32 = 0;
    let length = password.chars().count();

    if length < PASSWORD_MIN_LENGTH {
        feedback.push("Password is too short".to_owned());
    } else if length >= PASSWORD_GOOD_LENGTH {
        score += 20;
        feedback.push("Good length".to_owned());
    }

    let classes = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    score += 10 * classes.iter().filter(|&&present| present).count() as i32;

    if has_triple_run(password) {
        score -= 10;
        feedback.push("Avoid repeated characters".to_owned());
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_alphabetic()) {
        score -= 10;
        feedback.push("Add numbers and symbols".to_owned());
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        score -= 10;
        feedback.push("Add letters and symbols".to_owned());
    }

    let lowered = password.to_lowercase();
    if COMMON_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
        score -= 10;
        feedback.push("Avoid common patterns".to_owned());
    }

    let score = u8::try_from(score.clamp(0, 100)).unwrap_or_default();
    let level = StrengthLevel::from_score(score);
    feedback.push(level.summary().to_owned());

    PasswordStrengthReport { score, feedback, level, color: level.color() }
}

fn has_triple_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}
