//! Classification of raw player input.

/// A non-empty, trimmed player submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    /// A single ASCII letter or digit, uppercased.
    Letter(char),
    /// Any other input, treated as an attempt at the whole title.
    Title(String),
}

impl Guess {
    /// Classifies raw input. Returns `None` if it is empty after trimming.
    ///
    /// Input is a letter guess iff the trimmed text is exactly one character
    /// and that character is ASCII alphanumeric. Single punctuation marks and
    /// non-ASCII letters are title attempts.
    pub fn classify(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => {
                Some(Self::Letter(c.to_ascii_uppercase()))
            }
            _ => Some(Self::Title(trimmed.to_uppercase())),
        }
    }
}
