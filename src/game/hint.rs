//! Hint categories and their fixed penalties.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use super::riddle::RiddleContent;

/// A disclosure the player can buy with points.
///
/// Variants are declared in reveal order: a category can only be unlocked
/// once every category before it has been.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum HintCategory {
    /// Two or three leading actors.
    Cast,
    /// Release year.
    Year,
    /// Director's name.
    Director,
}

/// Maximum number of hints that can be unlocked in one round.
pub const MAX_HINTS: usize = HintCategory::COUNT;

impl HintCategory {
    /// Points subtracted from the round's reward when this hint is unlocked.
    pub fn penalty(self) -> i64 {
        match self {
            Self::Cast => 20,
            Self::Year => 30,
            Self::Director => 40,
        }
    }

    /// Position this hint occupies in the reveal order (zero-based).
    pub fn position(self) -> usize {
        self as usize
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cast => "Cast",
            Self::Year => "Year",
            Self::Director => "Director",
        }
    }

    /// Returns the category at `position` in the reveal order.
    pub fn at(position: usize) -> Option<Self> {
        Self::iter().nth(position)
    }

    /// Text disclosed by this hint for the given riddle.
    pub fn disclosure(self, riddle: &RiddleContent) -> String {
        match self {
            Self::Cast => riddle.cast().join(", "),
            Self::Year => riddle.year().clone(),
            Self::Director => riddle.director().clone(),
        }
    }
}

impl std::fmt::Display for HintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
