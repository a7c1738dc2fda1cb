//! Movie riddle game rules.

mod guess;
mod hint;
mod riddle;
mod round;
mod session;

pub use guess::Guess;
pub use hint::{HintCategory, MAX_HINTS};
pub use riddle::{Difficulty, MASK_CHAR, RiddleContent};
pub(crate) use riddle::ReleaseYear;
pub use round::{Feedback, FeedbackKind, RoundState, RoundStatus};
pub use session::{
    Effect, FetchOutcome, GameSession, GuardViolation, GuessOutcome, POINTS_PER_CORRECT_ANSWER,
    RoundToken, Transition,
};
