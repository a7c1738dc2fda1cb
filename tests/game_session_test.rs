//! Tests for the game session state machine.

use cinesage::{
    Difficulty, Effect, FeedbackKind, FetchOutcome, GameSession, GenerationError, GuardViolation,
    GuessOutcome, HintCategory, RiddleContent, RoundStatus,
};

fn riddle(title: &str) -> RiddleContent {
    RiddleContent::new(
        "A riddle about a film.".to_string(),
        title.to_string(),
        vec!["Brad Pitt".to_string(), "Morgan Freeman".to_string()],
        "1995".to_string(),
        "David Fincher".to_string(),
    )
    .expect("Valid riddle")
}

/// Returns a session already playing a round with the given title.
fn playing(title: &str) -> GameSession {
    let mut session = GameSession::new(0);
    let token = *session.start_round(Difficulty::Hard).outcome();
    assert_eq!(
        session.complete_fetch(token, Ok(riddle(title))),
        FetchOutcome::Ready
    );
    session
}

#[test]
fn test_new_session_is_loading_without_riddle() {
    let session = GameSession::new(250);
    assert_eq!(session.status(), RoundStatus::Loading);
    assert!(session.round().riddle().is_none());
    assert_eq!(*session.current_score(), 0);
    assert_eq!(*session.high_score(), 250);
}

#[test]
fn test_start_round_requests_fetch_at_difficulty() {
    let mut session = GameSession::new(0);
    let (token, effects) = session.start_round(Difficulty::Expert).into_parts();
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            token,
            difficulty: Difficulty::Expert
        }]
    );
    assert_eq!(session.current_token(), Some(token));
    assert_eq!(session.status(), RoundStatus::Loading);
}

#[test]
fn test_fetch_success_starts_play() {
    let session = playing("Seven");
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(session.round().masked_title().as_deref(), Some("_____"));
    assert!(session.round().revealed_letters().is_empty());
}

#[test]
fn test_fetch_failure_enters_error_and_clears_riddle() {
    let mut session = GameSession::new(0);
    let token = *session.start_round(Difficulty::Hard).outcome();
    let outcome = session.complete_fetch(token, Err(GenerationError::new("model offline")));

    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(session.status(), RoundStatus::Error);
    assert!(session.round().riddle().is_none());
    let feedback = session.round().feedback().as_ref().expect("Feedback set");
    assert_eq!(*feedback.kind(), FeedbackKind::Error);
}

#[test]
fn test_error_state_rejects_input_until_retry() {
    let mut session = GameSession::new(0);
    let token = *session.start_round(Difficulty::Hard).outcome();
    session.complete_fetch(token, Err(GenerationError::new("model offline")));

    assert_eq!(
        session.submit_guess("A"),
        Err(GuardViolation::NotPlaying {
            status: RoundStatus::Error
        })
    );
    assert!(session.request_hint(HintCategory::Cast).is_err());

    let retry = *session.start_round(Difficulty::Hard).outcome();
    assert_eq!(
        session.complete_fetch(retry, Ok(riddle("Alien"))),
        FetchOutcome::Ready
    );
    assert_eq!(session.status(), RoundStatus::Playing);
}

#[test]
fn test_stale_fetch_is_discarded() {
    let mut session = GameSession::new(0);
    let first = *session.start_round(Difficulty::Hard).outcome();
    let second = *session.start_round(Difficulty::Hard).outcome();
    assert!(second > first);

    assert_eq!(
        session.complete_fetch(first, Ok(riddle("Jaws"))),
        FetchOutcome::Stale
    );
    assert_eq!(session.status(), RoundStatus::Loading);
    assert!(session.round().riddle().is_none());

    assert_eq!(
        session.complete_fetch(second, Ok(riddle("Alien"))),
        FetchOutcome::Ready
    );
    assert_eq!(session.round().riddle().as_ref().map(|r| r.title().as_str()), Some("Alien"));

    // A late failure for the abandoned round cannot knock the new one into Error.
    assert_eq!(
        session.complete_fetch(first, Err(GenerationError::new("late"))),
        FetchOutcome::Stale
    );
    assert_eq!(session.status(), RoundStatus::Playing);
}

#[test]
fn test_duplicate_delivery_is_stale() {
    let mut session = playing("Seven");
    let token = session.current_token().expect("Round started");
    assert_eq!(
        session.complete_fetch(token, Ok(riddle("Jaws"))),
        FetchOutcome::Stale
    );
    assert_eq!(session.round().riddle().as_ref().map(|r| r.title().as_str()), Some("Seven"));
}

#[test]
fn test_hints_unlock_in_order_and_accumulate_penalty() {
    let mut session = playing("Seven");

    assert_eq!(session.request_hint(HintCategory::Cast), Ok(HintCategory::Cast));
    assert_eq!(*session.round().penalty_accumulated(), 20);
    assert_eq!(session.request_hint(HintCategory::Year), Ok(HintCategory::Year));
    assert_eq!(*session.round().penalty_accumulated(), 50);
    assert_eq!(
        session.request_hint(HintCategory::Director),
        Ok(HintCategory::Director)
    );
    assert_eq!(*session.round().penalty_accumulated(), 90);
    assert_eq!(session.round().hints_used(), 3);
    assert_eq!(session.round().hints_revealed(), &[true, true, true]);
}

#[test]
fn test_out_of_order_hint_is_rejected_without_change() {
    let mut session = playing("Seven");
    let before = session.round().clone();

    assert_eq!(
        session.request_hint(HintCategory::Year),
        Err(GuardViolation::HintOutOfOrder {
            requested: HintCategory::Year,
            expected: HintCategory::Cast,
        })
    );
    assert_eq!(
        session.request_hint(HintCategory::Director),
        Err(GuardViolation::HintOutOfOrder {
            requested: HintCategory::Director,
            expected: HintCategory::Cast,
        })
    );
    assert_eq!(session.round(), &before);
}

#[test]
fn test_repeated_hint_is_rejected() {
    let mut session = playing("Seven");
    session.request_hint(HintCategory::Cast).expect("First hint");
    let before = session.round().clone();

    assert_eq!(
        session.request_hint(HintCategory::Cast),
        Err(GuardViolation::HintAlreadyRevealed {
            category: HintCategory::Cast
        })
    );
    assert_eq!(session.round(), &before);
}

#[test]
fn test_next_hint_runs_out() {
    let mut session = playing("Seven");
    assert_eq!(session.request_next_hint(), Ok(HintCategory::Cast));
    assert_eq!(session.request_next_hint(), Ok(HintCategory::Year));
    assert_eq!(session.request_next_hint(), Ok(HintCategory::Director));
    assert_eq!(
        session.request_next_hint(),
        Err(GuardViolation::NoHintsRemaining)
    );
    assert_eq!(*session.round().penalty_accumulated(), 90);
}

#[test]
fn test_revealed_hint_text() {
    let mut session = playing("Seven");
    assert!(session.revealed_hints().is_empty());
    assert_eq!(session.round().hint_text(HintCategory::Cast), None);

    session.request_hint(HintCategory::Cast).expect("Cast hint");
    session.request_hint(HintCategory::Year).expect("Year hint");

    assert_eq!(
        session.revealed_hints(),
        vec![
            (HintCategory::Cast, "Brad Pitt, Morgan Freeman".to_string()),
            (HintCategory::Year, "1995".to_string()),
        ]
    );
    assert_eq!(session.round().hint_text(HintCategory::Director), None);
}

#[test]
fn test_correct_letter_reveals_every_occurrence() {
    let mut session = playing("Seven");
    let outcome = session.submit_guess("e").expect("Accepted");

    assert_eq!(outcome.outcome(), &GuessOutcome::CorrectLetter('E'));
    assert!(outcome.effects().is_empty());
    assert_eq!(session.round().masked_title().as_deref(), Some("_e_e_"));
    assert_eq!(session.status(), RoundStatus::Playing);
}

#[test]
fn test_incorrect_letter_is_recorded() {
    let mut session = playing("Seven");
    let outcome = session.submit_guess("z").expect("Accepted");

    assert_eq!(outcome.outcome(), &GuessOutcome::IncorrectLetter('Z'));
    assert!(session.round().revealed_letters().contains(&'Z'));
    assert_eq!(session.round().masked_title().as_deref(), Some("_____"));
    assert_eq!(session.status(), RoundStatus::Playing);
}

#[test]
fn test_repeated_letter_changes_nothing() {
    let mut session = playing("Seven");
    session.submit_guess("s").expect("Hit");
    session.submit_guess("x").expect("Miss");
    let round_before = session.round().clone();
    let score_before = *session.current_score();

    for repeat in ["s", "S", " x ", "X"] {
        let letter = repeat.trim().to_ascii_uppercase().chars().next().expect("letter");
        assert_eq!(
            session.submit_guess(repeat),
            Err(GuardViolation::AlreadyGuessed { letter })
        );
    }

    assert_eq!(session.round(), &round_before);
    assert_eq!(*session.current_score(), score_before);
    assert_eq!(session.status(), RoundStatus::Playing);
}

#[test]
fn test_blank_guess_changes_nothing() {
    let mut session = playing("Seven");
    session.submit_guess("s").expect("Hit");
    let round_before = session.round().clone();

    for blank in ["", "   ", "\t\n"] {
        assert_eq!(session.submit_guess(blank), Err(GuardViolation::EmptyGuess));
    }

    assert_eq!(session.round(), &round_before);
    assert_eq!(*session.current_score(), 0);
}

#[test]
fn test_win_happens_exactly_on_last_required_letter() {
    let mut session = playing("Up 2!");

    // U, P and 2 are required; the space and '!' are not.
    assert_eq!(
        session.submit_guess("u").expect("Accepted").outcome(),
        &GuessOutcome::CorrectLetter('U')
    );
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(
        session.submit_guess("2").expect("Accepted").outcome(),
        &GuessOutcome::CorrectLetter('2')
    );
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(session.round().masked_title().as_deref(), Some("U_ 2!"));

    let last = session.submit_guess("p").expect("Accepted");
    assert!(matches!(last.outcome(), GuessOutcome::Won { points: 100, .. }));
    assert_eq!(session.status(), RoundStatus::Answered);
    assert_eq!(session.round().masked_title().as_deref(), Some("Up 2!"));

    // Answered is terminal for the round.
    assert_eq!(
        session.submit_guess("q"),
        Err(GuardViolation::NotPlaying {
            status: RoundStatus::Answered
        })
    );
    assert_eq!(*session.current_score(), 100);
}

#[test]
fn test_misses_do_not_block_letter_win() {
    let mut session = playing("Jaws");
    for miss in ["b", "c", "d"] {
        session.submit_guess(miss).expect("Accepted");
    }
    for hit in ["j", "a", "w"] {
        session.submit_guess(hit).expect("Accepted");
        assert_eq!(session.status(), RoundStatus::Playing);
    }
    let won = session.submit_guess("s").expect("Accepted");
    assert!(matches!(won.outcome(), GuessOutcome::Won { .. }));
}

#[test]
fn test_full_title_guess_wins_case_insensitively() {
    let mut session = playing("Seven");
    let won = session.submit_guess("  seven ").expect("Accepted");

    assert_eq!(
        won.outcome(),
        &GuessOutcome::Won {
            points: 100,
            new_high_score: true
        }
    );
    assert_eq!(won.effects(), &vec![Effect::SaveHighScore(100)]);
    assert_eq!(session.status(), RoundStatus::Answered);
    assert_eq!(session.round().masked_title().as_deref(), Some("Seven"));

    let feedback = session.round().feedback().as_ref().expect("Feedback set");
    assert_eq!(*feedback.kind(), FeedbackKind::Success);
    assert!(feedback.message().contains("Seven"));
    assert!(feedback.message().contains("100"));
}

#[test]
fn test_full_title_guess_after_partial_reveal() {
    let mut session = playing("The Matrix");
    session.submit_guess("t").expect("Accepted");
    session.submit_guess("q").expect("Accepted");

    let won = session.submit_guess("THE MATRIX").expect("Accepted");
    assert!(matches!(won.outcome(), GuessOutcome::Won { .. }));
    assert_eq!(session.round().masked_title().as_deref(), Some("The Matrix"));
}

#[test]
fn test_wrong_title_continues_round_without_penalty() {
    let mut session = playing("Seven");
    let outcome = session.submit_guess("Se7en").expect("Accepted");

    assert_eq!(outcome.outcome(), &GuessOutcome::WrongTitle);
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(*session.round().penalty_accumulated(), 0);
    let feedback = session.round().feedback().as_ref().expect("Feedback set");
    assert_eq!(*feedback.kind(), FeedbackKind::Error);
}

#[test]
fn test_single_punctuation_is_a_title_attempt() {
    let mut session = playing("Seven");
    let outcome = session.submit_guess("?").expect("Accepted");
    assert_eq!(outcome.outcome(), &GuessOutcome::WrongTitle);
    assert!(session.round().revealed_letters().is_empty());
}

#[test]
fn test_points_subtract_hint_penalties() {
    let mut session = playing("Seven");
    session.request_hint(HintCategory::Cast).expect("Cast hint");
    session.request_hint(HintCategory::Year).expect("Year hint");

    let won = session.submit_guess("seven").expect("Accepted");
    assert!(matches!(won.outcome(), GuessOutcome::Won { points: 50, .. }));
    assert_eq!(*session.current_score(), 50);
}

#[test]
fn test_every_hint_used_leaves_ten_points_per_round() {
    let mut session = GameSession::new(0);
    let mut total = 0;
    for title in ["Seven", "Alien"] {
        let token = *session.start_round(Difficulty::Hard).outcome();
        session.complete_fetch(token, Ok(riddle(title)));
        for _ in 0..3 {
            session.request_next_hint().expect("Hint");
        }
        let won = session.submit_guess(title).expect("Accepted");
        assert!(matches!(won.outcome(), GuessOutcome::Won { points: 10, .. }));
        total += 10;
    }
    assert_eq!(*session.current_score(), total);
}

#[test]
fn test_high_score_updates_only_when_strictly_exceeded() {
    let mut session = GameSession::new(100);
    let token = *session.start_round(Difficulty::Hard).outcome();
    session.complete_fetch(token, Ok(riddle("Seven")));

    // Reaching the high score exactly is not a new high score.
    let won = session.submit_guess("Seven").expect("Accepted");
    assert_eq!(
        won.outcome(),
        &GuessOutcome::Won {
            points: 100,
            new_high_score: false
        }
    );
    assert!(won.effects().is_empty());
    assert_eq!(*session.high_score(), 100);

    let token = *session.start_round(Difficulty::Hard).outcome();
    session.complete_fetch(token, Ok(riddle("Alien")));
    session.request_hint(HintCategory::Cast).expect("Cast hint");
    let won = session.submit_guess("alien").expect("Accepted");
    assert_eq!(won.effects(), &vec![Effect::SaveHighScore(180)]);
    assert_eq!(*session.high_score(), 180);
    assert_eq!(*session.current_score(), 180);
}

#[test]
fn test_restore_high_score_is_idempotent() {
    let mut session = GameSession::new(0);
    session.restore_high_score(300);
    session.restore_high_score(300);
    assert_eq!(*session.high_score(), 300);

    // A stale, lower persisted value never lowers the in-memory one.
    session.restore_high_score(120);
    assert_eq!(*session.high_score(), 300);
}

#[test]
fn test_new_round_resets_round_but_keeps_scores() {
    let mut session = playing("Seven");
    session.request_hint(HintCategory::Cast).expect("Cast hint");
    session.submit_guess("s").expect("Accepted");
    session.submit_guess("seven").expect("Accepted");
    assert_eq!(*session.current_score(), 80);

    let token = *session.start_round(Difficulty::Easy).outcome();
    assert_eq!(session.status(), RoundStatus::Loading);
    assert!(session.round().riddle().is_none());
    assert!(session.round().revealed_letters().is_empty());
    assert_eq!(session.round().hints_used(), 0);
    assert_eq!(*session.round().penalty_accumulated(), 0);
    assert!(session.round().feedback().is_none());
    assert_eq!(*session.current_score(), 80);
    assert_eq!(*session.high_score(), 80);

    session.complete_fetch(token, Ok(riddle("Alien")));
    assert_eq!(session.round().masked_title().as_deref(), Some("_____"));
}

#[test]
fn test_round_can_be_abandoned_mid_play() {
    let mut session = playing("Seven");
    session.submit_guess("e").expect("Accepted");
    session.start_round(Difficulty::Hard);
    assert_eq!(session.status(), RoundStatus::Loading);
    assert_eq!(
        session.submit_guess("s"),
        Err(GuardViolation::NotPlaying {
            status: RoundStatus::Loading
        })
    );
}
