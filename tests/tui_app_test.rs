//! Tests for TUI key handling.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use cinesage::tui::App;
use cinesage::{
    DeckRiddleProvider, Difficulty, FetchOutcome, GameController, MemoryScoreStore,
    RiddleContent, RoundStatus,
};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

async fn playing_app(title: &str) -> App {
    let riddle = RiddleContent::new(
        "Clue.".to_string(),
        title.to_string(),
        vec!["Tom Hanks".to_string()],
        "1994".to_string(),
        "Robert Zemeckis".to_string(),
    )
    .expect("Valid riddle");
    let controller = GameController::new(
        Arc::new(DeckRiddleProvider::new(vec![riddle])),
        Arc::new(MemoryScoreStore::new()),
        Difficulty::Hard,
    );

    let mut app = App::new(controller);
    app.start();
    assert_eq!(app.controller_mut().settle().await, FetchOutcome::Ready);
    app
}

#[tokio::test]
async fn test_typed_guess_is_submitted_on_enter() {
    let mut app = playing_app("Big").await;

    type_text(&mut app, "bx");
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.input(), "b");

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input(), "");
    assert!(app.controller().session().round().revealed_letters().contains(&'B'));
}

#[tokio::test]
async fn test_rejected_guess_shows_notice() {
    let mut app = playing_app("Big").await;

    type_text(&mut app, "b");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "b");
    press(&mut app, KeyCode::Enter);

    assert!(app.notice().is_some());
}

#[tokio::test]
async fn test_hint_keys_follow_order() {
    let mut app = playing_app("Big").await;

    press(&mut app, KeyCode::F(2));
    assert!(app.notice().is_some());
    assert_eq!(app.controller().session().round().hints_used(), 0);

    press(&mut app, KeyCode::F(1));
    assert!(app.notice().is_none());
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.controller().session().round().hints_used(), 2);
}

#[tokio::test]
async fn test_enter_after_win_starts_next_round() {
    let mut app = playing_app("Big").await;

    type_text(&mut app, "big");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.controller().session().status(), RoundStatus::Answered);
    assert_eq!(app.notice(), Some("New high score!"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.controller().session().status(), RoundStatus::Loading);
    assert_eq!(app.controller_mut().settle().await, FetchOutcome::Ready);
}

#[tokio::test]
async fn test_escape_quits() {
    let mut app = playing_app("Big").await;
    assert!(!app.should_quit());
    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit());
}
