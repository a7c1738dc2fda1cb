//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, instrument};

use crate::controller::GameController;
use crate::game::{GuessOutcome, HintCategory, RoundStatus};

/// Main application state.
#[derive(Debug)]
pub struct App {
    controller: GameController,
    input: String,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates an application around a controller.
    pub fn new(controller: GameController) -> Self {
        Self {
            controller,
            input: String::new(),
            notice: None,
            should_quit: false,
        }
    }

    /// The controller driving the game.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Mutable access for applying finished fetches.
    pub fn controller_mut(&mut self) -> &mut GameController {
        &mut self.controller
    }

    /// Text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Transient message from the last rejected action.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts the first round.
    pub fn start(&mut self) {
        self.controller.start_round();
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(status = %self.controller.session().status()))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.on_enter(),
            KeyCode::Tab => {
                let result = self.controller.request_next_hint();
                self.on_hint(result);
            }
            KeyCode::F(n @ 1..=3) => {
                if let Some(category) = HintCategory::at(usize::from(n) - 1) {
                    let result = self.controller.request_hint(category);
                    self.on_hint(result);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn on_enter(&mut self) {
        match self.controller.session().status() {
            RoundStatus::Answered | RoundStatus::Error => {
                debug!("Requesting next riddle");
                self.input.clear();
                self.notice = None;
                self.controller.start_round();
            }
            RoundStatus::Loading => {}
            RoundStatus::Playing => match self.controller.submit_guess(&self.input) {
                Ok(outcome) => {
                    debug!(?outcome, "Guess accepted");
                    self.notice = match outcome {
                        GuessOutcome::Won {
                            new_high_score: true,
                            ..
                        } => Some("New high score!".to_string()),
                        _ => None,
                    };
                    self.input.clear();
                }
                Err(violation) => {
                    self.notice = Some(violation.to_string());
                    self.input.clear();
                }
            },
        }
    }

    fn on_hint(&mut self, result: Result<HintCategory, crate::game::GuardViolation>) {
        self.notice = result.err().map(|violation| violation.to_string());
    }
}
