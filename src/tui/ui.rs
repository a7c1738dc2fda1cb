//! Stateless rendering of the game screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use super::app::App;
use crate::game::{FeedbackKind, GameSession, HintCategory, MAX_HINTS, RoundStatus};

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let session = app.controller().session();

    let [score, riddle, title, hints, feedback, input, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(MAX_HINTS as u16 + 3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_score(frame, score, session, app.controller().pending_save());
    draw_riddle(frame, riddle, session);
    draw_title(frame, title, session);
    draw_hints(frame, hints, session);
    draw_feedback(frame, feedback, session, app.notice());
    draw_input(frame, input, session, app.input());
    draw_help(frame, help, session);
}

fn draw_score(frame: &mut Frame, area: Rect, session: &GameSession, unsaved: Option<i64>) {
    let mut spans = vec![
        Span::raw("Current Score: "),
        Span::styled(
            session.current_score().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    High Score: "),
        Span::styled(
            session.high_score().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ];
    if unsaved.is_some() {
        spans.push(Span::styled(" (not saved)", Style::default().fg(Color::Red)));
    }
    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().title("CineSage").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_riddle(frame: &mut Frame, area: Rect, session: &GameSession) {
    let text = match (session.status(), session.round().riddle()) {
        (RoundStatus::Error, _) => {
            "We couldn't load a riddle. Press Enter to try again.".to_string()
        }
        (_, Some(riddle)) => riddle.riddle_text().clone(),
        (_, None) => "Generating a riddle...".to_string(),
    };
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Riddle").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_title(frame: &mut Frame, area: Rect, session: &GameSession) {
    let text = session
        .round()
        .masked_title()
        .map(|masked| spaced(&masked))
        .unwrap_or_else(|| "Loading title...".to_string());
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().title("Title").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_hints(frame: &mut Frame, area: Rect, session: &GameSession) {
    let round = session.round();
    let used = round.hints_used();

    let mut lines: Vec<Line> = HintCategory::iter()
        .map(|category| {
            let heading = format!(
                "F{} Hint {}: {} ",
                category.position() + 1,
                category.position() + 1,
                category.label()
            );
            let detail = if let Some(text) = round.hint_text(category) {
                Span::styled(
                    format!("(-{} pts) {}", category.penalty(), text),
                    Style::default().fg(Color::Green),
                )
            } else if category.position() == used {
                Span::styled(
                    format!("Reveal Hint (-{} pts)", category.penalty()),
                    Style::default().fg(Color::Yellow),
                )
            } else {
                Span::styled(
                    "Reveal previous hints first.",
                    Style::default().fg(Color::DarkGray),
                )
            };
            Line::from(vec![Span::raw(heading), detail])
        })
        .collect();

    if used == MAX_HINTS {
        lines.push(Line::from(Span::styled(
            "No more hints available for this riddle.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Hints (reveal in order: Cast, Year, Director)")
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

fn draw_feedback(frame: &mut Frame, area: Rect, session: &GameSession, notice: Option<&str>) {
    let (title, text, color) = if let Some(notice) = notice {
        ("Notice", notice.to_string(), Color::Blue)
    } else if let Some(feedback) = session.round().feedback() {
        let (title, color) = match feedback.kind() {
            FeedbackKind::Success => ("Correct!", Color::Green),
            FeedbackKind::Error => ("Incorrect Guess", Color::Red),
            FeedbackKind::Info => ("Information", Color::Blue),
        };
        (title, feedback.message().clone(), color)
    } else {
        ("Feedback", String::new(), Color::Reset)
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, area: Rect, session: &GameSession, input: &str) {
    let guessed: String = session.round().revealed_letters().iter().collect();
    let title = if guessed.is_empty() {
        "Your guess".to_string()
    } else {
        format!("Your guess (tried: {})", guessed)
    };
    let style = if session.status() == RoundStatus::Playing {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(format!("> {}", input))
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect, session: &GameSession) {
    let text = match session.status() {
        RoundStatus::Answered => "Enter: next riddle   Esc: quit",
        RoundStatus::Error => "Enter: try again   Esc: quit",
        RoundStatus::Loading => "Loading...   Esc: quit",
        RoundStatus::Playing => "Enter: guess   Tab: next hint   F1-F3: hint   Esc: quit",
    };
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Separates characters with spaces so blanks stay distinguishable.
fn spaced(masked: &str) -> String {
    masked
        .chars()
        .map(|c| if c == ' ' { "  ".to_string() } else { c.to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}
