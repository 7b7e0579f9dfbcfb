//! Splash / sign-in screen.
//!
//! Shown to unauthenticated users: a short explanation and an access-token
//! input. Submitting the token hands a [`ScreenAction::Login`] to the app;
//! validation happens asynchronously and the outcome comes back through
//! [`set_status`]/[`set_error`]. Provider errors are displayed here but
//! never change the visible screen on their own.
//!
//! [`set_status`]: SplashScreen::set_status
//! [`set_error`]: SplashScreen::set_error

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::styles;
use crate::utils::TextInput;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const LOGO: &str = r"               _       _ _ _
 ___  ___  ___(_) __ _| (_) |_ ___
/ __|/ _ \/ __| |/ _` | | | __/ _ \
\__ \ (_) | (__| | (_| | | | ||  __/
|___/\___/ \___|_|\__,_|_|_|\__\___|";

/// Splash screen controller.
pub struct SplashScreen {
    token_input: TextInput,
    error_message: Option<String>,
    status_message: Option<String>,
    /// True while a submitted token is being validated; input is ignored so
    /// the same token isn't submitted twice.
    validating: bool,
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashScreen {
    pub fn new() -> Self {
        Self {
            token_input: TextInput::new(),
            error_message: None,
            status_message: None,
            validating: false,
        }
    }

    /// Show a provider or validation error. Also re-enables input.
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
        self.validating = false;
    }

    /// Show a progress/status line.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Reset to the initial state (after a successful sign-in).
    pub fn reset(&mut self) {
        self.token_input.clear();
        self.error_message = None;
        self.status_message = None;
        self.validating = false;
    }

    fn submit(&mut self) -> ScreenAction {
        let token = self.token_input.text_trimmed().to_string();
        if token.is_empty() {
            self.error_message = Some("Please enter an access token".to_string());
            return ScreenAction::None;
        }
        self.validating = true;
        self.status_message = Some("Signing in...".to_string());
        self.error_message = None;
        ScreenAction::Login(token)
    }
}

impl Screen for SplashScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // logo
                Constraint::Length(2), // tagline
                Constraint::Length(3), // token input
                Constraint::Length(2), // status / error
                Constraint::Min(0),    // filler
                Constraint::Length(1), // footer
            ])
            .margin(1)
            .split(area);

        let logo = Paragraph::new(LOGO)
            .style(styles::title())
            .alignment(Alignment::Center);
        frame.render_widget(logo, chunks[0]);

        let tagline = Paragraph::new("Sign in to browse your friend list")
            .style(styles::text())
            .alignment(Alignment::Center);
        frame.render_widget(tagline, chunks[1]);

        // Token is a secret: render a mask, not the text
        let masked: String = "•".repeat(self.token_input.text().chars().count());
        let input = Paragraph::new(masked).style(styles::text()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if self.validating {
                    styles::border()
                } else {
                    styles::border_focused()
                })
                .title(" Access token "),
        );
        frame.render_widget(input, chunks[2]);

        if !self.validating {
            // Place the terminal cursor inside the input box
            let x = chunks[2].x + 1 + self.token_input.cursor() as u16;
            let y = chunks[2].y + 1;
            frame.set_cursor_position((x.min(chunks[2].right().saturating_sub(2)), y));
        }

        let feedback = if let Some(err) = &self.error_message {
            Line::from(Span::styled(err.clone(), styles::error()))
        } else if let Some(status) = &self.status_message {
            Line::from(Span::styled(status.clone(), styles::text()))
        } else {
            Line::from(Span::styled(
                format!("Provider: {}", ctx.config.api_base()),
                styles::muted(),
            ))
        };
        let feedback = Paragraph::new(feedback).alignment(Alignment::Center);
        frame.render_widget(feedback, chunks[3]);

        let footer = Paragraph::new("Enter: sign in   Esc: back   Ctrl+C: quit")
            .style(styles::muted())
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[5]);

        Ok(())
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(ScreenAction::Quit);
        }

        if self.validating {
            // A validation round is in flight; only allow bailing out.
            if key.code == KeyCode::Esc {
                return Ok(ScreenAction::Back);
            }
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Enter => Ok(self.submit()),
            KeyCode::Esc => Ok(ScreenAction::Back),
            _ => {
                if self.token_input.handle_key(key.code) {
                    self.error_message = None;
                }
                Ok(ScreenAction::None)
            }
        }
    }

    fn is_input_focused(&self) -> bool {
        !self.validating
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        self.validating = false;
        self.status_message = None;
        Ok(())
    }
}
