//! Main screen: the signed-in user's friend list.
//!
//! A header with the user's name and avatar, then one row per friend
//! (avatar swatch, name, dimmed picture URL). Data arrives asynchronously
//! through [`apply_profile`]/[`apply_friends`]; until then the list area
//! shows a loading line. An empty list and a failed request both show the
//! configured placeholder text — upstream never distinguished the two and
//! neither do we.
//!
//! [`apply_profile`]: FriendsScreen::apply_profile
//! [`apply_friends`]: FriendsScreen::apply_friends

use crate::provider::{Friend, Profile};
use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::state::ScreenId;
use crate::styles;
use crate::widgets::Avatar;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

/// Rows jumped by PageUp/PageDown.
const PAGE_JUMP: usize = 10;

/// Friend list screen controller.
pub struct FriendsScreen {
    profile: Option<Profile>,
    /// `None` while the initial fetch is in flight; `Some(vec![])` when the
    /// provider returned nothing (or the request failed).
    friends: Option<Vec<Friend>>,
    list_state: ListState,
}

impl Default for FriendsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FriendsScreen {
    pub fn new() -> Self {
        Self {
            profile: None,
            friends: None,
            list_state: ListState::default(),
        }
    }

    /// Apply a loaded profile. The caller has already checked the result is
    /// for the active session.
    pub fn apply_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Apply a loaded friend list.
    pub fn apply_friends(&mut self, friends: Vec<Friend>) {
        if friends.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
        self.friends = Some(friends);
    }

    /// A friend-list request failed. Upstream shows the same empty-state
    /// text for "no friends" and "request failed", so route into the empty
    /// state; the error itself has already been logged.
    pub fn mark_friends_failed(&mut self) {
        self.apply_friends(Vec::new());
    }

    /// Drop all loaded data (logout or session change).
    pub fn reset(&mut self) {
        self.profile = None;
        self.friends = None;
        self.list_state = ListState::default();
    }

    /// Put the list back into the loading state before a refresh.
    pub fn mark_loading(&mut self) {
        self.friends = None;
        self.list_state = ListState::default();
    }

    /// Whether the screen is showing the empty-list placeholder.
    pub fn is_showing_placeholder(&self) -> bool {
        self.friends.as_ref().is_some_and(Vec::is_empty)
    }

    /// Name shown in the header, if the profile has loaded.
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.name.as_str())
    }

    fn friend_count(&self) -> usize {
        self.friends.as_ref().map_or(0, Vec::len)
    }

    fn select_offset(&mut self, delta: isize) {
        let count = self.friend_count();
        if count == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta.unsigned_abs()).min(count - 1)
        };
        self.list_state.select(Some(next));
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.profile {
            Some(profile) => {
                let avatar = Avatar::for_user(&profile.id, &profile.name);
                Line::from(vec![
                    avatar.as_span(),
                    Span::raw(" "),
                    Span::styled(profile.name.clone(), styles::title()),
                    Span::styled("  · signed in", styles::success()),
                ])
            }
            None => Line::from(Span::styled("Loading profile...", styles::muted())),
        };
        let header = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(styles::border()),
        );
        frame.render_widget(header, area);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .title(" Friends ");

        match &self.friends {
            None => {
                let loading = Paragraph::new("Loading friends...")
                    .style(styles::muted())
                    .block(block);
                frame.render_widget(loading, area);
            }
            Some(friends) if friends.is_empty() => {
                let placeholder = Paragraph::new(ctx.config.no_friends_text.clone())
                    .style(styles::muted())
                    .block(block);
                frame.render_widget(placeholder, area);
            }
            Some(friends) => {
                let items: Vec<ListItem> = friends
                    .iter()
                    .map(|friend| {
                        let avatar = Avatar::for_user(&friend.id, &friend.name);
                        let mut spans = vec![
                            avatar.as_span(),
                            Span::raw(" "),
                            Span::styled(friend.name.clone(), styles::text()),
                        ];
                        if let Some(picture) = &friend.picture {
                            spans.push(Span::styled(
                                format!("  {}", picture.url),
                                styles::muted(),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect();

                let list = List::new(items)
                    .block(block.title(format!(" Friends ({}) ", friends.len())))
                    .highlight_style(styles::list_highlight())
                    .highlight_symbol(styles::LIST_HIGHLIGHT_SYMBOL);
                frame.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }
}

impl Screen for FriendsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // profile header
                Constraint::Min(3),    // friend list
                Constraint::Length(1), // footer
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_list(frame, chunks[1], ctx);

        let footer = Paragraph::new("↑/↓: scroll   r: refresh   a: account   l: log out   q: quit")
            .style(styles::muted());
        frame.render_widget(footer, chunks[2]);

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

        match key.code {
            KeyCode::Up => {
                self.select_offset(-1);
                Ok(ScreenAction::None)
            }
            KeyCode::Down => {
                self.select_offset(1);
                Ok(ScreenAction::None)
            }
            KeyCode::PageUp => {
                self.select_offset(-(PAGE_JUMP as isize));
                Ok(ScreenAction::None)
            }
            KeyCode::PageDown => {
                self.select_offset(PAGE_JUMP as isize);
                Ok(ScreenAction::None)
            }
            KeyCode::Home => {
                if self.friend_count() > 0 {
                    self.list_state.select(Some(0));
                }
                Ok(ScreenAction::None)
            }
            KeyCode::End => {
                let count = self.friend_count();
                if count > 0 {
                    self.list_state.select(Some(count - 1));
                }
                Ok(ScreenAction::None)
            }
            KeyCode::Char('r') => {
                self.mark_loading();
                Ok(ScreenAction::Refresh)
            }
            KeyCode::Char('a') => Ok(ScreenAction::Navigate(ScreenId::Splash)),
            KeyCode::Char('l') => Ok(ScreenAction::Logout),
            KeyCode::Char('q') => Ok(ScreenAction::Quit),
            KeyCode::Esc => Ok(ScreenAction::Back),
            _ => Ok(ScreenAction::None),
        }
    }
}
