//! Application wiring and the UI event loop.
//!
//! Everything runs on one thread: draw, drain provider events, poll input.
//! Provider calls are spawned onto the tokio runtime and report back through
//! an unbounded channel, so the loop itself never blocks on the network.
//!
//! Lifecycle mapping: terminal focus gained/lost stands in for the surface
//! being foregrounded/backgrounded. Session-state changes that arrive while
//! unfocused are dropped by the [`SessionMonitor`]; on the next focus gain
//! the visible screen is re-derived from the current session state instead.

use crate::config::Config;
use crate::provider::{
    classify_error, Friend, Profile, ProviderClient, ProviderErrorKind, FRIEND_FIELDS,
};
use crate::screens::{FriendsScreen, Screen, ScreenAction, ScreenContext, SplashScreen};
use crate::session::{SessionMonitor, SessionRegistry, SessionState};
use crate::state::{Navigator, ScreenId};
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Events delivered onto the UI loop by provider-facing tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// A submitted token was accepted by the provider.
    SessionOpened { token: String, profile: Profile },
    /// The provider stopped honoring the active session.
    SessionClosed { reason: Option<String> },
    /// A provider call failed without affecting the session.
    ProviderError { message: String },
    /// Profile fetch finished for the session with this generation.
    ProfileLoaded {
        generation: u64,
        result: Result<Profile, String>,
    },
    /// Friend-list fetch finished for the session with this generation.
    FriendsLoaded {
        generation: u64,
        result: Result<Vec<Friend>, String>,
    },
}

/// Main application state.
pub struct App {
    config: Config,
    config_path: PathBuf,
    tui: Tui,
    runtime: Runtime,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    registry: SessionRegistry,
    monitor: SessionMonitor,
    nav: Navigator,
    splash: SplashScreen,
    friends: FriendsScreen,
    should_quit: bool,
}

impl App {
    pub fn new() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config = Config::load_or_create(&config_path)?;
        let tui = Tui::new()?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            config_path,
            tui,
            runtime,
            events_tx,
            events_rx,
            registry: SessionRegistry::new(),
            monitor: SessionMonitor::new(),
            nav: Navigator::new(),
            splash: SplashScreen::new(),
            friends: FriendsScreen::new(),
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        // The terminal is visible at startup even if no focus event has
        // arrived yet.
        self.monitor.on_resume();

        // A stored token means the provider remembered our session; open it
        // optimistically and let a 401 from the fetches close it.
        if let Some(token) = self.config.stored_token().map(str::to_string) {
            info!("stored session token found, resuming session");
            let generation = self.registry.open(token);
            self.spawn_fetches(generation);
        }

        let initial = SessionMonitor::screen_for(self.registry.state());
        self.nav.clear_history();
        self.nav.show_screen(initial, false);

        loop {
            self.drain_provider_events()?;
            self.draw()?;

            if self.should_quit {
                break;
            }

            if let Some(event) = self.tui.poll_event(Duration::from_millis(250))? {
                self.handle_event(event)?;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let ctx = ScreenContext::new(&self.config, self.registry.state());
        let visible = self.nav.visible();
        let splash = &mut self.splash;
        let friends = &mut self.friends;
        self.tui.terminal_mut().draw(|frame| {
            let area = frame.area();
            let result = match visible {
                ScreenId::Splash => splash.render(frame, area, &ctx),
                ScreenId::Main => friends.render(frame, area, &ctx),
            };
            if let Err(e) = result {
                error!("render error on {}: {e:#}", visible.name());
            }
        })?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::FocusGained => {
                self.monitor.on_resume();
                // Changes while backgrounded were dropped; derive the screen
                // from the session state as it is now.
                let target = SessionMonitor::screen_for(self.registry.state());
                debug!("focus gained, deriving screen: {}", target.name());
                self.nav.clear_history();
                self.nav.show_screen(target, false);
                if let Some(session) = self.registry.active() {
                    let generation = session.generation;
                    self.friends.mark_loading();
                    self.spawn_fetches(generation);
                }
                Ok(())
            }
            Event::FocusLost => {
                self.monitor.on_pause();
                Ok(())
            }
            other => {
                let ctx = ScreenContext::new(&self.config, self.registry.state());
                let action = match self.nav.visible() {
                    ScreenId::Splash => self.splash.handle_event(other, &ctx)?,
                    ScreenId::Main => self.friends.handle_event(other, &ctx)?,
                };
                self.handle_action(action)
            }
        }
    }

    fn handle_action(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Login(token) => self.spawn_login(token),
            ScreenAction::Logout => self.logout()?,
            ScreenAction::Refresh => {
                if let Some(session) = self.registry.active() {
                    let generation = session.generation;
                    self.spawn_fetches(generation);
                }
            }
            ScreenAction::Navigate(target) => {
                // User-driven: reversible, so it goes on the history.
                self.nav.show_screen(target, true);
                let ctx = ScreenContext::new(&self.config, self.registry.state());
                match target {
                    ScreenId::Splash => self.splash.on_enter(&ctx)?,
                    ScreenId::Main => self.friends.on_enter(&ctx)?,
                }
            }
            ScreenAction::Back => {
                self.nav.pop_history();
            }
            ScreenAction::Quit => {
                self.should_quit = true;
            }
        }
        Ok(())
    }

    /// Apply queued provider events. Called once per loop iteration, before
    /// drawing, so results land in the same tick they arrive.
    fn drain_provider_events(&mut self) -> Result<()> {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_provider_event(event)?;
        }
        Ok(())
    }

    fn apply_provider_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::SessionOpened { token, profile } => {
                info!("session opened for user {}", profile.id);
                let generation = self.registry.open(token.clone());

                self.config.remember_token(token);
                if let Err(e) = self.config.save(&self.config_path) {
                    // Not fatal: the session works for this run either way.
                    warn!("failed to persist session token: {e:#}");
                }

                self.splash.reset();
                self.friends.reset();
                self.friends.apply_profile(profile);
                self.session_transition(SessionState::Opened);
                self.spawn_friends_fetch(generation);
            }
            AppEvent::SessionClosed { reason } => {
                info!("session closed: {}", reason.as_deref().unwrap_or("logout"));
                self.registry.close();
                self.config.forget_token();
                if let Err(e) = self.config.save(&self.config_path) {
                    warn!("failed to clear stored token: {e:#}");
                }
                self.friends.reset();
                if let Some(reason) = reason {
                    self.splash.set_error(reason);
                }
                self.session_transition(SessionState::Closed);
            }
            AppEvent::ProviderError { message } => {
                // Logged and surfaced where appropriate; never a screen
                // change and never fatal.
                error!("provider error: {message}");
                if self.nav.visible() == ScreenId::Splash {
                    self.splash.set_error(message);
                }
            }
            AppEvent::ProfileLoaded { generation, result } => {
                if !self.guard_result("profile", generation) {
                    return Ok(());
                }
                match result {
                    Ok(profile) => self.friends.apply_profile(profile),
                    Err(message) => error!("profile fetch failed: {message}"),
                }
            }
            AppEvent::FriendsLoaded { generation, result } => {
                if !self.guard_result("friend list", generation) {
                    return Ok(());
                }
                match result {
                    Ok(friends) => self.friends.apply_friends(friends),
                    Err(message) => {
                        error!("friend list fetch failed: {message}");
                        self.friends.mark_friends_failed();
                    }
                }
            }
        }
        Ok(())
    }

    /// Stale-result and lifecycle guard for async fetch results.
    ///
    /// Returns false when the result must be dropped: it belongs to a
    /// superseded session, or the surface is backgrounded (the next focus
    /// gain refetches).
    fn guard_result(&self, what: &str, generation: u64) -> bool {
        if !self.registry.is_current(generation) {
            debug!("{what} result for stale session (generation {generation}), dropped");
            return false;
        }
        if !self.monitor.is_resumed() {
            debug!("{what} result while backgrounded, dropped");
            return false;
        }
        true
    }

    /// Session-driven screen selection: clear the history, then show.
    fn session_transition(&mut self, state: SessionState) {
        if let Some(target) = self.monitor.on_state_changed(state) {
            self.nav.clear_history();
            self.nav.show_screen(target, false);
        }
    }

    /// Validate `token` against the provider by fetching the profile.
    fn spawn_login(&self, token: String) {
        let client = ProviderClient::new(self.config.api_base(), token.clone());
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let event = match client.get_profile().await {
                Ok(profile) => AppEvent::SessionOpened { token, profile },
                Err(e) => AppEvent::ProviderError {
                    message: format!("{e:#}"),
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Fetch profile and friend list for the session with `generation`.
    ///
    /// Two independent single-shot requests, mirroring the provider API:
    /// each delivers exactly one event and each is guarded separately.
    fn spawn_fetches(&self, generation: u64) {
        self.spawn_profile_fetch(generation);
        self.spawn_friends_fetch(generation);
    }

    fn spawn_profile_fetch(&self, generation: u64) {
        let Some(client) = self.client_for(generation) else {
            return;
        };
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            match client.get_profile().await {
                Ok(profile) => {
                    let _ = tx.send(AppEvent::ProfileLoaded {
                        generation,
                        result: Ok(profile),
                    });
                }
                Err(e) => {
                    Self::report_fetch_error(&tx, &e, |message| AppEvent::ProfileLoaded {
                        generation,
                        result: Err(message),
                    });
                }
            }
        });
    }

    fn spawn_friends_fetch(&self, generation: u64) {
        let Some(client) = self.client_for(generation) else {
            return;
        };
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            match client.get_friends(FRIEND_FIELDS).await {
                Ok(friends) => {
                    let _ = tx.send(AppEvent::FriendsLoaded {
                        generation,
                        result: Ok(friends),
                    });
                }
                Err(e) => {
                    Self::report_fetch_error(&tx, &e, |message| AppEvent::FriendsLoaded {
                        generation,
                        result: Err(message),
                    });
                }
            }
        });
    }

    /// Client bound to the token of the session with `generation`, or
    /// `None` when that session is no longer active.
    fn client_for(&self, generation: u64) -> Option<ProviderClient> {
        let session = self.registry.active()?;
        if session.generation != generation {
            return None;
        }
        Some(ProviderClient::new(
            self.config.api_base(),
            session.token.clone(),
        ))
    }

    /// A fetch failed: a 401 closes the session, anything else is reported
    /// as an ordinary fetch error for the caller's screen to absorb.
    fn report_fetch_error(
        tx: &UnboundedSender<AppEvent>,
        e: &anyhow::Error,
        to_event: impl FnOnce(String) -> AppEvent,
    ) {
        let event = if classify_error(e) == ProviderErrorKind::SessionInvalid {
            AppEvent::SessionClosed {
                reason: Some("Your session expired. Please sign in again.".to_string()),
            }
        } else {
            to_event(format!("{e:#}"))
        };
        let _ = tx.send(event);
    }

    fn logout(&mut self) -> Result<()> {
        self.apply_provider_event(AppEvent::SessionClosed { reason: None })
    }
}
