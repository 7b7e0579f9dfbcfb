//! Screen controllers for the application.
//!
//! Each screen owns its state and handles both rendering and events. The
//! app routes events to whichever screen the [`Navigator`] says is visible
//! and executes the [`ScreenAction`] the screen returns.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    App                        │
//! │   match navigator.visible() {                 │
//! │     Splash => splash.handle_event(...)        │
//! │     Main   => friends.handle_event(...)       │
//! │   }                                           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`Navigator`]: crate::state::Navigator

pub mod friends;
pub mod screen_trait;
pub mod splash;

pub use friends::FriendsScreen;
pub use screen_trait::{Screen, ScreenAction, ScreenContext};
pub use splash::SplashScreen;
