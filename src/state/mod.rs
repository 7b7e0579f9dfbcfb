//! Navigation state: the screen set and the controller that owns it.

pub mod nav;
pub mod screen;

pub use nav::Navigator;
pub use screen::{screens_to_hide, ScreenId};
