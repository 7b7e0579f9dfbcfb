//! Screen identity and the mutually-exclusive screen set.
//!
//! The application has a fixed, small set of screens of which exactly one is
//! visible at a time. Which one is visible is a single tagged value owned by
//! the [`Navigator`](crate::state::Navigator); storing it as one value
//! (instead of a visibility flag per screen) makes a half-applied transition
//! unrepresentable.

/// Identity of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Login screen shown to unauthenticated users.
    Splash,
    /// Friend list shown after sign-in.
    Main,
}

impl ScreenId {
    /// The full screen set, in declaration order.
    pub const ALL: [ScreenId; 2] = [ScreenId::Splash, ScreenId::Main];

    /// Human-readable name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            ScreenId::Splash => "splash",
            ScreenId::Main => "main",
        }
    }
}

/// Screens that must be hidden when `current` is visible.
///
/// The renderer only ever draws `current`, so this is a derivation rather
/// than something stored and kept in sync.
pub fn screens_to_hide(all: &[ScreenId], current: ScreenId) -> Vec<ScreenId> {
    all.iter().copied().filter(|s| *s != current).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_everything_but_current() {
        let hidden = screens_to_hide(&ScreenId::ALL, ScreenId::Main);
        assert_eq!(hidden, vec![ScreenId::Splash]);
        assert!(!hidden.contains(&ScreenId::Main));
    }

    #[test]
    fn hidden_set_covers_rest_of_screen_set() {
        for current in ScreenId::ALL {
            let hidden = screens_to_hide(&ScreenId::ALL, current);
            assert_eq!(hidden.len(), ScreenId::ALL.len() - 1);
        }
    }
}
