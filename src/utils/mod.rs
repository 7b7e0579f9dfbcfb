pub mod text_input;

pub use text_input::TextInput;

use std::path::PathBuf;

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (always ~/.config/socialite, regardless of OS).
///
/// `SOCIALITE_CONFIG_DIR` overrides the location; tests rely on this.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SOCIALITE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    get_home_dir().join(".config").join("socialite")
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Directory for log files (the TUI owns the terminal, so logs go to a file)
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("socialite")
}
