//! Shared test utilities for the integration tests.
//!
//! Provides `TestEnv` - an isolated config directory for tests, with
//! automatic cleanup via `TempDir`. The config path functions honor
//! `SOCIALITE_CONFIG_DIR`, so pointing that at a tempdir redirects all
//! config reads and writes.
//!
//! **Important**: tests using the env override must not run concurrently
//! with each other; `TestEnv` serializes them through a global mutex.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Global mutex so only one test redirects the config dir at a time.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// An isolated socialite environment for one test.
pub struct TestEnv {
    temp_dir: TempDir,
    old_config_dir: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl TestEnv {
    /// Create a fresh environment and point `SOCIALITE_CONFIG_DIR` at it.
    pub fn new() -> Self {
        let lock = ENV_MUTEX.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let old_config_dir = std::env::var("SOCIALITE_CONFIG_DIR").ok();
        std::env::set_var("SOCIALITE_CONFIG_DIR", temp_dir.path());
        Self {
            temp_dir,
            old_config_dir,
            _lock: lock,
        }
    }

    /// The redirected config directory.
    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// The config file path inside the redirected directory.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join("config.toml")
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        match &self.old_config_dir {
            Some(v) => std::env::set_var("SOCIALITE_CONFIG_DIR", v),
            None => std::env::remove_var("SOCIALITE_CONFIG_DIR"),
        }
    }
}
