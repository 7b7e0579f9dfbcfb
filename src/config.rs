use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identity provider connection, set after first sign-in
    pub provider: Option<ProviderConfig>,
    /// Text shown in the friend list area when there is nothing to display
    #[serde(default = "default_no_friends_text")]
    pub no_friends_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider's REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Stored session token; present while a session is remembered
    pub token: Option<String>,
    /// When the stored token was last validated
    #[serde(default)]
    pub authenticated_at: Option<DateTime<Utc>>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            authenticated_at: None,
        }
    }
}

fn default_api_base() -> String {
    "https://graph.example.com/v1".to_string()
}

fn default_no_friends_text() -> String {
    "You have no friends to display yet.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: None,
            no_friends_text: default_no_friends_text(),
        }
    }
}

impl Config {
    /// Load configuration from file or create the default one
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // Backward compatibility for configs written before the field existed
            if config.no_friends_text.is_empty() {
                config.no_friends_text = default_no_friends_text();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // The file can hold a session token: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// The stored session token, if a session is remembered
    pub fn stored_token(&self) -> Option<&str> {
        self.provider.as_ref()?.token.as_deref()
    }

    /// Base URL for provider API calls (default when unconfigured)
    pub fn api_base(&self) -> String {
        self.provider
            .as_ref()
            .map_or_else(default_api_base, |p| p.api_base.clone())
    }

    /// Remember a validated session token
    pub fn remember_token(&mut self, token: String) {
        let provider = self.provider.get_or_insert_with(ProviderConfig::default);
        provider.token = Some(token);
        provider.authenticated_at = Some(Utc::now());
    }

    /// Forget the stored session token
    pub fn forget_token(&mut self) {
        if let Some(provider) = &mut self.provider {
            provider.token = None;
            provider.authenticated_at = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_placeholder_and_no_provider() {
        let config = Config::default();
        assert!(config.provider.is_none());
        assert!(config.stored_token().is_none());
        assert_eq!(config.no_friends_text, "You have no friends to display yet.");
    }

    #[test]
    fn remember_and_forget_token() {
        let mut config = Config::default();
        config.remember_token("secret".to_string());
        assert_eq!(config.stored_token(), Some("secret"));
        assert!(config.provider.as_ref().unwrap().authenticated_at.is_some());

        config.forget_token();
        assert!(config.stored_token().is_none());
        assert!(config.provider.as_ref().unwrap().authenticated_at.is_none());
    }

    #[test]
    fn missing_fields_get_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.no_friends_text, "You have no friends to display yet.");

        let config: Config = toml::from_str("[provider]\ntoken = \"t\"\n").unwrap();
        assert_eq!(config.api_base(), "https://graph.example.com/v1");
        assert_eq!(config.stored_token(), Some("t"));
    }
}
