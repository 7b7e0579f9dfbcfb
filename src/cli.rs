use crate::config::Config;
use crate::provider::ProviderClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// A friendly TUI client for browsing your friend list
#[derive(Parser, Debug)]
#[command(name = "socialite", version, about = "A friendly TUI client for browsing your friend list", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current sign-in status
    Status,
    /// Validate an access token and remember the session
    Login {
        /// Provider access token
        token: String,
    },
    /// Forget the stored session
    Logout,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Returns without doing anything when no subcommand was given; the
    /// caller launches the TUI in that case.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Status) => Self::cmd_status(),
            Some(Commands::Login { token }) => Self::cmd_login(token),
            Some(Commands::Logout) => Self::cmd_logout(),
            None => Ok(()),
        }
    }

    fn cmd_status() -> Result<()> {
        let config_path = crate::utils::get_config_path();
        let config = Config::load_or_create(&config_path).context("Failed to load configuration")?;

        println!("Provider: {}", config.api_base());
        match &config.provider {
            Some(provider) if provider.token.is_some() => {
                println!("✅ Signed in");
                if let Some(at) = provider.authenticated_at {
                    println!("   Authenticated at: {}", at.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            _ => println!("❌ Not signed in. Run 'socialite login <token>' or launch the TUI."),
        }
        Ok(())
    }

    fn cmd_login(token: String) -> Result<()> {
        let config_path = crate::utils::get_config_path();
        let mut config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;

        let token = token.trim().to_string();
        if token.is_empty() {
            anyhow::bail!("Token cannot be empty");
        }

        println!("🔑 Validating token...");
        let client = ProviderClient::new(config.api_base(), token.clone());
        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let profile = runtime
            .block_on(client.get_profile())
            .context("Token validation failed")?;

        config.remember_token(token);
        config.save(&config_path)?;

        println!("✅ Signed in as {} ({})", profile.name, profile.id);
        Ok(())
    }

    fn cmd_logout() -> Result<()> {
        let config_path = crate::utils::get_config_path();
        let mut config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;

        if config.stored_token().is_none() {
            println!("Already signed out.");
            return Ok(());
        }

        config.forget_token();
        config.save(&config_path)?;
        println!("✅ Signed out. The stored session token was removed.");
        Ok(())
    }
}
