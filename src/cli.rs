//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigError};
use crate::ui::counter::Action;

#[derive(Debug, Parser)]
#[command(name = "counterdeck", version, about = "Terminal front end for a remote counter")]
pub struct Cli {
    /// Config file (default: ~/.config/counterdeck/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Counter service base URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Use an in-process counter instead of the remote service
    #[arg(long)]
    pub offline: bool,

    /// Seed for particle randomness
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Initial theme name
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Append logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (default)
    Ui,
    /// Print the current value
    Get,
    /// Increment and print the new value
    Increment,
    /// Reset and print the new value
    Reset,
}

impl Command {
    /// The remote action a one-shot command performs. `None` for the UI.
    pub fn action(self) -> Option<Action> {
        match self {
            Command::Ui => None,
            Command::Get => Some(Action::Refresh),
            Command::Increment => Some(Action::Increment),
            Command::Reset => Some(Action::Reset),
        }
    }
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Ui)
    }

    /// Load the config file named by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Flags win over file values. Re-validates the result.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            config.gateway.base_url = url.clone();
        }
        if let Some(seed) = self.seed {
            config.effects.seed = Some(seed);
        }
        if let Some(theme) = &self.theme {
            config.ui.theme = Some(theme.clone());
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
        config.validate()
    }
}
