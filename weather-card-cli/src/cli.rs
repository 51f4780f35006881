use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_card_core::{Config, provider_from_config, render::render_card};

use crate::terminal;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather as a card in your terminal")]
pub struct Cli {
    /// OpenWeather API key; takes precedence over the config file and OPENWEATHER_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Read and write this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default place.
    Configure,

    /// Print the card for one place and exit.
    Show {
        /// Place name, e.g. "London" or "Paris, FR".
        place: String,

        /// Print the reading as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Interactive card: type a place and press Enter. This is the default.
    Watch {
        /// Place shown on start; defaults to the configured place.
        #[arg(long)]
        place: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let stored = self.load_config()?;

        match self.command {
            Some(Command::Configure) => {
                let path = configure(stored, self.config.as_deref())?;
                println!("Configuration saved to {}", path.display());
            }
            Some(Command::Show { ref place, json }) => {
                let config = with_overrides(stored, self.api_key.clone());
                show(&config, place, json).await?;
            }
            Some(Command::Watch { ref place }) => {
                let config = with_overrides(stored, self.api_key.clone());
                terminal::watch(&config, place.clone()).await?;
            }
            None => {
                let config = with_overrides(stored, self.api_key.clone());
                terminal::watch(&config, None).await?;
            }
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// Apply environment and flag overrides on top of the file config.
fn with_overrides(mut config: Config, flag_key: Option<String>) -> Config {
    config.apply_env();
    config.apply_api_key_override(flag_key);
    config
}

fn configure(mut config: Config, path: Option<&std::path::Path>) -> anyhow::Result<PathBuf> {
    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let place = Text::new("Default place:")
        .with_default(&config.default_place)
        .prompt()
        .context("Failed to read default place")?;

    config.apply_api_key_override(Some(key));
    if !place.trim().is_empty() {
        config.default_place = place;
    }

    match path {
        Some(path) => {
            config.save_to(path)?;
            Ok(path.to_path_buf())
        }
        None => config.save(),
    }
}

async fn show(config: &Config, place: &str, json: bool) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;

    let reading = provider
        .current_weather(place)
        .await
        .with_context(|| format!("Failed to fetch weather for '{place}'"))?;

    if json {
        let out = serde_json::to_string_pretty(&reading).context("Failed to serialize reading")?;
        println!("{out}");
    } else {
        print!("{}", render_card(&reading, Local::now().date_naive()));
    }

    Ok(())
}
