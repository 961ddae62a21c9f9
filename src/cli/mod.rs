use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde::Serialize;
use std::io::IsTerminal;

use crate::client::{ApiClient, CalendarClient, MeetingClient};
use crate::config::Config;

pub mod args;
pub mod calendar;
pub mod config;
pub mod meeting;
pub mod progress;

pub use args::{Cli, CliCommand, OutputFormat};
pub use calendar::handle_calendar_command;
pub use config::handle_config_command;
pub use meeting::handle_meeting_command;

/// Everything a command needs to talk to the API.
pub struct ApiContext {
    pub config: Config,
    pub meetings: MeetingClient,
    pub calendar: CalendarClient,
    pub format: OutputFormat,
}

impl ApiContext {
    pub fn connect(api_url: Option<&str>, format: OutputFormat) -> Result<Self> {
        let config = Config::load()?;
        let api = ApiClient::from_config(&config, api_url)
            .context("Failed to set up the meetings API client")?;

        Ok(Self {
            config,
            meetings: MeetingClient::new(api.clone()),
            calendar: CalendarClient::new(api),
            format,
        })
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Spinners only make sense for a human watching a terminal.
    pub fn show_progress(&self, no_progress: bool) -> bool {
        !no_progress && !self.json() && std::io::stderr().is_terminal()
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Ask before doing something destructive, unless `--yes` was given.
pub(crate) fn confirm(prompt: String, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(proceed)
}
