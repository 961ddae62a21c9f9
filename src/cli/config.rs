//! CLI handler for viewing and editing the configuration file.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use super::args::{ConfigCliArgs, ConfigCommand};
use crate::config::Config;

pub fn handle_config_command(args: ConfigCliArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => handle_show(),
        ConfigCommand::Configure => handle_configure(),
    }
}

fn display_value(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<default>")
}

fn handle_show() -> Result<()> {
    let config = Config::load()?;

    println!();
    println!("Configuration");
    println!("=============");
    println!();
    println!("API URL:          {}", config.api.base_url);
    println!(
        "Timeout:          {}",
        config
            .api
            .timeout()
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "<none>".to_string())
    );
    println!("Upcoming limit:   {}", config.calendar.upcoming_limit);
    println!(
        "Transcription:    {}",
        display_value(&config.transcription.provider)
    );
    println!();
    println!("Config file:      {}", Config::config_path()?.display());

    Ok(())
}

fn handle_configure() -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = Config::load()?;

    config.api.base_url = Input::with_theme(&theme)
        .with_prompt("Meetings API URL")
        .default(config.api.base_url.clone())
        .interact_text()?;

    let timeout: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout in seconds (0 = none)")
        .default(config.api.timeout_seconds.unwrap_or(0))
        .interact_text()?;
    config.api.timeout_seconds = (timeout > 0).then_some(timeout);

    config.calendar.upcoming_limit = Input::with_theme(&theme)
        .with_prompt("Upcoming events to list")
        .default(config.calendar.upcoming_limit)
        .interact_text()?;

    let provider: String = Input::with_theme(&theme)
        .with_prompt("Transcription provider (blank = server default)")
        .default(config.transcription.provider.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let provider = provider.trim();
    config.transcription.provider = (!provider.is_empty()).then(|| provider.to_string());

    let proceed = Confirm::with_theme(&theme)
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?;

    if proceed {
        config.save()?;
        println!("Saved to {}", Config::config_path()?.display());
    } else {
        println!("Configuration not saved.");
    }

    Ok(())
}
