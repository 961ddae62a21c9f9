use anyhow::Result;
use clap::Parser;
use meetsum::cli::{
    handle_calendar_command, handle_config_command, handle_meeting_command, ApiContext, Cli,
    CliCommand,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        CliCommand::Version => {
            println!("meetsum {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Config(args) => handle_config_command(args),
        CliCommand::Calendar(args) => {
            let ctx = ApiContext::connect(cli.api_url.as_deref(), cli.format)?;
            handle_calendar_command(&ctx, args).await
        }
        CliCommand::Meeting(command) => {
            let ctx = ApiContext::connect(cli.api_url.as_deref(), cli.format)?;
            handle_meeting_command(&ctx, command).await
        }
    }
}
