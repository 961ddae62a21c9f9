use chrono::{DateTime, NaiveDateTime};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::MeetingId;

#[derive(Parser, Debug)]
#[command(name = "meetsum")]
#[command(about = "Manage meetings, transcripts and calendar events", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Meetings API base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    #[command(flatten)]
    Meeting(MeetingCommand),
    /// Schedule meetings and manage calendar events
    Calendar(CalendarCliArgs),
    /// Inspect or edit the configuration file
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum MeetingCommand {
    /// List meetings
    List(ListCliArgs),
    /// Show a meeting with its transcript, summary, action items and decisions
    Show {
        id: MeetingId,
    },
    /// Create a new meeting
    Create(CreateCliArgs),
    /// Change fields of an existing meeting
    Edit(EditCliArgs),
    /// Delete a meeting
    Delete {
        id: MeetingId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Upload an audio recording for a meeting
    Upload(UploadCliArgs),
    /// Transcribe a meeting's uploaded audio
    Transcribe(TranscribeCliArgs),
    /// Print a meeting's transcript
    Transcript {
        id: MeetingId,
        /// Copy the transcript to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Generate a summary, action items and decisions from the transcript
    Summarize {
        id: MeetingId,
        /// Disable the progress spinner
        #[arg(long)]
        no_progress: bool,
    },
    /// List a meeting's action items
    ActionItems {
        id: MeetingId,
    },
    /// List a meeting's decisions
    Decisions {
        id: MeetingId,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ListCliArgs {
    /// Number of meetings to skip
    #[arg(long)]
    pub skip: Option<u32>,
    /// Maximum number of meetings to return
    #[arg(short, long)]
    pub limit: Option<u32>,
    /// Only meetings with this status
    #[arg(long)]
    pub status: Option<String>,
    /// Only meetings on or after this time
    #[arg(long, value_parser = parse_time)]
    pub from: Option<String>,
    /// Only meetings on or before this time
    #[arg(long, value_parser = parse_time)]
    pub to: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct CreateCliArgs {
    /// Meeting title (prompted for when omitted)
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// When the meeting takes place
    #[arg(long, value_parser = parse_time)]
    pub date: Option<String>,
    /// Length in minutes
    #[arg(long)]
    pub duration: Option<i64>,
    /// Participant name or email (repeatable)
    #[arg(short, long = "participant")]
    pub participants: Vec<String>,
}

#[derive(ClapArgs, Debug)]
pub struct EditCliArgs {
    pub id: MeetingId,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, value_parser = parse_time)]
    pub date: Option<String>,
    /// Length in minutes
    #[arg(long)]
    pub duration: Option<i64>,
}

#[derive(ClapArgs, Debug)]
pub struct UploadCliArgs {
    pub id: MeetingId,
    /// Audio file to upload
    pub file: PathBuf,
    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TranscribeCliArgs {
    pub id: MeetingId,
    /// Server-side transcription provider (defaults to the configured one)
    #[arg(short, long)]
    pub provider: Option<String>,
    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CalendarCliArgs {
    #[command(subcommand)]
    pub command: CalendarCommand,
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommand {
    /// Put a meeting on the calendar
    Schedule(ScheduleCliArgs),
    /// List upcoming calendar events
    Upcoming {
        /// Maximum number of events (defaults to the configured limit)
        #[arg(short, long)]
        max: Option<u32>,
    },
    /// Change a calendar event
    Update(UpdateEventCliArgs),
    /// Delete a calendar event
    Delete {
        event_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct AttendeeArgs {
    /// Attendee email (repeatable)
    #[arg(short, long = "attendee")]
    pub attendees: Vec<String>,
    /// File with one attendee email per line, or `-` for stdin
    #[arg(long)]
    pub attendees_file: Option<PathBuf>,
}

impl AttendeeArgs {
    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty() && self.attendees_file.is_none()
    }
}

#[derive(ClapArgs, Debug)]
pub struct ScheduleCliArgs {
    pub id: MeetingId,
    /// Start time, e.g. 2024-06-01T10:00
    #[arg(long, value_parser = parse_time)]
    pub start: String,
    /// End time, e.g. 2024-06-01T11:00
    #[arg(long, value_parser = parse_time)]
    pub end: String,
    #[command(flatten)]
    pub attendees: AttendeeArgs,
}

#[derive(ClapArgs, Debug)]
pub struct UpdateEventCliArgs {
    pub event_id: String,
    #[arg(short, long)]
    pub summary: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_time)]
    pub start: Option<String>,
    #[arg(long, value_parser = parse_time)]
    pub end: Option<String>,
    #[command(flatten)]
    pub attendees: AttendeeArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,
    /// Edit the configuration interactively
    Configure,
}

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Accept RFC 3339 as-is, or a local date-time normalised to `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_time(value: &str) -> Result<String, String> {
    let value = value.trim();
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return Ok(value.to_string());
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .ok_or_else(|| {
            format!("invalid time '{value}', expected YYYY-MM-DDTHH:MM[:SS] or RFC 3339")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_local_forms() {
        assert_eq!(parse_time("2024-06-01T10:00").unwrap(), "2024-06-01T10:00:00");
        assert_eq!(parse_time("2024-06-01 10:00:30").unwrap(), "2024-06-01T10:00:30");
    }

    #[test]
    fn test_parse_time_rfc3339_passthrough() {
        assert_eq!(
            parse_time("2024-06-01T10:00:00+02:00").unwrap(),
            "2024-06-01T10:00:00+02:00"
        );
        assert_eq!(parse_time("2024-06-01T10:00:00Z").unwrap(), "2024-06-01T10:00:00Z");
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("tomorrow").is_err());
        assert!(parse_time("2024-13-01T10:00").is_err());
    }

    #[test]
    fn test_schedule_args() {
        let cli = Cli::try_parse_from([
            "meetsum",
            "calendar",
            "schedule",
            "5",
            "--start",
            "2024-06-01T10:00",
            "--end",
            "2024-06-01T11:00",
            "-a",
            "a@x.com",
            "--attendee",
            "b@y.com",
        ])
        .unwrap();

        match cli.command {
            CliCommand::Calendar(CalendarCliArgs {
                command: CalendarCommand::Schedule(args),
            }) => {
                assert_eq!(args.id, 5);
                assert_eq!(args.start, "2024-06-01T10:00:00");
                assert_eq!(args.attendees.attendees, vec!["a@x.com", "b@y.com"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_schedule_rejects_bad_time() {
        let result = Cli::try_parse_from([
            "meetsum", "calendar", "schedule", "5", "--start", "soon", "--end",
            "2024-06-01T11:00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_meeting_commands_at_top_level() {
        let cli = Cli::try_parse_from(["meetsum", "delete", "12", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            CliCommand::Meeting(MeetingCommand::Delete { id: 12, yes: true })
        ));

        let cli = Cli::try_parse_from(["meetsum", "action-items", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            CliCommand::Meeting(MeetingCommand::ActionItems { id: 3 })
        ));
    }

    #[test]
    fn test_create_collects_participants() {
        let cli = Cli::try_parse_from([
            "meetsum", "create", "-t", "Kickoff", "-p", "ana", "-p", "ben", "--date",
            "2024-06-01 09:30",
        ])
        .unwrap();
        match cli.command {
            CliCommand::Meeting(MeetingCommand::Create(args)) => {
                assert_eq!(args.title.as_deref(), Some("Kickoff"));
                assert_eq!(args.participants, vec!["ana", "ben"]);
                assert_eq!(args.date.as_deref(), Some("2024-06-01T09:30:00"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "meetsum",
            "list",
            "--format",
            "json",
            "--api-url",
            "http://10.0.0.5:8000/api",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8000/api"));
    }
}
