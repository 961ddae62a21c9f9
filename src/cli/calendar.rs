//! CLI handlers for calendar commands.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use super::args::{
    AttendeeArgs, CalendarCliArgs, CalendarCommand, ScheduleCliArgs, UpdateEventCliArgs,
};
use super::{confirm, print_json, ApiContext};
use crate::attendees::parse_attendees;
use crate::client::CalendarApi;
use crate::models::{CalendarEvent, EventUpdate};
use crate::workflow::{MeetingDetail, ScheduleForm};

pub async fn handle_calendar_command(ctx: &ApiContext, args: CalendarCliArgs) -> Result<()> {
    match args.command {
        CalendarCommand::Schedule(args) => schedule(ctx, args).await,
        CalendarCommand::Upcoming { max } => upcoming(ctx, max).await,
        CalendarCommand::Update(args) => update_event(ctx, args).await,
        CalendarCommand::Delete { event_id, yes } => delete_event(ctx, &event_id, yes).await,
    }
}

/// Collect attendee flags and the attendees file into one newline-separated block.
pub fn attendee_text(args: &AttendeeArgs) -> Result<String> {
    let mut lines = args.attendees.clone();

    if let Some(path) = &args.attendees_file {
        lines.push(read_attendees_file(path)?);
    }

    Ok(lines.join("\n"))
}

fn read_attendees_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read attendees from stdin")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read attendees file {}", path.display()))
}

async fn schedule(ctx: &ApiContext, args: ScheduleCliArgs) -> Result<()> {
    let mut detail = MeetingDetail::new();
    detail.load(&ctx.meetings, args.id).await?;
    detail.schedule = ScheduleForm {
        start_time: args.start,
        end_time: args.end,
        attendees: attendee_text(&args.attendees)?,
    };

    let event = detail.schedule(&ctx.calendar).await?;

    if ctx.json() {
        return print_json(&event);
    }

    println!(
        "{}",
        event
            .message
            .as_deref()
            .unwrap_or("Meeting scheduled successfully!")
    );
    print_event(&event);
    Ok(())
}

async fn upcoming(ctx: &ApiContext, max: Option<u32>) -> Result<()> {
    let max = max.unwrap_or(ctx.config.calendar.upcoming_limit);
    let events = ctx.calendar.upcoming(Some(max)).await?;

    if ctx.json() {
        return print_json(&events);
    }

    if events.is_empty() {
        println!("No upcoming events.");
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            println!("---");
        }
        print_event(event);
    }
    Ok(())
}

async fn update_event(ctx: &ApiContext, args: UpdateEventCliArgs) -> Result<()> {
    let attendees = if args.attendees.is_empty() {
        None
    } else {
        Some(parse_attendees(&attendee_text(&args.attendees)?))
    };

    let update = EventUpdate {
        summary: args.summary,
        description: args.description,
        start_time: args.start,
        end_time: args.end,
        attendees,
    };

    if update.is_empty() {
        bail!("Nothing to update; pass at least one field to change");
    }

    let event = ctx.calendar.update_event(&args.event_id, &update).await?;

    if ctx.json() {
        return print_json(&event);
    }

    println!("Updated calendar event {}", event.id);
    print_event(&event);
    Ok(())
}

async fn delete_event(ctx: &ApiContext, event_id: &str, yes: bool) -> Result<()> {
    if !confirm(format!("Delete calendar event {event_id}?"), yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.calendar.delete_event(event_id).await?;

    if ctx.json() {
        return print_json(&serde_json::json!({ "deleted": event_id }));
    }

    println!("Deleted calendar event {}", event_id);
    Ok(())
}

fn print_event(event: &CalendarEvent) {
    match &event.summary {
        Some(summary) => println!("{} ({})", summary, event.id),
        None => println!("Event: {}", event.id),
    }
    if let (Some(start), Some(end)) = (&event.start_time, &event.end_time) {
        println!("When:     {} -> {}", start, end);
    }
    if let Some(link) = &event.html_link {
        println!("Calendar: {}", link);
    }
    if let Some(link) = &event.meet_link {
        println!("Meet:     {}", link);
    }
    if !event.attendees.is_empty() {
        println!("Guests:   {}", event.attendees.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_attendee_text_joins_flags_and_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "c@z.com\n\n  d@z.com").unwrap();

        let args = AttendeeArgs {
            attendees: vec!["a@x.com".to_string(), " b@y.com".to_string()],
            attendees_file: Some(file.path().to_path_buf()),
        };

        let text = attendee_text(&args).unwrap();
        let emails: Vec<_> = parse_attendees(&text).into_iter().map(|a| a.email).collect();
        assert_eq!(emails, vec!["a@x.com", "b@y.com", "c@z.com", "d@z.com"]);
    }

    #[test]
    fn test_attendee_text_empty() {
        let args = AttendeeArgs::default();
        assert!(args.is_empty());
        assert_eq!(attendee_text(&args).unwrap(), "");
    }

    #[test]
    fn test_missing_attendees_file() {
        let args = AttendeeArgs {
            attendees: Vec::new(),
            attendees_file: Some("/nonexistent/attendees.txt".into()),
        };
        assert!(attendee_text(&args).is_err());
    }
}
