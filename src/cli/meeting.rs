//! CLI handlers for meeting commands.
//!
//! Each command goes through the workflow view models, so a command makes
//! the same requests the matching screen would.

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::warn;

use super::args::{
    CreateCliArgs, EditCliArgs, ListCliArgs, MeetingCommand, TranscribeCliArgs, UploadCliArgs,
};
use super::progress::{finish_spinner, start_spinner};
use super::{confirm, print_json, ApiContext};
use crate::client::{mime_type_for_extension, MeetingApi};
use crate::models::{ActionItem, Decision, Meeting, MeetingId, MeetingQuery, MeetingUpdate};
use crate::text_io::{copy_to_clipboard_sync, truncate};
use crate::workflow::{MeetingDetail, MeetingDraft, MeetingList};

pub async fn handle_meeting_command(ctx: &ApiContext, command: MeetingCommand) -> Result<()> {
    match command {
        MeetingCommand::List(args) => list_meetings(ctx, args).await,
        MeetingCommand::Show { id } => show_meeting(ctx, id).await,
        MeetingCommand::Create(args) => create_meeting(ctx, args).await,
        MeetingCommand::Edit(args) => edit_meeting(ctx, args).await,
        MeetingCommand::Delete { id, yes } => delete_meeting(ctx, id, yes).await,
        MeetingCommand::Upload(args) => upload_audio(ctx, args).await,
        MeetingCommand::Transcribe(args) => transcribe(ctx, args).await,
        MeetingCommand::Transcript { id, copy } => show_transcript(ctx, id, copy).await,
        MeetingCommand::Summarize { id, no_progress } => summarize(ctx, id, no_progress).await,
        MeetingCommand::ActionItems { id } => list_action_items(ctx, id).await,
        MeetingCommand::Decisions { id } => list_decisions(ctx, id).await,
    }
}

async fn list_meetings(ctx: &ApiContext, args: ListCliArgs) -> Result<()> {
    let query = MeetingQuery {
        skip: args.skip,
        limit: args.limit,
        status: args.status,
        date_from: args.from,
        date_to: args.to,
    };

    let mut list = MeetingList::new();
    list.load(&ctx.meetings, &query).await?;

    if ctx.json() {
        return print_json(list.meetings());
    }

    if list.is_empty() {
        println!("No meetings found.");
        return Ok(());
    }

    for meeting in list.meetings() {
        println!(
            "#{} {} [{}] {}",
            meeting.id,
            meeting.title,
            meeting.status.as_deref().unwrap_or("-"),
            meeting
                .date
                .as_deref()
                .or(meeting.created_at.as_deref())
                .unwrap_or("")
        );
        if let Some(description) = meeting.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", truncate(description, 80));
        }
    }

    Ok(())
}

async fn show_meeting(ctx: &ApiContext, id: MeetingId) -> Result<()> {
    let mut detail = MeetingDetail::new();
    detail.load(&ctx.meetings, id).await?;
    detail.load_findings(&ctx.meetings).await?;

    let Some(meeting) = detail.meeting() else {
        bail!("Meeting #{} could not be loaded", id);
    };

    if ctx.json() {
        return print_json(meeting);
    }

    print_meeting(meeting);
    Ok(())
}

fn print_meeting(meeting: &Meeting) {
    println!("Meeting #{}: {}", meeting.id, meeting.title);
    if let Some(description) = meeting.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", description);
    }
    println!();

    if let Some(status) = &meeting.status {
        println!("Status:   {}", status);
    }
    if let Some(date) = &meeting.date {
        println!("Date:     {}", date);
    }
    if let Some(duration) = meeting.duration {
        println!("Duration: {} min", duration);
    }
    if let Some(participants) = meeting.participants.as_ref().filter(|p| !p.is_empty()) {
        println!("People:   {}", participants.join(", "));
    }
    println!(
        "Audio:    {}",
        meeting.audio_file_path.as_deref().unwrap_or("<none uploaded>")
    );
    if let Some(event) = &meeting.calendar_event_id {
        println!("Event:    {}", event);
    }
    if let Some(created) = &meeting.created_at {
        println!("Created:  {}", created);
    }

    if let Some(transcript) = meeting.transcript.as_deref().filter(|t| !t.is_empty()) {
        println!("\n--- Transcript ---\n{}", transcript);
    }
    if let Some(summary) = meeting.summary.as_deref().filter(|s| !s.is_empty()) {
        println!("\n--- Summary ---\n{}", summary);
    }
    if let Some(items) = meeting.action_items.as_deref().filter(|i| !i.is_empty()) {
        println!("\n--- Action Items ---");
        print_action_items(items);
    }
    if let Some(decisions) = meeting.decisions.as_deref().filter(|d| !d.is_empty()) {
        println!("\n--- Decisions ---");
        print_decisions(decisions);
    }
}

fn print_action_items(items: &[ActionItem]) {
    for item in items {
        let owner = if item.owner.is_empty() {
            "unassigned"
        } else {
            item.owner.as_str()
        };
        match &item.due_date {
            Some(due) => println!("- {} - {} (due {})", item.description, owner, due),
            None => println!("- {} - {}", item.description, owner),
        }
    }
}

fn print_decisions(decisions: &[Decision]) {
    for decision in decisions {
        println!("- {}", decision.description);
        if let Some(rationale) = decision.rationale.as_deref().filter(|r| !r.is_empty()) {
            println!("    because: {}", rationale);
        }
    }
}

async fn create_meeting(ctx: &ApiContext, args: CreateCliArgs) -> Result<()> {
    let (title, description) = match args.title {
        Some(title) => (title, args.description.unwrap_or_default()),
        None => {
            let theme = ColorfulTheme::default();
            let title: String = Input::with_theme(&theme)
                .with_prompt("Title")
                .interact_text()?;
            let description = match args.description {
                Some(description) => description,
                None => Input::with_theme(&theme)
                    .with_prompt("Description")
                    .allow_empty(true)
                    .interact_text()?,
            };
            (title, description)
        }
    };

    let mut draft = MeetingDraft::new(title, description);
    draft.date = args.date;
    draft.duration = args.duration;
    draft.participants = args.participants;

    let meeting = draft.submit(&ctx.meetings).await?;

    if ctx.json() {
        return print_json(&meeting);
    }

    println!("Created meeting #{}: {}", meeting.id, meeting.title);
    println!("View it with: meetsum show {}", meeting.id);
    Ok(())
}

async fn edit_meeting(ctx: &ApiContext, args: EditCliArgs) -> Result<()> {
    let update = MeetingUpdate {
        title: args.title,
        description: args.description,
        date: args.date,
        duration: args.duration,
        participants: None,
        status: args.status,
    };

    if update.is_empty() {
        bail!("Nothing to update; pass at least one field to change");
    }

    let meeting = ctx.meetings.update_meeting(args.id, &update).await?;

    if ctx.json() {
        return print_json(&meeting);
    }

    println!("Updated meeting #{}: {}", meeting.id, meeting.title);
    Ok(())
}

async fn delete_meeting(ctx: &ApiContext, id: MeetingId, yes: bool) -> Result<()> {
    if !confirm(format!("Are you sure you want to delete meeting #{id}?"), yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let receipt = MeetingList::new().delete(&ctx.meetings, id).await?;

    if ctx.json() {
        return print_json(&receipt);
    }

    println!(
        "{}",
        receipt
            .message
            .unwrap_or_else(|| format!("Deleted meeting #{id}"))
    );
    if let Some(event_id) = receipt.calendar_event_id {
        println!("Calendar event: {}", event_id);
    }
    Ok(())
}

async fn upload_audio(ctx: &ApiContext, args: UploadCliArgs) -> Result<()> {
    if !args.file.is_file() {
        bail!("File not found: {}", args.file.display());
    }

    let known = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .and_then(mime_type_for_extension)
        .is_some();
    if !known {
        warn!(
            "{} does not look like an audio file; uploading anyway",
            args.file.display()
        );
    }

    let mut detail = MeetingDetail::new();
    detail.load(&ctx.meetings, args.id).await?;
    detail.select_file(&args.file);

    let pb = start_spinner("Uploading...", ctx.show_progress(args.no_progress))?;
    let result = detail.upload_audio(&ctx.meetings).await;
    finish_spinner(pb);
    let receipt = result?;

    if ctx.json() {
        return print_json(&receipt);
    }

    println!(
        "{}",
        receipt
            .message
            .unwrap_or_else(|| format!("Audio uploaded for meeting #{}", args.id))
    );
    if let Some(path) = detail.meeting().and_then(|m| m.audio_file_path.as_deref()) {
        println!("Audio: {}", path);
    }
    println!("Transcribe it with: meetsum transcribe {}", args.id);
    Ok(())
}

async fn transcribe(ctx: &ApiContext, args: TranscribeCliArgs) -> Result<()> {
    let provider = args
        .provider
        .as_deref()
        .or(ctx.config.transcription.provider.as_deref());

    let mut detail = MeetingDetail::new();
    detail.load(&ctx.meetings, args.id).await?;

    let pb = start_spinner("Transcribing...", ctx.show_progress(args.no_progress))?;
    let result = detail.transcribe(&ctx.meetings, provider).await;
    finish_spinner(pb);
    let outcome = result?;

    if ctx.json() {
        return print_json(&outcome);
    }

    let transcript = outcome
        .transcript
        .as_deref()
        .or_else(|| detail.meeting().and_then(|m| m.transcript.as_deref()))
        .unwrap_or("");

    if let Some(message) = &outcome.message {
        eprintln!("{}", message);
    }
    println!("{}", transcript);
    Ok(())
}

async fn show_transcript(ctx: &ApiContext, id: MeetingId, copy: bool) -> Result<()> {
    let transcript = ctx.meetings.get_transcript(id).await?;

    if ctx.json() {
        print_json(&serde_json::json!({ "transcript": transcript }))?;
    } else {
        println!("{}", transcript);
    }

    if copy {
        copy_to_clipboard_sync(&transcript)?;
        eprintln!("Copied to clipboard");
    }
    Ok(())
}

async fn summarize(ctx: &ApiContext, id: MeetingId, no_progress: bool) -> Result<()> {
    let mut detail = MeetingDetail::new();
    detail.load(&ctx.meetings, id).await?;

    let pb = start_spinner("Summarizing...", ctx.show_progress(no_progress))?;
    let result = detail.summarize(&ctx.meetings).await;
    finish_spinner(pb);
    let outcome = result?;

    if ctx.json() {
        return print_json(&outcome);
    }

    let summary = outcome
        .summary
        .as_deref()
        .or_else(|| detail.meeting().and_then(|m| m.summary.as_deref()))
        .unwrap_or("");
    println!("--- Summary ---\n{}", summary);

    if !outcome.action_items.is_empty() {
        println!("\n--- Action Items ---");
        print_action_items(&outcome.action_items);
    }
    if !outcome.decisions.is_empty() {
        println!("\n--- Decisions ---");
        print_decisions(&outcome.decisions);
    }
    Ok(())
}

async fn list_action_items(ctx: &ApiContext, id: MeetingId) -> Result<()> {
    let items = ctx.meetings.action_items(id).await?;

    if ctx.json() {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("No action items for meeting #{}.", id);
    } else {
        print_action_items(&items);
    }
    Ok(())
}

async fn list_decisions(ctx: &ApiContext, id: MeetingId) -> Result<()> {
    let decisions = ctx.meetings.decisions(id).await?;

    if ctx.json() {
        return print_json(&decisions);
    }

    if decisions.is_empty() {
        println!("No decisions for meeting #{}.", id);
    } else {
        print_decisions(&decisions);
    }
    Ok(())
}
