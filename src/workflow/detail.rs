use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::{WorkflowError, WorkflowResult};
use crate::attendees::parse_attendees;
use crate::client::{CalendarApi, ClientError, MeetingApi};
use crate::models::{
    CalendarEvent, Meeting, MeetingId, ScheduleRequest, SummaryOutcome, TranscriptionOutcome,
    UploadReceipt,
};

/// Scheduling form fields, kept as the raw text the user entered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub start_time: String,
    pub end_time: String,
    /// One email per line
    pub attendees: String,
}

impl ScheduleForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn to_request(&self) -> WorkflowResult<ScheduleRequest> {
        let start_time = self.start_time.trim();
        if start_time.is_empty() {
            return Err(WorkflowError::MissingField("start time"));
        }
        let end_time = self.end_time.trim();
        if end_time.is_empty() {
            return Err(WorkflowError::MissingField("end time"));
        }

        Ok(ScheduleRequest {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            attendees: parse_attendees(&self.attendees),
        })
    }
}

/// The meeting detail screen: upload, transcribe, summarize, schedule.
#[derive(Debug, Default, Clone)]
pub struct MeetingDetail {
    meeting: Option<Meeting>,
    selected_file: Option<PathBuf>,
    pub schedule: ScheduleForm,
}

fn logged(action: &str, err: ClientError) -> WorkflowError {
    error!("Error {}: {}", action, err);
    err.into()
}

impl MeetingDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meeting(&self) -> Option<&Meeting> {
        self.meeting.as_ref()
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        self.selected_file = Some(path.into());
    }

    fn loaded(&self) -> WorkflowResult<&Meeting> {
        self.meeting.as_ref().ok_or(WorkflowError::NotLoaded)
    }

    pub async fn load(&mut self, api: &dyn MeetingApi, id: MeetingId) -> WorkflowResult<()> {
        let meeting = api
            .get_meeting(id)
            .await
            .map_err(|err| logged("loading meeting", err))?;
        self.meeting = Some(meeting);
        Ok(())
    }

    /// Refresh after an action the server has already applied. A failed
    /// refresh keeps the previous record and does not fail the action.
    async fn refresh(&mut self, api: &dyn MeetingApi, id: MeetingId) {
        match api.get_meeting(id).await {
            Ok(meeting) => self.meeting = Some(meeting),
            Err(err) => error!("Error refreshing meeting {}: {}", id, err),
        }
    }

    /// Fill in action items and decisions when the meeting record doesn't embed them.
    pub async fn load_findings(&mut self, api: &dyn MeetingApi) -> WorkflowResult<()> {
        let meeting = self.loaded()?;
        let id = meeting.id;
        let need_items = meeting.action_items.is_none();
        let need_decisions = meeting.decisions.is_none();

        if need_items {
            let items = api
                .action_items(id)
                .await
                .map_err(|err| logged("loading action items", err))?;
            if let Some(meeting) = self.meeting.as_mut() {
                meeting.action_items = Some(items);
            }
        }

        if need_decisions {
            let decisions = api
                .decisions(id)
                .await
                .map_err(|err| logged("loading decisions", err))?;
            if let Some(meeting) = self.meeting.as_mut() {
                meeting.decisions = Some(decisions);
            }
        }

        Ok(())
    }

    /// Upload the selected file, then refresh the meeting.
    pub async fn upload_audio(&mut self, api: &dyn MeetingApi) -> WorkflowResult<UploadReceipt> {
        let id = self.loaded()?.id;
        let path = self
            .selected_file
            .clone()
            .ok_or(WorkflowError::NoFileSelected)?;

        let receipt = api
            .upload_audio(id, &path)
            .await
            .map_err(|err| logged("uploading audio", err))?;

        self.selected_file = None;
        self.refresh(api, id).await;
        Ok(receipt)
    }

    pub async fn transcribe(
        &mut self,
        api: &dyn MeetingApi,
        provider: Option<&str>,
    ) -> WorkflowResult<TranscriptionOutcome> {
        let meeting = self.loaded()?;
        if !meeting.has_audio() {
            return Err(WorkflowError::NoAudio);
        }
        let id = meeting.id;

        let outcome = api
            .transcribe(id, provider)
            .await
            .map_err(|err| logged("transcribing audio", err))?;

        self.refresh(api, id).await;
        Ok(outcome)
    }

    pub async fn summarize(&mut self, api: &dyn MeetingApi) -> WorkflowResult<SummaryOutcome> {
        let meeting = self.loaded()?;
        if !meeting.has_transcript() {
            return Err(WorkflowError::NoTranscript);
        }
        let id = meeting.id;

        let outcome = api
            .summarize(id)
            .await
            .map_err(|err| logged("generating summary", err))?;

        self.refresh(api, id).await;
        Ok(outcome)
    }

    /// Put the meeting on the calendar. The form is cleared only on success.
    pub async fn schedule(&mut self, calendar: &dyn CalendarApi) -> WorkflowResult<CalendarEvent> {
        let id = self.loaded()?.id;
        let request = self.schedule.to_request()?;

        let event = calendar
            .schedule(id, &request)
            .await
            .map_err(|err| logged("scheduling meeting", err))?;

        info!("Meeting scheduled successfully");
        self.schedule.clear();
        Ok(event)
    }
}
