//! In-memory stand-in for the meetings API, used by the workflow tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::client::{CalendarApi, ClientError, ClientResult, MeetingApi};
use crate::models::{
    ActionItem, CalendarEvent, Decision, DeleteReceipt, EventUpdate, Meeting, MeetingId,
    MeetingQuery, MeetingUpdate, NewMeeting, ScheduleRequest, SummaryOutcome,
    TranscriptionOutcome, UploadReceipt,
};

pub fn meeting(id: MeetingId, title: &str) -> Meeting {
    Meeting {
        id,
        title: title.to_string(),
        description: None,
        date: None,
        duration: None,
        participants: None,
        status: None,
        audio_file_path: None,
        transcript: None,
        summary: None,
        action_items: None,
        decisions: None,
        calendar_event_id: None,
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    meetings: Mutex<Vec<Meeting>>,
    calls: Mutex<Vec<&'static str>>,
    fail_next: AtomicBool,
    fail_on: Mutex<Option<&'static str>>,
    last_schedule: Mutex<Option<ScheduleRequest>>,
}

impl FakeBackend {
    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        Self {
            meetings: Mutex::new(meetings),
            ..Default::default()
        }
    }

    /// Make the next call fail with a 500.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Make the next call named `call` fail with a 500.
    pub fn fail_on(&self, call: &'static str) {
        *self.fail_on.lock().unwrap() = Some(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn last_schedule(&self) -> Option<ScheduleRequest> {
        self.last_schedule.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        let mut fail_on = self.fail_on.lock().unwrap();
        let targeted = *fail_on == Some(call);
        if targeted {
            *fail_on = None;
        }
        if self.fail_next.swap(false, Ordering::SeqCst) || targeted {
            return Err(ClientError::Status {
                context: call,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".to_string(),
            });
        }
        Ok(())
    }

    fn with_meeting<T>(
        &self,
        id: MeetingId,
        f: impl FnOnce(&mut Meeting) -> T,
    ) -> ClientResult<T> {
        let mut meetings = self.meetings.lock().unwrap();
        let meeting = meetings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ClientError::Status {
                context: "load meeting",
                status: StatusCode::NOT_FOUND,
                message: "Meeting not found".to_string(),
            })?;
        Ok(f(meeting))
    }
}

#[async_trait]
impl MeetingApi for FakeBackend {
    async fn list_meetings(&self, _query: &MeetingQuery) -> ClientResult<Vec<Meeting>> {
        self.record("list_meetings")?;
        Ok(self.meetings.lock().unwrap().clone())
    }

    async fn get_meeting(&self, id: MeetingId) -> ClientResult<Meeting> {
        self.record("get_meeting")?;
        self.with_meeting(id, |m| m.clone())
    }

    async fn create_meeting(&self, new: &NewMeeting) -> ClientResult<Meeting> {
        self.record("create_meeting")?;
        let mut meetings = self.meetings.lock().unwrap();
        let id = meetings.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let mut created = meeting(id, &new.title);
        created.description = Some(new.description.clone());
        meetings.push(created.clone());
        Ok(created)
    }

    async fn update_meeting(&self, id: MeetingId, update: &MeetingUpdate) -> ClientResult<Meeting> {
        self.record("update_meeting")?;
        self.with_meeting(id, |m| {
            if let Some(title) = &update.title {
                m.title = title.clone();
            }
            if let Some(status) = &update.status {
                m.status = Some(status.clone());
            }
            m.clone()
        })
    }

    async fn delete_meeting(&self, id: MeetingId) -> ClientResult<DeleteReceipt> {
        self.record("delete_meeting")?;
        self.meetings.lock().unwrap().retain(|m| m.id != id);
        Ok(DeleteReceipt {
            meeting_id: Some(id),
            ..Default::default()
        })
    }

    async fn upload_audio(&self, id: MeetingId, audio_path: &Path) -> ClientResult<UploadReceipt> {
        self.record("upload_audio")?;
        let path = audio_path.display().to_string();
        self.with_meeting(id, |m| m.audio_file_path = Some(path.clone()))?;
        Ok(UploadReceipt {
            message: None,
            file_path: Some(path),
        })
    }

    async fn transcribe(
        &self,
        id: MeetingId,
        _provider: Option<&str>,
    ) -> ClientResult<TranscriptionOutcome> {
        self.record("transcribe")?;
        let transcript = self.with_meeting(id, |m| {
            let text = format!("Transcript of {}", m.title);
            m.transcript = Some(text.clone());
            text
        })?;
        Ok(TranscriptionOutcome {
            message: None,
            transcript: Some(transcript),
        })
    }

    async fn get_transcript(&self, id: MeetingId) -> ClientResult<String> {
        self.record("get_transcript")?;
        self.with_meeting(id, |m| m.transcript.clone().unwrap_or_default())
    }

    async fn summarize(&self, id: MeetingId) -> ClientResult<SummaryOutcome> {
        self.record("summarize")?;
        let summary = self.with_meeting(id, |m| {
            let text = format!("Summary of {}", m.title);
            m.summary = Some(text.clone());
            text
        })?;
        Ok(SummaryOutcome {
            summary: Some(summary),
            ..Default::default()
        })
    }

    async fn action_items(&self, _id: MeetingId) -> ClientResult<Vec<ActionItem>> {
        self.record("action_items")?;
        Ok(vec![ActionItem {
            id: Some(1),
            title: None,
            description: "Send notes".to_string(),
            owner: "sam".to_string(),
            due_date: None,
        }])
    }

    async fn decisions(&self, _id: MeetingId) -> ClientResult<Vec<Decision>> {
        self.record("decisions")?;
        Ok(vec![Decision {
            id: Some(1),
            title: None,
            description: "Ship on Friday".to_string(),
            decision_maker: None,
            rationale: None,
        }])
    }
}

#[async_trait]
impl CalendarApi for FakeBackend {
    async fn schedule(
        &self,
        meeting_id: MeetingId,
        request: &ScheduleRequest,
    ) -> ClientResult<CalendarEvent> {
        self.record("schedule")?;
        *self.last_schedule.lock().unwrap() = Some(request.clone());
        Ok(CalendarEvent {
            id: format!("evt-{meeting_id}"),
            summary: None,
            description: None,
            html_link: None,
            meet_link: None,
            start_time: Some(request.start_time.clone()),
            end_time: Some(request.end_time.clone()),
            attendees: request.attendees.iter().map(|a| a.email.clone()).collect(),
            message: None,
        })
    }

    async fn upcoming(&self, _max_results: Option<u32>) -> ClientResult<Vec<CalendarEvent>> {
        self.record("upcoming")?;
        Ok(Vec::new())
    }

    async fn update_event(
        &self,
        _event_id: &str,
        _update: &EventUpdate,
    ) -> ClientResult<CalendarEvent> {
        self.record("update_event")?;
        Err(ClientError::Status {
            context: "update calendar event",
            status: StatusCode::NOT_IMPLEMENTED,
            message: "not faked".to_string(),
        })
    }

    async fn delete_event(&self, _event_id: &str) -> ClientResult<()> {
        self.record("delete_event")
    }
}
