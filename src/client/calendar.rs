use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::{ApiClient, CalendarApi, ClientResult};
use crate::models::calendar::UpcomingBody;
use crate::models::{CalendarEvent, EventUpdate, MeetingId, ScheduleRequest};

const EVENTS_PATH: &str = "/meetings/calendar/events";

/// Client for scheduling meetings and managing their calendar events.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    api: ApiClient,
}

impl CalendarClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CalendarApi for CalendarClient {
    async fn schedule(
        &self,
        meeting_id: MeetingId,
        request: &ScheduleRequest,
    ) -> ClientResult<CalendarEvent> {
        let event: CalendarEvent = self
            .api
            .send_json(
                self.api
                    .post(&format!("/meetings/{meeting_id}/schedule"))
                    .json(request),
                "schedule meeting",
            )
            .await?;
        info!(
            "Scheduled meeting {} as event {} with {} attendee(s)",
            meeting_id,
            event.id,
            request.attendees.len()
        );
        Ok(event)
    }

    async fn upcoming(&self, max_results: Option<u32>) -> ClientResult<Vec<CalendarEvent>> {
        let mut request = self.api.get("/meetings/calendar/upcoming");
        if let Some(max) = max_results {
            request = request.query(&[("max_results", max)]);
        }
        let body: UpcomingBody = self.api.send_json(request, "load upcoming events").await?;
        Ok(body.into_events())
    }

    async fn update_event(
        &self,
        event_id: &str,
        update: &EventUpdate,
    ) -> ClientResult<CalendarEvent> {
        let url = self.api.url_with_segment(EVENTS_PATH, event_id)?;
        self.api
            .send_json(
                self.api.request(Method::PUT, url).json(update),
                "update calendar event",
            )
            .await
    }

    async fn delete_event(&self, event_id: &str) -> ClientResult<()> {
        let url = self.api.url_with_segment(EVENTS_PATH, event_id)?;
        self.api
            .send(
                self.api.request(Method::DELETE, url),
                "delete calendar event",
            )
            .await?;
        info!("Deleted calendar event {}", event_id);
        Ok(())
    }
}
