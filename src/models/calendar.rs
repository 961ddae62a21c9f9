use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
}

impl Attendee {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// A calendar event as returned by schedule, update and upcoming.
///
/// The three endpoints disagree on field names (`id` vs `event_id`,
/// `html_link` vs `calendar_link`), so both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(alias = "event_id")]
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "calendar_link")]
    pub html_link: Option<String>,
    #[serde(default)]
    pub meet_link: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /meetings/:id/schedule`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRequest {
    pub start_time: String,
    pub end_time: String,
    pub attendees: Vec<Attendee>,
}

/// Body of `PUT /meetings/calendar/events/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// `GET /meetings/calendar/upcoming` answers either a bare list or `{"events": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UpcomingBody {
    List(Vec<CalendarEvent>),
    Wrapped { events: Vec<CalendarEvent> },
}

impl UpcomingBody {
    pub fn into_events(self) -> Vec<CalendarEvent> {
        match self {
            UpcomingBody::List(events) | UpcomingBody::Wrapped { events } => events,
        }
    }
}
