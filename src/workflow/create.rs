use tracing::error;

use super::{WorkflowError, WorkflowResult};
use crate::client::MeetingApi;
use crate::models::{Meeting, NewMeeting};

/// The create-meeting form.
#[derive(Debug, Default, Clone)]
pub struct MeetingDraft {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub participants: Vec<String>,
}

impl MeetingDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    fn to_request(&self) -> NewMeeting {
        NewMeeting {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.clone(),
            duration: self.duration,
            participants: (!self.participants.is_empty()).then(|| self.participants.clone()),
            status: None,
        }
    }

    /// Create the meeting. The caller moves on to the returned meeting's id.
    pub async fn submit(&self, api: &dyn MeetingApi) -> WorkflowResult<Meeting> {
        if self.title.trim().is_empty() {
            return Err(WorkflowError::MissingField("title"));
        }

        api.create_meeting(&self.to_request()).await.map_err(|err| {
            error!("Error creating meeting: {}", err);
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fake::FakeBackend;

    #[tokio::test]
    async fn test_submit_returns_created_meeting() {
        let backend = FakeBackend::default();
        let draft = MeetingDraft::new("  Kickoff ", "Scope and owners");

        let meeting = draft.submit(&backend).await.unwrap();
        assert_eq!(meeting.title, "Kickoff");
        assert_eq!(meeting.description.as_deref(), Some("Scope and owners"));
        assert_eq!(backend.calls(), vec!["create_meeting"]);
    }

    #[tokio::test]
    async fn test_blank_title_sends_nothing() {
        let backend = FakeBackend::default();
        let draft = MeetingDraft::new("   ", "whatever");

        let err = draft.submit(&backend).await.unwrap_err();
        assert!(matches!(err, WorkflowError::MissingField("title")));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_participants_omitted_when_empty() {
        let request = MeetingDraft::new("T", "").to_request();
        assert!(request.participants.is_none());

        let mut draft = MeetingDraft::new("T", "");
        draft.participants = vec!["ana".to_string()];
        assert_eq!(draft.to_request().participants, Some(vec!["ana".to_string()]));
    }
}
