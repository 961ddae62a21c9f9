use tracing::error;

use super::WorkflowResult;
use crate::client::MeetingApi;
use crate::models::{DeleteReceipt, Meeting, MeetingId, MeetingQuery};

/// The meeting list screen.
#[derive(Debug, Default, Clone)]
pub struct MeetingList {
    meetings: Vec<Meeting>,
}

impl MeetingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Replace the list with whatever the server returns.
    pub async fn load(&mut self, api: &dyn MeetingApi, query: &MeetingQuery) -> WorkflowResult<()> {
        match api.list_meetings(query).await {
            Ok(meetings) => {
                self.meetings = meetings;
                Ok(())
            }
            Err(err) => {
                error!("Error loading meetings: {}", err);
                Err(err.into())
            }
        }
    }

    /// Delete a meeting, dropping it from the local list once the server agrees.
    pub async fn delete(&mut self, api: &dyn MeetingApi, id: MeetingId) -> WorkflowResult<DeleteReceipt> {
        match api.delete_meeting(id).await {
            Ok(receipt) => {
                self.meetings.retain(|m| m.id != id);
                Ok(receipt)
            }
            Err(err) => {
                error!("Error deleting meeting: {}", err);
                Err(err.into())
            }
        }
    }
}
