//! View models for the three meeting screens: list, create and detail.
//!
//! Each holds nothing more than the last server response plus whatever the
//! user has typed. Every action makes one request; on success the response
//! replaces local state, on failure the error is logged and handed back.
//! There is no conflict detection, so the last response to land wins.

use thiserror::Error;

use crate::client::ClientError;

pub mod create;
pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod fake;

pub use create::MeetingDraft;
pub use detail::{MeetingDetail, ScheduleForm};
pub use list::MeetingList;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("No meeting loaded")]
    NotLoaded,

    #[error("No audio file selected")]
    NoFileSelected,

    #[error("Meeting has no uploaded audio; upload a recording first")]
    NoAudio,

    #[error("Meeting has no transcript; transcribe it first")]
    NoTranscript,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
