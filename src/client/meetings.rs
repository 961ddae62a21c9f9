use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use super::{mime_type_for_extension, ApiClient, ClientError, ClientResult, MeetingApi};
use crate::models::{
    ActionItem, Decision, DeleteReceipt, Meeting, MeetingId, MeetingQuery, MeetingUpdate,
    NewMeeting, SummaryOutcome, TranscriptBody, TranscriptionOutcome, UploadReceipt,
};

/// Multipart field the server reads the recording from.
pub const AUDIO_FIELD: &str = "audio";

/// Client for `/meetings` and its per-meeting sub-resources.
#[derive(Debug, Clone)]
pub struct MeetingClient {
    api: ApiClient,
}

impl MeetingClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn audio_form(audio_path: &Path) -> ClientResult<Form> {
        let data = fs::read(audio_path).await.map_err(|source| ClientError::Io {
            path: audio_path.to_path_buf(),
            source,
        })?;

        let filename = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        let mime_type = audio_path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(mime_type_for_extension)
            .unwrap_or("application/octet-stream");

        debug!(
            "Prepared {} ({} bytes, {}) for upload",
            filename,
            data.len(),
            mime_type
        );

        let part = Part::bytes(data)
            .file_name(filename)
            .mime_str(mime_type)
            .map_err(|source| ClientError::Request {
                context: "prepare audio upload",
                source,
            })?;

        Ok(Form::new().part(AUDIO_FIELD, part))
    }
}

#[async_trait]
impl MeetingApi for MeetingClient {
    async fn list_meetings(&self, query: &MeetingQuery) -> ClientResult<Vec<Meeting>> {
        self.api
            .send_json(self.api.get("/meetings").query(query), "load meetings")
            .await
    }

    async fn get_meeting(&self, id: MeetingId) -> ClientResult<Meeting> {
        self.api
            .send_json(self.api.get(&format!("/meetings/{id}")), "load meeting")
            .await
    }

    async fn create_meeting(&self, meeting: &NewMeeting) -> ClientResult<Meeting> {
        let created: Meeting = self
            .api
            .send_json(self.api.post("/meetings").json(meeting), "create meeting")
            .await?;
        info!("Created meeting {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn update_meeting(&self, id: MeetingId, update: &MeetingUpdate) -> ClientResult<Meeting> {
        self.api
            .send_json(
                self.api.put(&format!("/meetings/{id}")).json(update),
                "update meeting",
            )
            .await
    }

    async fn delete_meeting(&self, id: MeetingId) -> ClientResult<DeleteReceipt> {
        let receipt: DeleteReceipt = self
            .api
            .send_lenient(self.api.delete(&format!("/meetings/{id}")), "delete meeting")
            .await?;
        info!("Deleted meeting {}", id);
        Ok(receipt)
    }

    async fn upload_audio(&self, id: MeetingId, audio_path: &Path) -> ClientResult<UploadReceipt> {
        info!("Uploading {:?} for meeting {}", audio_path, id);
        let form = Self::audio_form(audio_path).await?;
        self.api
            .send_lenient(
                self.api.post(&format!("/meetings/{id}/audio")).multipart(form),
                "upload audio",
            )
            .await
    }

    async fn transcribe(
        &self,
        id: MeetingId,
        provider: Option<&str>,
    ) -> ClientResult<TranscriptionOutcome> {
        let mut request = self
            .api
            .post(&format!("/meetings/{id}/transcribe"))
            .json(&json!({}));
        if let Some(provider) = provider {
            request = request.query(&[("provider", provider)]);
        }
        self.api.send_lenient(request, "transcribe audio").await
    }

    async fn get_transcript(&self, id: MeetingId) -> ClientResult<String> {
        let body: TranscriptBody = self
            .api
            .send_json(
                self.api.get(&format!("/meetings/{id}/transcript")),
                "load transcript",
            )
            .await?;
        Ok(body.transcript)
    }

    async fn summarize(&self, id: MeetingId) -> ClientResult<SummaryOutcome> {
        self.api
            .send_lenient(
                self.api
                    .post(&format!("/meetings/{id}/summarize"))
                    .json(&json!({})),
                "generate summary",
            )
            .await
    }

    async fn action_items(&self, id: MeetingId) -> ClientResult<Vec<ActionItem>> {
        self.api
            .send_json(
                self.api.get(&format!("/meetings/{id}/action-items")),
                "load action items",
            )
            .await
    }

    async fn decisions(&self, id: MeetingId) -> ClientResult<Vec<Decision>> {
        self.api
            .send_json(
                self.api.get(&format!("/meetings/{id}/decisions")),
                "load decisions",
            )
            .await
    }
}
