//! HTTP clients for the meetings API.
//!
//! [`ApiClient`] owns the connection pool and the base URL; [`MeetingClient`]
//! and [`CalendarClient`] map one method to one endpoint. The
//! [`MeetingApi`] and [`CalendarApi`] traits are what the workflow layer
//! talks to, so it can be driven by a fake in tests.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::models::{
    ActionItem, CalendarEvent, Decision, DeleteReceipt, EventUpdate, Meeting, MeetingId,
    MeetingQuery, MeetingUpdate, NewMeeting, ScheduleRequest, SummaryOutcome,
    TranscriptionOutcome, UploadReceipt,
};

pub mod calendar;
pub mod error;
pub mod meetings;

pub use calendar::CalendarClient;
pub use error::{ClientError, ClientResult};
pub use meetings::MeetingClient;

/// Shared HTTP plumbing for both API clients.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with no request timeout.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ClientError::Request {
            context: "build HTTP client",
            source,
        })?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Build from the loaded config, letting `api_url` override the configured base URL.
    pub fn from_config(config: &Config, api_url: Option<&str>) -> ClientResult<Self> {
        let base_url = config.base_url(api_url);
        debug!("Using meetings API at {}", base_url);
        Self::with_timeout(&base_url, config.api.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` followed by one percent-encoded segment, for ids that come from the user.
    pub(crate) fn url_with_segment(&self, path: &str, segment: &str) -> ClientResult<Url> {
        let raw = self.url(path);
        let invalid = |message: String| ClientError::InvalidUrl {
            url: raw.clone(),
            message,
        };

        let mut url = Url::parse(&raw).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot have a path".to_string()))?
            .push(segment);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Send a request and return the body of a successful response.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> ClientResult<String> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Request { context, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Request { context, source })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                context,
                status,
                message: error::error_message(status, &body),
            });
        }

        debug!("{} -> {} ({} bytes)", context, status, body.len());
        Ok(body)
    }

    /// Send a request and decode the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> ClientResult<T> {
        let body = self.send(request, context).await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { context, source })
    }

    /// Like [`ApiClient::send_json`], but an empty or unrecognised body yields `T::default()`.
    pub(crate) async fn send_lenient<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> ClientResult<T> {
        let body = self.send(request, context).await?;
        if body.trim().is_empty() {
            return Ok(T::default());
        }
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!("Ignoring unexpected {} body: {}", context, err);
                Ok(T::default())
            }
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// MIME type for an audio file extension, if it is one the server knows.
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "m4a" => Some("audio/mp4"),
        "flac" => Some("audio/flac"),
        "ogg" => Some("audio/ogg"),
        "opus" => Some("audio/opus"),
        "webm" => Some("audio/webm"),
        "aac" => Some("audio/aac"),
        _ => None,
    }
}

/// Meeting endpoints.
#[async_trait]
pub trait MeetingApi: Send + Sync {
    async fn list_meetings(&self, query: &MeetingQuery) -> ClientResult<Vec<Meeting>>;

    async fn get_meeting(&self, id: MeetingId) -> ClientResult<Meeting>;

    async fn create_meeting(&self, meeting: &NewMeeting) -> ClientResult<Meeting>;

    async fn update_meeting(&self, id: MeetingId, update: &MeetingUpdate) -> ClientResult<Meeting>;

    async fn delete_meeting(&self, id: MeetingId) -> ClientResult<DeleteReceipt>;

    async fn upload_audio(&self, id: MeetingId, audio_path: &Path) -> ClientResult<UploadReceipt>;

    async fn transcribe(
        &self,
        id: MeetingId,
        provider: Option<&str>,
    ) -> ClientResult<TranscriptionOutcome>;

    async fn get_transcript(&self, id: MeetingId) -> ClientResult<String>;

    async fn summarize(&self, id: MeetingId) -> ClientResult<SummaryOutcome>;

    async fn action_items(&self, id: MeetingId) -> ClientResult<Vec<ActionItem>>;

    async fn decisions(&self, id: MeetingId) -> ClientResult<Vec<Decision>>;
}

/// Calendar endpoints.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn schedule(
        &self,
        meeting_id: MeetingId,
        request: &ScheduleRequest,
    ) -> ClientResult<CalendarEvent>;

    async fn upcoming(&self, max_results: Option<u32>) -> ClientResult<Vec<CalendarEvent>>;

    async fn update_event(&self, event_id: &str, update: &EventUpdate)
        -> ClientResult<CalendarEvent>;

    async fn delete_event(&self, event_id: &str) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/ ");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/meetings"), "http://localhost:8000/api/meetings");
    }

    #[test]
    fn test_from_config_uses_override() {
        let config = Config::default();
        let client = ApiClient::from_config(&config, Some("http://10.0.0.2:9000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.2:9000/api");
    }

    #[test]
    fn test_segment_is_escaped() {
        let client = ApiClient::new("http://localhost:8000/api/");
        let url = client
            .url_with_segment("/meetings/calendar/events", "a?b/c d")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/meetings/calendar/events/a%3Fb%2Fc%20d"
        );
    }

    #[test]
    fn test_segment_rejects_bad_base() {
        let client = ApiClient::new("not a url");
        assert!(matches!(
            client.url_with_segment("/meetings", "1"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for_extension("MP3"), Some("audio/mpeg"));
        assert_eq!(mime_type_for_extension("wav"), Some("audio/wav"));
        assert_eq!(mime_type_for_extension("txt"), None);
    }
}
