use reqwest::StatusCode;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the meetings API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to {context}: {source}")]
    Request {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {context} ({status}): {message}")]
    Status {
        context: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("Failed to parse {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Pull a readable message out of an error body.
///
/// FastAPI answers `{"detail": "..."}`, or a list of `{"msg": ...}` entries for
/// validation failures. Anything else falls back to the raw body.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(Value::Array(entries)) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
        if let Some(message) = json.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"detail":"Meeting not found"}"#);
        assert_eq!(msg, "Meeting not found");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail":[{"loc":["body","title"],"msg":"field required"},{"msg":"bad date"}]}"#;
        let msg = error_message(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(msg, "field required; bad date");
    }

    #[test]
    fn test_message_field() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error":true,"message":"nope"}"#);
        assert_eq!(msg, "nope");
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
    }
}
