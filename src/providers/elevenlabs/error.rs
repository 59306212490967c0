use std::fmt;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::{Serialize, Serializer};

pub type Result<T> = std::result::Result<T, ElevenLabsError>;

/// Everything that can go wrong while talking to ElevenLabs.
///
/// Nothing here is retried or recovered from locally: the caller gets the
/// failure exactly as it happened.
#[derive(thiserror::Error, Debug)]
pub enum ElevenLabsError {
    /// Connection, TLS or timeout failures from the underlying transport.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("ElevenLabs API error ({status}): {error}")]
    Api { status: StatusCode, error: ApiError },

    /// A voice sample was not valid base64.
    #[error("Could not decode voice sample `{file_name}`: {source}")]
    Decode {
        file_name: String,
        #[source]
        source: base64::DecodeError,
    },

    /// A voice sample was given a content type that isn't a valid MIME type.
    #[error("Invalid MIME type `{mime_type}` for voice sample `{file_name}`")]
    InvalidMimeType {
        file_name: String,
        mime_type: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The asynchronous configuration factory failed.
    #[error("Configuration factory failed: {0}")]
    Factory(#[from] anyhow::Error),
}

impl ElevenLabsError {
    /// The error payload sent by the remote service, if this is an API error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}

/// The error body returned by the API, kept exactly as received.
///
/// ElevenLabs usually answers with `{"detail": {"status": ..., "message": ...}}`,
/// validation failures put a list under `detail`, and proxies in front of the
/// API may send anything at all. `body` holds the parsed JSON (or the text, as
/// a JSON string, when the body isn't JSON) and `raw` the untouched bytes.
/// Serializing an `ApiError` yields `body` unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiError {
    pub body: serde_json::Value,
    pub raw: Bytes,
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

impl ApiError {
    pub(crate) fn from_body(raw: Bytes) -> Self {
        let body = serde_json::from_slice(&raw).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&raw).into_owned())
        });

        Self { body, raw }
    }

    pub fn detail(&self) -> Option<&serde_json::Value> {
        self.body.get("detail")
    }

    /// The `detail.status` code, e.g. `invalid_api_key`.
    pub fn code(&self) -> Option<&str> {
        self.detail()?.get("status")?.as_str()
    }

    pub fn message(&self) -> Option<&str> {
        match (&self.body, self.detail()) {
            (_, Some(serde_json::Value::String(message))) => Some(message),
            (_, Some(detail)) => detail.get("message")?.as_str(),
            (serde_json::Value::String(message), None) => Some(message),
            (body, None) => body.get("message")?.as_str(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (None, Some(message)) => f.write_str(message),
            _ => write!(f, "{}", self.body),
        }
    }
}
