use std::time::Duration;

use crate::i18n::{self, Locale, MessageKey};

/// Typed failure taxonomy for every outbound API call.
///
/// Variants survive all the way to the UI layer so callers can branch on
/// kind (retryable vs. fatal) instead of matching message text. The
/// user-facing string is rendered on demand via [`ApiError::localized_message`].
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("network: {0}")]
    Network(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("server error ({status})")]
    Server { status: u16, body: String },
    #[error("client error ({status})")]
    Client { status: u16, body: String },
    #[error("parse: {0}")]
    Parse(String),
    /// Local input validation failure; never produced by the HTTP layer.
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("unknown: {0}")]
    Unknown(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response payload kept for diagnostics.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Server { body, .. } | ApiError::Client { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Transient failures a caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::Timeout(_) | ApiError::Server { .. }
        )
    }

    /// User-facing message for the given locale. 401/403/404/429 get
    /// distinct texts while staying `Client` internally.
    pub fn localized_message(&self, locale: Locale) -> &'static str {
        let key = match self {
            ApiError::Network(_) => MessageKey::Network,
            ApiError::Timeout(_) => MessageKey::Timeout,
            ApiError::Server { .. } => MessageKey::Server,
            ApiError::Client { status, .. } => match status {
                401 => MessageKey::Unauthorized,
                403 => MessageKey::Forbidden,
                404 => MessageKey::NotFound,
                429 => MessageKey::TooManyRequests,
                _ => MessageKey::BadRequest,
            },
            ApiError::Parse(_) => MessageKey::Parse,
            ApiError::Invalid(_) => MessageKey::Invalid,
            ApiError::Unknown(_) => MessageKey::Unknown,
        };
        i18n::message(key, locale)
    }

    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(timeout)
        } else if e.is_connect() || e.is_request() {
            ApiError::Network(e.to_string())
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Unknown(e.to_string())
        }
    }
}
