use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        result: Result<Vec<String>, RecommendError>,
    },
    /// The request was cancelled before it settled; no result follows.
    Cancelled { request_id: RequestId },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::Completed { request_id, .. } | EngineEvent::Cancelled { request_id } => {
                *request_id
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RecommendError {
    pub kind: FailureKind,
    pub message: String,
}

impl RecommendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Parse, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Non-2xx status. `message` is the body's `error` field, when it had one.
    Server { status: u16, message: Option<String> },
    /// Body was not JSON or did not match the configured response contract.
    Parse,
}

impl FailureKind {
    /// True for failures where no usable response came back.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidUrl
                | FailureKind::Network
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Server { status, message } => match message {
                Some(message) => write!(f, "server error {status} ({message})"),
                None => write!(f, "server error {status}"),
            },
            FailureKind::Parse => write!(f, "malformed response"),
        }
    }
}
