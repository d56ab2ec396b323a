use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type FavouriteId = u64;
pub type RequestId = u64;

/// A collected website as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    pub id: FavouriteId,
    pub link: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default = "default_visible")]
    pub visible: i32,
}

fn default_visible() -> i32 {
    1
}

/// Common response wrapper: `errorCode == 0` means the call succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error_code: i32,
    #[serde(default)]
    pub error_msg: String,
}

impl<T> Envelope<T> {
    /// Splits the envelope into its payload or a server-side rejection.
    pub fn into_result(self) -> Result<Option<T>, RemoteError> {
        if self.error_code == 0 {
            Ok(self.data)
        } else {
            Err(RemoteError::Server {
                code: self.error_code,
                message: self.error_msg,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    InvalidUrl,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64 },
    Network,
    Decode,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::InvalidUrl => write!(f, "invalid url"),
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            TransportKind::Network => write!(f, "network error"),
            TransportKind::Decode => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportFailure {
    pub kind: TransportKind,
    pub message: String,
}

impl TransportFailure {
    pub fn new(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error(transparent)]
    Transport(#[from] TransportFailure),
    #[error("server error {code}: {message}")]
    Server { code: i32, message: String },
}

impl RemoteError {
    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        RemoteError::Transport(TransportFailure::new(kind, message))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<Favourite>, RemoteError>,
    },
    DeleteCompleted {
        request_id: RequestId,
        id: FavouriteId,
        result: Result<(), RemoteError>,
    },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::FetchCompleted { request_id, .. }
            | EngineEvent::DeleteCompleted { request_id, .. } => *request_id,
        }
    }
}
