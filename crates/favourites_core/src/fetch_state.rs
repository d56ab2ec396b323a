use std::fmt;

/// Why a remote call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// No response worth interpreting: no network, timeout, bad status, garbage body.
    Transport { message: String },
    /// Well-formed response saying the operation did not happen.
    Server { code: i32, message: String },
}

impl RemoteFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn server(code: i32, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteFailure::Transport { message } => write!(f, "transport failure: {message}"),
            RemoteFailure::Server { code, message } => {
                write!(f, "server rejected request ({code}): {message}")
            }
        }
    }
}

/// Status of the most recent list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Running,
    Success,
    Failed(RemoteFailure),
}

impl FetchState {
    pub fn is_running(&self) -> bool {
        matches!(self, FetchState::Running)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }
}
