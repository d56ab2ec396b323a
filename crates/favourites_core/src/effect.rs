use crate::{EditorRequest, EntryAction, EntryId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one remote list call.
    FetchFavourites { request_id: RequestId },
    /// Acquire the shared overlay, then issue one remote delete call.
    DeleteFavourite { request_id: RequestId, id: EntryId },
    /// Cancel every in-flight remote call and release held resources.
    CancelInFlight,
    Notify(Notice),
    OpenDetail { link: String },
    PresentActions { id: EntryId, actions: Vec<EntryAction> },
    OpenEditor(EditorRequest),
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RemoveSucceeded,
    NoNetwork,
    Server(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::RemoveSucceeded => "remove succeed",
            Notice::NoNetwork => "no network",
            Notice::Server(message) => message,
        }
    }
}
