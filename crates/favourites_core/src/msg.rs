use crate::{Entry, EntryAction, EntryId, RemoteFailure, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Screen opened; starts the initial load.
    Attach,
    /// Pull-to-refresh gesture.
    RefreshGesture,
    /// User tapped the retry control on the error banner.
    ErrorRetry,
    /// User tapped an entry row.
    EntryTapped { id: EntryId },
    /// User long-pressed an entry row.
    EntryLongPressed { id: EntryId },
    /// User picked an action from the long-press menu.
    EntryActionChosen { id: EntryId, action: EntryAction },
    /// Direct delete request (bypassing the menu).
    DeleteRequested { id: EntryId },
    /// User asked to add a new website.
    AddGesture,
    /// The external editor created or updated an entry.
    EditorCompleted,
    /// Remote list call finished.
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<Entry>, RemoteFailure>,
    },
    /// Remote delete call finished.
    DeleteCompleted {
        request_id: RequestId,
        result: Result<(), RemoteFailure>,
    },
    /// Screen torn down; nothing may change afterwards.
    Teardown,
}
