//! Favourites core: pure list synchronization state machine and view-state derivation.
mod action;
mod effect;
mod entry;
mod fetch_state;
mod list_model;
mod msg;
mod state;
mod update;
mod view_model;

pub use action::{EditorRequest, EntryAction};
pub use effect::{Effect, Notice};
pub use entry::{Entry, EntryId};
pub use fetch_state::{FetchState, RemoteFailure};
pub use list_model::ListModel;
pub use msg::Msg;
pub use state::{ActiveLoad, AppState, RequestId, SessionPhase};
pub use update::update;
pub use view_model::{derive_view, ViewState};
