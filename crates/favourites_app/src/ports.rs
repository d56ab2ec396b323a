//! Collaborators the controller talks to but does not own.

use std::sync::Arc;

use favourites_core::{EditorRequest, EntryAction, EntryId};

use crate::overlay::LoadingOverlay;

/// Transient user-facing message (toast).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Screen routing and modal UI owned by the host.
pub trait Navigator: Send + Sync {
    fn open_detail(&self, link: &str);
    fn present_actions(&self, id: EntryId, actions: &[EntryAction]);
    fn open_editor(&self, request: &EditorRequest);
}

#[derive(Clone)]
pub struct Ports {
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub overlay: LoadingOverlay,
}
