use std::collections::BTreeMap;

use crate::view_model::{derive_view, ViewState};
use crate::{Entry, EntryId, FetchState, ListModel, RemoteFailure};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Created but no render callback attached yet.
    #[default]
    Detached,
    Attached,
    /// Terminal; every further message is ignored.
    TornDown,
}

/// The list fetch currently awaiting a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLoad {
    pub request_id: RequestId,
    pub initial: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: SessionPhase,
    list: ListModel,
    fetch: FetchState,
    active_load: Option<ActiveLoad>,
    pending_deletes: BTreeMap<RequestId, EntryId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        derive_view(
            &self.fetch,
            &self.list,
            self.active_load,
            self.pending_deletes.len(),
        )
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn list(&self) -> &ListModel {
        &self.list
    }

    pub fn active_load(&self) -> Option<ActiveLoad> {
        self.active_load
    }

    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    pub fn is_delete_pending(&self, id: EntryId) -> bool {
        self.pending_deletes.values().any(|pending| *pending == id)
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn attach(&mut self) {
        self.phase = SessionPhase::Attached;
        self.dirty = true;
    }

    pub(crate) fn tear_down(&mut self) {
        self.phase = SessionPhase::TornDown;
        self.active_load = None;
        self.pending_deletes.clear();
        self.dirty = true;
    }

    pub(crate) fn begin_load(&mut self, initial: bool) -> RequestId {
        let request_id = self.allocate_request_id();
        self.active_load = Some(ActiveLoad {
            request_id,
            initial,
        });
        self.fetch = FetchState::Running;
        self.dirty = true;
        request_id
    }

    /// Applies a fetch completion. Returns false if it does not belong to the
    /// in-flight load.
    pub(crate) fn finish_load(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<Entry>, RemoteFailure>,
    ) -> bool {
        match self.active_load {
            Some(active) if active.request_id == request_id => {}
            _ => return false,
        }
        self.active_load = None;
        match result {
            Ok(entries) => {
                self.list.set_entries(entries);
                self.fetch = FetchState::Success;
            }
            // The stale list stays visible; only the banner reacts.
            Err(cause) => self.fetch = FetchState::Failed(cause),
        }
        self.dirty = true;
        true
    }

    pub(crate) fn begin_delete(&mut self, id: EntryId) -> RequestId {
        let request_id = self.allocate_request_id();
        self.pending_deletes.insert(request_id, id);
        self.dirty = true;
        request_id
    }

    /// Settles a pending delete, removing the entry only on success. Returns
    /// the entry id, or `None` for an unknown request.
    pub(crate) fn finish_delete(
        &mut self,
        request_id: RequestId,
        succeeded: bool,
    ) -> Option<EntryId> {
        let id = self.pending_deletes.remove(&request_id)?;
        if succeeded {
            self.list.remove(id);
        }
        self.dirty = true;
        Some(id)
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }
}
