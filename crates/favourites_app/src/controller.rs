//! Session driver: feeds intents and remote completions through the pure
//! reducer and carries out the effects it asks for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use favourites_core::{
    update, AppState, Effect, Entry, EntryAction, EntryId, Msg, RemoteFailure, RequestId,
    SessionPhase, ViewState,
};
use favourites_engine::{
    EngineError, EngineEvent, EngineHandle, Favourite, FavouritesSource, RemoteError,
};
use sync_logging::{sync_debug, sync_info, sync_trace, sync_warn};

use crate::overlay::OverlayGuard;
use crate::ports::Ports;

type RenderFn = Box<dyn FnMut(&ViewState) + Send>;

/// Owns one screen session's list state.
///
/// Everything here runs on the owning thread; remote results only take effect
/// when the owner calls [`SyncController::pump`] or
/// [`SyncController::wait_for_event`].
pub struct SyncController {
    state: AppState,
    engine: EngineHandle,
    ports: Ports,
    render: Option<RenderFn>,
    overlay_guards: HashMap<RequestId, OverlayGuard>,
}

impl SyncController {
    pub fn new(source: Arc<dyn FavouritesSource>, ports: Ports) -> Result<Self, EngineError> {
        Ok(Self {
            state: AppState::new(),
            engine: EngineHandle::new(source)?,
            ports,
            render: None,
            overlay_guards: HashMap::new(),
        })
    }

    /// Begins the session and starts the initial load.
    pub fn attach<F>(&mut self, render: F)
    where
        F: FnMut(&ViewState) + Send + 'static,
    {
        if self.state.phase() != SessionPhase::Detached {
            sync_warn!("attach ignored in phase {:?}", self.state.phase());
            return;
        }
        self.render = Some(Box::new(render));
        self.dispatch(Msg::Attach);
    }

    pub fn on_refresh_gesture(&mut self) {
        self.dispatch(Msg::RefreshGesture);
    }

    pub fn on_error_retry(&mut self) {
        self.dispatch(Msg::ErrorRetry);
    }

    pub fn on_delete_requested(&mut self, id: EntryId) {
        self.dispatch(Msg::DeleteRequested { id });
    }

    pub fn on_entry_tapped(&mut self, id: EntryId) {
        self.dispatch(Msg::EntryTapped { id });
    }

    pub fn on_entry_long_pressed(&mut self, id: EntryId) {
        self.dispatch(Msg::EntryLongPressed { id });
    }

    pub fn on_entry_action(&mut self, id: EntryId, action: EntryAction) {
        self.dispatch(Msg::EntryActionChosen { id, action });
    }

    pub fn on_add_gesture(&mut self) {
        self.dispatch(Msg::AddGesture);
    }

    /// The host's editor saved a new or edited entry.
    pub fn on_editor_completed(&mut self) {
        self.dispatch(Msg::EditorCompleted);
    }

    /// Cancels in-flight work; no render happens after this returns.
    pub fn on_teardown(&mut self) {
        self.dispatch(Msg::Teardown);
    }

    /// Applies every completion that has already arrived. Returns how many
    /// were applied; completions discarded after teardown are not counted.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            if self.apply_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Blocks up to `timeout` for one completion. Returns `true` only if it
    /// was applied to the session.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        self.engine
            .recv_timeout(timeout)
            .is_some_and(|event| self.apply_event(event))
    }

    pub fn view(&self) -> ViewState {
        self.state.view()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn apply_event(&mut self, event: EngineEvent) -> bool {
        if self.state.phase() == SessionPhase::TornDown {
            sync_debug!(
                "Discarding completion request_id={} after teardown",
                event.request_id()
            );
            return false;
        }

        let msg = match event {
            EngineEvent::FetchCompleted { request_id, result } => Msg::FetchCompleted {
                request_id,
                result: result
                    .map(|list| list.into_iter().map(map_favourite).collect())
                    .map_err(map_remote_error),
            },
            EngineEvent::DeleteCompleted {
                request_id, result, ..
            } => {
                // Dismiss before anything else reacts, whatever the outcome.
                self.overlay_guards.remove(&request_id);
                Msg::DeleteCompleted {
                    request_id,
                    result: result.map_err(map_remote_error),
                }
            }
        };
        self.dispatch(msg);
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        sync_trace!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.run_effects(effects);
        if was_dirty {
            self.render_view();
        }
    }

    fn render_view(&mut self) {
        if self.state.phase() == SessionPhase::TornDown {
            return;
        }
        if let Some(render) = self.render.as_mut() {
            let view = self.state.view();
            render(&view);
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchFavourites { request_id } => {
                    self.engine.fetch(request_id);
                }
                Effect::DeleteFavourite { request_id, id } => {
                    // Show before the call goes out.
                    let guard = self.ports.overlay.acquire();
                    self.overlay_guards.insert(request_id, guard);
                    self.engine.delete(request_id, id);
                }
                Effect::CancelInFlight => {
                    sync_info!(
                        "Tearing down session, releasing {} overlay holds",
                        self.overlay_guards.len()
                    );
                    self.engine.cancel_all();
                    self.overlay_guards.clear();
                    self.render = None;
                }
                Effect::Notify(notice) => self.ports.notifier.notify(notice.message()),
                Effect::OpenDetail { link } => self.ports.navigator.open_detail(&link),
                Effect::PresentActions { id, actions } => {
                    self.ports.navigator.present_actions(id, &actions)
                }
                Effect::OpenEditor(request) => self.ports.navigator.open_editor(&request),
            }
        }
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        if self.state.phase() != SessionPhase::TornDown {
            self.on_teardown();
        }
    }
}

fn map_favourite(favourite: Favourite) -> Entry {
    Entry {
        id: favourite.id,
        link: favourite.link,
        name: favourite.name,
        icon: favourite.icon,
        desc: favourite.desc,
        order: favourite.order,
        visible: favourite.visible != 0,
        user_id: favourite.user_id,
    }
}

fn map_remote_error(err: RemoteError) -> RemoteFailure {
    match err {
        RemoteError::Transport(failure) => RemoteFailure::transport(failure.to_string()),
        RemoteError::Server { code, message } => RemoteFailure::server(code, message),
    }
}
