use crate::{
    AppState, EditorRequest, Effect, EntryAction, EntryId, Msg, Notice, RemoteFailure,
    SessionPhase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.phase() == SessionPhase::TornDown {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Attach => {
            if state.phase() != SessionPhase::Detached {
                return (state, Vec::new());
            }
            state.attach();
            load(&mut state, true)
        }
        Msg::RefreshGesture | Msg::ErrorRetry | Msg::EditorCompleted => load(&mut state, false),
        Msg::EntryTapped { id } => match state.list().get(id) {
            Some(entry) => vec![Effect::OpenDetail {
                link: entry.link.clone(),
            }],
            None => Vec::new(),
        },
        Msg::EntryLongPressed { id } => {
            if state.list().contains(id) {
                vec![Effect::PresentActions {
                    id,
                    actions: EntryAction::ALL.to_vec(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::EntryActionChosen { id, action } => match action {
            EntryAction::Delete => delete_entry(&mut state, id),
            EntryAction::Edit => match state.list().get(id) {
                Some(entry) => vec![Effect::OpenEditor(EditorRequest::Edit(entry.clone()))],
                None => Vec::new(),
            },
        },
        Msg::DeleteRequested { id } => delete_entry(&mut state, id),
        Msg::AddGesture => {
            if state.phase() == SessionPhase::Attached {
                vec![Effect::OpenEditor(EditorRequest::New)]
            } else {
                Vec::new()
            }
        }
        Msg::FetchCompleted { request_id, result } => {
            state.finish_load(request_id, result);
            Vec::new()
        }
        Msg::DeleteCompleted { request_id, result } => {
            let notice = match &result {
                Ok(()) => Notice::RemoveSucceeded,
                Err(RemoteFailure::Transport { .. }) => Notice::NoNetwork,
                Err(RemoteFailure::Server { message, .. }) => Notice::Server(message.clone()),
            };
            match state.finish_delete(request_id, result.is_ok()) {
                Some(_) => vec![Effect::Notify(notice)],
                None => Vec::new(),
            }
        }
        Msg::Teardown => {
            state.tear_down();
            vec![Effect::CancelInFlight]
        }
    };

    (state, effects)
}

/// Starts a list fetch unless one is already running; overlapping gestures
/// are dropped rather than racing each other.
fn load(state: &mut AppState, initial: bool) -> Vec<Effect> {
    if state.phase() != SessionPhase::Attached || state.active_load().is_some() {
        return Vec::new();
    }
    let request_id = state.begin_load(initial);
    vec![Effect::FetchFavourites { request_id }]
}

/// Issues a confirmed delete; the list only changes once the server agrees.
fn delete_entry(state: &mut AppState, id: EntryId) -> Vec<Effect> {
    if state.phase() != SessionPhase::Attached
        || !state.list().contains(id)
        || state.is_delete_pending(id)
    {
        return Vec::new();
    }
    let request_id = state.begin_delete(id);
    vec![Effect::DeleteFavourite { request_id, id }]
}
