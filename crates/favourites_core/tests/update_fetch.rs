use favourites_core::{
    update, AppState, Effect, Entry, FetchState, Msg, RemoteFailure, RequestId, ViewState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    sync_logging::initialize_for_tests();
}

fn entries(ids: &[(u64, &str)]) -> Vec<Entry> {
    ids.iter()
        .map(|(id, link)| Entry::new(*id, *link, format!("site {id}")))
        .collect()
}

fn fetch_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchFavourites { request_id } => Some(*request_id),
            _ => None,
        })
        .expect("fetch effect")
}

fn attach() -> (AppState, RequestId) {
    let (state, effects) = update(AppState::new(), Msg::Attach);
    (state, fetch_request(&effects))
}

fn attach_with(list: Vec<Entry>) -> AppState {
    let (state, request_id) = attach();
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Ok(list),
        },
    );
    state
}

#[test]
fn attach_starts_initial_load_with_overlay() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Attach);

    assert_eq!(effects, vec![Effect::FetchFavourites { request_id: 1 }]);
    assert_eq!(state.fetch_state(), &FetchState::Running);
    let view = state.view();
    assert!(view.loading_overlay);
    assert!(!view.refreshing);
    assert!(!view.empty_banner);
    assert!(state.consume_dirty());
}

#[test]
fn initial_load_success_publishes_entries() {
    init_logging();
    let (state, request_id) = attach();
    let (state, effects) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Ok(entries(&[(1, "a"), (2, "b")])),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.fetch_state(), &FetchState::Success);
    assert_eq!(
        state.view(),
        ViewState {
            refreshing: false,
            loading_overlay: false,
            error_banner: false,
            empty_banner: false,
            entries: entries(&[(1, "a"), (2, "b")]),
        }
    );
}

#[test]
fn empty_success_shows_empty_banner() {
    init_logging();
    let state = attach_with(Vec::new());
    let view = state.view();
    assert!(view.empty_banner);
    assert!(!view.error_banner);
}

#[test]
fn refresh_failure_keeps_previous_entries() {
    init_logging();
    let state = attach_with(entries(&[(1, "a")]));

    let (state, effects) = update(state, Msg::RefreshGesture);
    let request_id = fetch_request(&effects);
    let running = state.view();
    assert!(running.refreshing);
    assert!(!running.loading_overlay);
    assert!(!running.empty_banner);

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Err(RemoteFailure::transport("connection refused")),
        },
    );

    assert_eq!(
        state.fetch_state(),
        &FetchState::Failed(RemoteFailure::transport("connection refused"))
    );
    let view = state.view();
    assert_eq!(view.entries, entries(&[(1, "a")]));
    assert!(view.error_banner);
    assert!(!view.refreshing);
    assert!(!view.loading_overlay);
}

#[test]
fn server_failure_also_fails_the_fetch() {
    init_logging();
    let (state, request_id) = attach();
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Err(RemoteFailure::server(-1001, "please login")),
        },
    );
    assert!(state.fetch_state().is_failed());
    assert!(state.view().error_banner);
}

#[test]
fn retry_after_failure_reenters_running_and_recovers() {
    init_logging();
    let (state, request_id) = attach();
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Err(RemoteFailure::transport("timeout")),
        },
    );

    let (state, effects) = update(state, Msg::ErrorRetry);
    let retry_id = fetch_request(&effects);
    assert_ne!(retry_id, request_id);
    assert_eq!(state.fetch_state(), &FetchState::Running);
    assert!(!state.view().error_banner);

    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id: retry_id,
            result: Ok(entries(&[(7, "x")])),
        },
    );
    assert_eq!(state.fetch_state(), &FetchState::Success);
    assert_eq!(state.view().entries.len(), 1);
}

#[test]
fn overlapping_load_is_rejected() {
    init_logging();
    let (state, _request_id) = attach();
    let before = state.clone();

    let (state, effects) = update(state, Msg::RefreshGesture);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, request_id) = attach();
    let (mut state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id: request_id + 10,
            result: Ok(entries(&[(1, "a")])),
        },
    );
    state.consume_dirty();

    assert_eq!(state.fetch_state(), &FetchState::Running);
    assert!(state.view().entries.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn fetch_state_always_settles_after_each_completion() {
    init_logging();
    let outcomes: Vec<Result<Vec<Entry>, RemoteFailure>> = vec![
        Ok(entries(&[(1, "a")])),
        Err(RemoteFailure::transport("offline")),
        Err(RemoteFailure::server(-1, "busy")),
        Ok(Vec::new()),
        Ok(entries(&[(2, "b"), (3, "c")])),
    ];

    let (mut state, mut request_id) = attach();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        let expect_success = outcome.is_ok();
        let before = state.view().entries;
        let (next, _) = update(
            state,
            Msg::FetchCompleted {
                request_id,
                result: outcome,
            },
        );
        state = next;

        match state.fetch_state() {
            FetchState::Success => assert!(expect_success, "step {index}"),
            FetchState::Failed(_) => {
                assert!(!expect_success, "step {index}");
                assert_eq!(state.view().entries, before, "failure kept the list");
            }
            other => panic!("step {index}: unexpected state {other:?}"),
        }

        let view = state.view();
        assert_eq!(view.empty_banner, view.entries.is_empty());

        let (next, effects) = update(state, Msg::RefreshGesture);
        state = next;
        request_id = fetch_request(&effects);
        let view = state.view();
        assert!(!view.empty_banner, "never empty while running");
    }
}
