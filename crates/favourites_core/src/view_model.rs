use crate::{ActiveLoad, Entry, FetchState, ListModel};

/// Everything the list screen needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub refreshing: bool,
    pub loading_overlay: bool,
    pub error_banner: bool,
    pub empty_banner: bool,
    pub entries: Vec<Entry>,
}

/// Pure projection of the synchronization state onto the four UI flags.
///
/// `active_load` is the in-flight fetch (if any) and `pending_deletes` the
/// number of deletes awaiting confirmation. Nothing else feeds the result.
pub fn derive_view(
    fetch: &FetchState,
    list: &ListModel,
    active_load: Option<ActiveLoad>,
    pending_deletes: usize,
) -> ViewState {
    let running = fetch.is_running();
    let initial_in_flight = running && active_load.is_some_and(|load| load.initial);
    let refresh_in_flight = running && active_load.is_some_and(|load| !load.initial);

    ViewState {
        refreshing: refresh_in_flight,
        loading_overlay: initial_in_flight || pending_deletes > 0,
        error_banner: fetch.is_failed(),
        empty_banner: list.is_empty() && !running,
        entries: list.entries().to_vec(),
    }
}
