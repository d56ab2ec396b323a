use std::future::Future;
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use sync_logging::{sync_debug, sync_info, sync_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, FavouriteId, FavouritesSource, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Fetch { request_id: RequestId },
    Delete { request_id: RequestId, id: FavouriteId },
    /// Drop every in-flight call; none of them will report back.
    CancelAll,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] io::Error),
}

/// Runs remote calls on a private tokio runtime and hands completions back
/// over a channel, so the owning thread decides when results are applied.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn FavouritesSource>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("favourites-io")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("favourites-engine".to_string())
            .spawn(move || run(runtime, source, cmd_rx, event_tx))
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            sync_warn!("Engine thread is gone; command dropped");
        }
    }

    pub fn fetch(&self, request_id: RequestId) {
        self.send(EngineCommand::Fetch { request_id });
    }

    pub fn delete(&self, request_id: RequestId, id: FavouriteId) {
        self.send(EngineCommand::Delete { request_id, id });
    }

    pub fn cancel_all(&self) {
        self.send(EngineCommand::CancelAll);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run(
    runtime: tokio::runtime::Runtime,
    source: Arc<dyn FavouritesSource>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut cancel = CancellationToken::new();

    while let Ok(command) = cmd_rx.recv() {
        let source = source.clone();
        match command {
            EngineCommand::CancelAll => {
                sync_info!("Cancelling in-flight remote calls");
                cancel.cancel();
                cancel = CancellationToken::new();
            }
            EngineCommand::Fetch { request_id } => {
                let call = async move { fetch(source.as_ref(), request_id).await };
                runtime.spawn(cancellable(cancel.clone(), event_tx.clone(), call));
            }
            EngineCommand::Delete { request_id, id } => {
                let call = async move { delete(source.as_ref(), request_id, id).await };
                runtime.spawn(cancellable(cancel.clone(), event_tx.clone(), call));
            }
        }
    }

    // Handle dropped: nobody is left to receive completions.
    cancel.cancel();
    runtime.shutdown_background();
}

/// Races `call` against `token`; a cancelled call never reports back.
async fn cancellable<F>(token: CancellationToken, event_tx: mpsc::Sender<EngineEvent>, call: F)
where
    F: Future<Output = EngineEvent>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            sync_debug!("Remote call cancelled before completion");
        }
        event = call => {
            let _ = event_tx.send(event);
        }
    }
}

async fn fetch(source: &dyn FavouritesSource, request_id: RequestId) -> EngineEvent {
    sync_info!("Fetching favourites request_id={}", request_id);
    let result = source.fetch_favourites().await;
    match &result {
        Ok(list) => sync_info!(
            "Fetched {} favourites request_id={}",
            list.len(),
            request_id
        ),
        Err(err) => sync_warn!("Fetch failed request_id={}: {}", request_id, err),
    }
    EngineEvent::FetchCompleted { request_id, result }
}

async fn delete(source: &dyn FavouritesSource, request_id: RequestId, id: FavouriteId) -> EngineEvent {
    sync_info!("Deleting favourite id={} request_id={}", id, request_id);
    let result = source.delete_favourite(id).await;
    if let Err(err) = &result {
        sync_warn!("Delete of {} failed request_id={}: {}", id, request_id, err);
    }
    EngineEvent::DeleteCompleted {
        request_id,
        id,
        result,
    }
}
