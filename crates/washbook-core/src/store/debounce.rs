//! Debounced save worker.
//!
//! A single background task owns the pending snapshot and performs every
//! write, so debounced saves, immediate commits and flushes are serialized and
//! a superseded snapshot is never written. A snapshot whose write failed is
//! kept until a later flush, commit or newer change replaces it.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::storage::PersistenceAdapter;

enum SaveCommand {
    /// Replace the pending snapshot and restart the quiet window
    Schedule(Arc<Ledger>),
    /// Drop any pending snapshot and write this one now
    Commit(Arc<Ledger>, oneshot::Sender<Result<()>>),
    /// Write the pending snapshot now, if there is one
    Flush(oneshot::Sender<Result<()>>),
}

/// Handle to the save worker. Dropping it cancels any pending save.
pub(crate) struct SaveWorker {
    commands: mpsc::UnboundedSender<SaveCommand>,
    handle: JoinHandle<()>,
}

impl SaveWorker {
    /// Start the worker on the current tokio runtime.
    pub(crate) fn spawn(adapter: PersistenceAdapter, window: Duration) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(adapter, window, receiver));
        Self { commands, handle }
    }

    /// Queue `snapshot` for a debounced write.
    pub(crate) fn schedule(&self, snapshot: Arc<Ledger>) {
        if self.commands.send(SaveCommand::Schedule(snapshot)).is_err() {
            error!("save worker stopped; change will not be persisted");
        }
    }

    /// Cancel any pending save and persist `snapshot` immediately.
    pub(crate) async fn commit(&self, snapshot: Arc<Ledger>) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(SaveCommand::Commit(snapshot, reply))?;
        response.await.map_err(|_| worker_gone())?
    }

    /// Persist the pending snapshot now instead of waiting for the window.
    pub(crate) async fn flush(&self) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(SaveCommand::Flush(reply))?;
        response.await.map_err(|_| worker_gone())?
    }

    fn send(&self, command: SaveCommand) -> Result<()> {
        self.commands.send(command).map_err(|_| worker_gone())
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn worker_gone() -> LedgerError {
    LedgerError::Persistence("save worker is not running".to_string())
}

async fn run(
    adapter: PersistenceAdapter,
    window: Duration,
    mut commands: mpsc::UnboundedReceiver<SaveCommand>,
) {
    // Unsaved snapshot. Stays set after a failed write so the next flush retries it.
    let mut pending: Option<Arc<Ledger>> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        let command = match deadline {
            Some(at) => {
                tokio::select! {
                    biased;
                    command = commands.recv() => command,
                    _ = sleep_until(at) => {
                        deadline = None;
                        if let Some(snapshot) = pending.take() {
                            if let Err(err) = write(&adapter, &snapshot).await {
                                error!("debounced save failed: {}", err);
                                pending = Some(snapshot);
                            }
                        }
                        continue;
                    }
                }
            }
            None => commands.recv().await,
        };

        let Some(command) = command else {
            if pending.is_some() {
                debug!("store closed; discarding pending save");
            }
            break;
        };

        match command {
            SaveCommand::Schedule(snapshot) => {
                pending = Some(snapshot);
                deadline = Some(Instant::now() + window);
            }
            SaveCommand::Commit(snapshot, reply) => {
                deadline = None;
                if pending.take().is_some() {
                    debug!("pending save superseded by commit");
                }
                let result = write(&adapter, &snapshot).await;
                if result.is_err() {
                    pending = Some(snapshot);
                }
                let _ = reply.send(result);
            }
            SaveCommand::Flush(reply) => {
                deadline = None;
                let result = match pending.take() {
                    Some(snapshot) => {
                        let result = write(&adapter, &snapshot).await;
                        if result.is_err() {
                            pending = Some(snapshot);
                        }
                        result
                    }
                    None => Ok(()),
                };
                let _ = reply.send(result);
            }
        }
    }
}

/// Run the blocking file write off the async worker threads.
async fn write(adapter: &PersistenceAdapter, snapshot: &Arc<Ledger>) -> Result<()> {
    let adapter = adapter.clone();
    let snapshot = snapshot.clone();
    tokio::task::spawn_blocking(move || adapter.save(&snapshot))
        .await
        .map_err(|e| LedgerError::Persistence(format!("save task failed: {}", e)))?
}
