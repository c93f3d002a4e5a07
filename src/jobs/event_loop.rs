use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::app::PushWorker;
use crate::domain::event::WorkerEvent;

struct Dispatch {
    event: WorkerEvent,
    reply: Option<oneshot::Sender<Result<()>>>,
}

/// Sending side of a running worker.
pub struct WorkerHandle {
    events: mpsc::Sender<Dispatch>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

pub fn spawn(worker: PushWorker, queue_capacity: usize) -> WorkerHandle {
    let (events_tx, events_rx) = mpsc::channel(queue_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run(worker, events_rx, shutdown_rx));

    WorkerHandle {
        events: events_tx,
        shutdown: shutdown_tx,
        task,
    }
}

impl WorkerHandle {
    /// Queues an event without waiting for it to be handled.
    pub async fn dispatch(&self, event: impl Into<WorkerEvent>) -> Result<()> {
        self.events
            .send(Dispatch {
                event: event.into(),
                reply: None,
            })
            .await
            .map_err(|_| anyhow!("worker is no longer running"))
    }

    /// Queues an event and waits for its handler to settle.
    pub async fn dispatch_and_wait(&self, event: impl Into<WorkerEvent>) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events
            .send(Dispatch {
                event: event.into(),
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| anyhow!("worker is no longer running"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("worker stopped before the event settled"))?
    }

    /// Requests teardown and waits for the worker to stop. Events already
    /// dispatched settle first.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown.send(true);
        drop(self.events);
        self.task
            .await
            .map_err(|err| anyhow!("worker task failed: {}", err))
    }
}

async fn run(
    worker: PushWorker,
    mut events: mpsc::Receiver<Dispatch>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("push worker started");
    loop {
        tokio::select! {
            // Queued events win over teardown, and a handler is awaited to
            // completion inside its arm.
            biased;

            received = events.recv() => {
                let Some(dispatch) = received else { break };
                handle(&worker, dispatch).await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!("push worker stopped");
}

async fn handle(worker: &PushWorker, dispatch: Dispatch) {
    let kind = dispatch.event.kind();
    let result = worker.handle(&dispatch.event).await;
    match &result {
        Ok(()) => debug!(event = kind, "event settled"),
        Err(err) => error!(error = ?err, event = kind, "event rejected"),
    }

    if let Some(reply) = dispatch.reply {
        let _ = reply.send(result);
    }
}
