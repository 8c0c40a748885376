// ## 📂 File: `src/host/worker.rs`

//! Long-lived worker thread host.
//!
//! ```text
//! caller --Envelope{id, request}--> [bounded] --> worker thread (Dispatcher)
//! caller <--Reply{id, result}------ [bounded] <--/
//! ```
//!
//! Requests carry a monotonically increasing correlation id and the reply must
//! echo it. Calls block until the reply arrives; one session's requests are
//! therefore never in flight together.

use std::thread::JoinHandle;

use crossbeam::channel::{bounded, Receiver, Sender};
use tracing::{debug, warn};

use crate::config::{CodecConfig, HostMode};
use crate::host::dispatch::Dispatcher;
use crate::host::protocol::{HostError, Request, Response};
use crate::host::CryptoHost;
use crate::telemetry::ProgressFn;
use crate::types::CodecResult;

struct Envelope {
    id: u64,
    request: Request,
}

struct Reply {
    id: u64,
    result: Result<Response, HostError>,
}

pub struct WorkerHost {
    tx: Option<Sender<Envelope>>,
    rx: Receiver<Reply>,
    next_id: u64,
    handle: Option<JoinHandle<()>>,
}

impl WorkerHost {
    pub fn spawn(config: &CodecConfig) -> CodecResult<Self> {
        Self::spawn_with_progress(config, None)
    }

    pub fn spawn_with_progress(config: &CodecConfig, progress: Option<ProgressFn>) -> CodecResult<Self> {
        config.validate()?;

        let (tx, worker_rx) = bounded::<Envelope>(config.queue_capacity);
        let (worker_tx, rx) = bounded::<Reply>(config.queue_capacity);
        let mut dispatcher = Dispatcher::new(config.clone(), progress);

        let handle = std::thread::Builder::new()
            .name("chunkvault-worker".into())
            .spawn(move || {
                while let Ok(Envelope { id, request }) = worker_rx.recv() {
                    let result = dispatcher.handle(request);
                    if worker_tx.send(Reply { id, result }).is_err() {
                        break;
                    }
                }
                debug!("worker host stopped");
            })?;

        debug!(queue_capacity = config.queue_capacity, "worker host started");
        Ok(Self {
            tx: Some(tx),
            rx,
            next_id: 0,
            handle: Some(handle),
        })
    }
}

impl CryptoHost for WorkerHost {
    fn call(&mut self, request: Request) -> Result<Response, HostError> {
        let id = self.next_id;
        self.next_id += 1;

        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| HostError::worker_unavailable("worker host closed"))?;
        tx.send(Envelope { id, request })
            .map_err(|_| HostError::worker_unavailable("worker thread is gone"))?;

        let reply = self
            .rx
            .recv()
            .map_err(|_| HostError::worker_unavailable("worker thread exited without replying"))?;
        if reply.id != id {
            return Err(HostError::worker_unavailable(format!(
                "reply {} does not match request {id}",
                reply.id
            )));
        }
        reply.result
    }

    fn mode(&self) -> HostMode {
        HostMode::Worker
    }
}

impl Drop for WorkerHost {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("worker host thread panicked");
            }
        }
    }
}
