//! host/
//! Execution hosts: one request/response contract, two places to run it.
//!
//! - `WorkerHost` keeps the codec on a dedicated thread.
//! - `InlineHost` runs it on the caller's thread.
//!
//! Both delegate to the same `Dispatcher`, so results and error names are
//! identical. A host owns its sessions; dropping it discards them.

pub mod protocol;
pub mod dispatch;
pub mod inline;
pub mod worker;

use tracing::warn;

pub use protocol::{HostError, Request, Response, WORKER_UNAVAILABLE};
pub use dispatch::Dispatcher;
pub use inline::InlineHost;
pub use worker::WorkerHost;

use crate::config::{CodecConfig, HostMode};
use crate::telemetry::ProgressFn;
use crate::types::CodecResult;

pub trait CryptoHost: Send {
    fn call(&mut self, request: Request) -> Result<Response, HostError>;

    /// Where this host actually runs requests.
    fn mode(&self) -> HostMode;
}

/// Open a host as configured. A worker that cannot be spawned falls back to
/// inline execution.
pub fn open_host(config: &CodecConfig) -> CodecResult<Box<dyn CryptoHost>> {
    open_host_with_progress(config, None)
}

pub fn open_host_with_progress(
    config: &CodecConfig,
    progress: Option<ProgressFn>,
) -> CodecResult<Box<dyn CryptoHost>> {
    config.validate()?;
    match config.host_mode {
        HostMode::Inline => Ok(Box::new(InlineHost::with_progress(config, progress))),
        HostMode::Worker => match WorkerHost::spawn_with_progress(config, progress.clone()) {
            Ok(host) => Ok(Box::new(host)),
            Err(e) => {
                warn!(error = %e, "worker host unavailable, running inline");
                Ok(Box::new(InlineHost::with_progress(config, progress)))
            }
        },
    }
}
