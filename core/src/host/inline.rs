// ## 📂 File: `src/host/inline.rs`

use crate::config::{CodecConfig, HostMode};
use crate::host::dispatch::Dispatcher;
use crate::host::protocol::{HostError, Request, Response};
use crate::host::CryptoHost;
use crate::telemetry::ProgressFn;

/// Runs every request synchronously on the caller's thread.
pub struct InlineHost {
    dispatcher: Dispatcher,
}

impl InlineHost {
    pub fn new(config: &CodecConfig) -> Self {
        Self::with_progress(config, None)
    }

    pub fn with_progress(config: &CodecConfig, progress: Option<ProgressFn>) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.clone(), progress),
        }
    }
}

impl CryptoHost for InlineHost {
    fn call(&mut self, request: Request) -> Result<Response, HostError> {
        self.dispatcher.handle(request)
    }

    fn mode(&self) -> HostMode {
        HostMode::Inline
    }
}
