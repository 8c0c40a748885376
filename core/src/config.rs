// ## 📂 File: `src/config.rs`

//! Codec configuration.
//!
//! Loaded from JSON or built in code, always validated before use.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_CAP, MAX_CHUNK_SIZE};
use crate::stream::decoder::DecoderOptions;
use crate::types::{CodecError, CodecResult};

/// Where host requests execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Dedicated background thread.
    #[default]
    Worker,
    /// Caller's thread.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Plaintext bytes per frame (the final frame may be shorter).
    pub chunk_size: usize,
    /// Reject decoded plaintext that begins with the container magic.
    pub reject_nested_container: bool,
    pub host_mode: HostMode,
    /// Bound of the worker host request channel.
    pub queue_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            reject_nested_container: true,
            host_mode: HostMode::default(),
            queue_capacity: DEFAULT_QUEUE_CAP,
        }
    }
}

impl CodecConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_host_mode(mut self, host_mode: HostMode) -> Self {
        self.host_mode = host_mode;
        self
    }

    pub fn validate(&self) -> CodecResult<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(CodecError::Config(format!(
                "chunk_size {} outside 1..={MAX_CHUNK_SIZE}",
                self.chunk_size
            )));
        }
        if self.queue_capacity == 0 {
            return Err(CodecError::Config("queue_capacity must be non-zero".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> CodecResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            reject_nested_container: self.reject_nested_container,
        }
    }
}
