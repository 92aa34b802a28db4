//! Error types for the bridge

use std::path::PathBuf;

/// Errors that abort engine construction
///
/// Everything that can go wrong once the engine is running is absorbed
/// and logged where it happens; only setup failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to create FIFO at {path}: {source}")]
    CreateFifo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open commit FIFO at {path}: {source}")]
    OpenInbound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to register commit FIFO with the event loop: {0}")]
    Watch(#[source] std::io::Error),
}
