//! Events exchanged with a line-oriented host
//!
//! The adapter binary reads one [`HostEvent`] per stdin line and writes one
//! [`HostOutput`] per stdout line, both JSON encoded.

use serde::{Deserialize, Serialize};

/// Context identifier used by the stdio host
pub type ContextId = u64;

/// Events a host reports to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The engine now serves `context`
    Activate { context: ContextId },

    /// The engine no longer serves `context`
    Deactivate { context: ContextId },

    /// Input state of `context` should be discarded
    Reset { context: ContextId },

    /// A key event in `context`, chord written like `Control+Alt+v`
    Key {
        context: ContextId,
        key: String,
        #[serde(default)]
        release: bool,
    },
}

/// Results the engine reports back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostOutput {
    /// Insert `text` into `context`
    Commit { context: ContextId, text: String },

    /// Whether a key event was taken by the engine
    KeyResult {
        context: ContextId,
        key: String,
        consumed: bool,
    },
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostEvent::Activate { context } => write!(f, "ACTIVATE ({context})"),
            HostEvent::Deactivate { context } => write!(f, "DEACTIVATE ({context})"),
            HostEvent::Reset { context } => write!(f, "RESET ({context})"),
            HostEvent::Key {
                context,
                key,
                release,
            } => {
                let action = if *release { "RELEASE" } else { "PRESS" };
                write!(f, "KEY_{action} {key} ({context})")
            }
        }
    }
}
