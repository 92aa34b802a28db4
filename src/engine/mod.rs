//! Engine module: the component the host input-method framework drives
//!
//! The host reports activation, deactivation, key presses and commit-FIFO
//! readiness; the engine answers with recognizer commands and text commits.

mod controller;
mod host;

pub use controller::Engine;
pub use host::{Host, IoInterest, KeyEvent, KeyOutcome};
