//! asr-ime-bridge: input-method side of a background speech recognizer
//!
//! The engine sits inside a host input-method framework and:
//! - Intercepts configured hotkeys and forwards `toggle` / `command`
//!   verbs to the recognizer over a command FIFO
//! - Reads newline-delimited recognized text from a commit FIFO and
//!   commits each line into the currently focused text context
//!
//! The host framework is abstracted behind [`engine::Host`]; the binary in
//! this crate is one such host, speaking JSON lines over stdio.

pub mod adapter;
pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod focus;
pub mod hotkey;
pub mod lifecycle;

pub use config::Config;
pub use engine::{Engine, Host, IoInterest, KeyEvent, KeyOutcome};
pub use error::BridgeError;
pub use focus::FocusTracker;
pub use hotkey::{Chord, HotkeySet};
