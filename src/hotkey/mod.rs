//! Hotkey module for chord parsing and matching
//!
//! Chords are parsed from the user's hotkey list and compared against
//! key presses the host delivers to the engine.

mod keys;
mod table;

pub use keys::{Chord, ChordParseError, Key, ModifierState, NamedKey, MAX_FUNCTION_KEY};
pub use table::{HotkeySet, COMMAND_MODE_CHORD};
