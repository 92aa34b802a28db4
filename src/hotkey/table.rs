//! Hotkey table: the chords that toggle recognition
//!
//! Loaded once from the user's hotkey list, one chord per line. Blank
//! lines and `#` comments are skipped, malformed lines are dropped, and
//! an empty result falls back to the built-in defaults.

use std::fmt;
use std::path::Path;

use tracing::{debug, trace};

use super::keys::{Chord, Key, ModifierState};

/// Chord that sends the `command` verb instead of `toggle`
pub const COMMAND_MODE_CHORD: Chord = Chord {
    modifiers: ModifierState {
        shift: true,
        ..ModifierState::NONE
    },
    key: Key::Function(8),
};

/// Ordered set of toggle chords, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeySet {
    chords: Vec<Chord>,
}

impl HotkeySet {
    /// Build a set from already parsed chords
    pub fn new(chords: Vec<Chord>) -> Self {
        Self {
            chords: chords.into_iter().map(Chord::normalize).collect(),
        }
    }

    /// The built-in chords used when no usable list is configured
    pub fn defaults() -> Self {
        let control_alt = ModifierState {
            control: true,
            alt: true,
            ..ModifierState::NONE
        };

        Self::new(vec![
            Chord::new(Key::Char('v'), control_alt),
            Chord::new(Key::Char('r'), control_alt),
            Chord::new(Key::Function(8), ModifierState::NONE),
            COMMAND_MODE_CHORD,
        ])
    }

    /// Load the set from `path`, falling back to the defaults
    ///
    /// A missing path, an unreadable file, or a file with no valid chord
    /// all yield [`HotkeySet::defaults`].
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("no hotkey config location, using defaults");
            return Self::defaults();
        };

        // Decoded lossily so one stray byte only spoils its own line
        match std::fs::read(path) {
            Ok(bytes) => {
                let set = Self::parse(&String::from_utf8_lossy(&bytes));
                if set.is_empty() {
                    debug!(?path, "hotkey config has no valid chords, using defaults");
                    Self::defaults()
                } else {
                    set
                }
            }
            Err(e) => {
                debug!(?path, error = %e, "hotkey config not readable, using defaults");
                Self::defaults()
            }
        }
    }

    /// Parse a hotkey list without applying the default fallback
    pub fn parse(contents: &str) -> Self {
        let chords = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| match line.parse::<Chord>() {
                Ok(chord) => Some(chord),
                Err(e) => {
                    trace!(line, error = %e, "skipping invalid hotkey");
                    None
                }
            })
            .collect();

        Self::new(chords)
    }

    /// True if `chord` equals any member of the set
    pub fn matches(&self, chord: &Chord) -> bool {
        self.chords.iter().any(|c| c.matches(chord))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }
}

impl fmt::Display for HotkeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chord) in self.chords.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{chord}")?;
        }
        Ok(())
    }
}
