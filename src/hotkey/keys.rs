//! Key chord definitions and parsing
//!
//! A chord is a modifier set plus one base key, written the way the
//! input-method framework writes them: `Control+Alt+v`, `F8`, `Shift+F8`.

use std::fmt;
use std::str::FromStr;

/// Tracks which modifier keys take part in a chord
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    /// Control key is held
    pub control: bool,
    /// Alt key is held
    pub alt: bool,
    /// Shift key is held
    pub shift: bool,
    /// Super (logo) key is held
    pub super_key: bool,
    /// Hyper key is held
    pub hyper: bool,
}

impl ModifierState {
    /// No modifiers held
    pub const NONE: Self = Self {
        control: false,
        alt: false,
        shift: false,
        super_key: false,
        hyper: false,
    };

    /// Check if all modifiers are released
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Set the flag named by `name`, returning false if it is not a modifier
    fn set_by_name(&mut self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "control" | "ctrl" => self.control = true,
            "alt" => self.alt = true,
            "shift" => self.shift = true,
            "super" => self.super_key = true,
            "hyper" => self.hyper = true,
            _ => return false,
        }
        true
    }
}

/// Non-character keys that can anchor a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Space,
    Return,
    Escape,
    Tab,
    BackSpace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Print,
    Pause,
    Menu,
}

impl NamedKey {
    fn from_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "space" => Self::Space,
            "return" | "enter" => Self::Return,
            "escape" => Self::Escape,
            "tab" => Self::Tab,
            "backspace" => Self::BackSpace,
            "delete" => Self::Delete,
            "insert" => Self::Insert,
            "home" => Self::Home,
            "end" => Self::End,
            "page_up" | "prior" => Self::PageUp,
            "page_down" | "next" => Self::PageDown,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "print" => Self::Print,
            "pause" => Self::Pause,
            "menu" => Self::Menu,
            _ => return None,
        };
        Some(key)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Return => "Return",
            Self::Escape => "Escape",
            Self::Tab => "Tab",
            Self::BackSpace => "BackSpace",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "Page_Up",
            Self::PageDown => "Page_Down",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Print => "Print",
            Self::Pause => "Pause",
            Self::Menu => "Menu",
        }
    }
}

/// Highest function key the chord grammar accepts
pub const MAX_FUNCTION_KEY: u8 = 35;

/// The base key of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key
    Char(char),
    /// Function key `F1`..`F35`
    Function(u8),
    /// Any other named key
    Named(NamedKey),
}

impl Key {
    /// Letters compare case-insensitively
    pub fn normalize(self) -> Self {
        match self {
            Self::Char(c) => Self::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char('+') => write!(f, "plus"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Function(n) => write!(f, "F{n}"),
            Self::Named(named) => write!(f, "{}", named.name()),
        }
    }
}

/// A modifier set plus a base key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: ModifierState,
    pub key: Key,
}

impl Chord {
    /// Create a chord as reported by the host, without normalizing it
    pub fn new(key: Key, modifiers: ModifierState) -> Self {
        Self { modifiers, key }
    }

    /// The chord in the canonical form used for comparisons
    pub fn normalize(self) -> Self {
        Self {
            modifiers: self.modifiers,
            key: self.key.normalize(),
        }
    }

    /// True if both chords name the same physical combination
    pub fn matches(&self, other: &Chord) -> bool {
        self.normalize() == other.normalize()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        for (held, name) in [
            (m.control, "Control"),
            (m.alt, "Alt"),
            (m.shift, "Shift"),
            (m.super_key, "Super"),
            (m.hyper, "Hyper"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

/// Error type for parsing chord descriptions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChordParseError {
    #[error("empty key chord")]
    Empty,

    #[error("no key specified (only modifiers)")]
    NoKey,

    #[error("unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),
}

impl FromStr for Chord {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChordParseError::Empty);
        }

        // `+` names both the separator and the plus key
        let (modifier_part, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            match s.rfind('+') {
                Some(i) => (&s[..i], &s[i + 1..]),
                None => ("", s),
            }
        };

        let mut modifiers = ModifierState::NONE;
        if !modifier_part.is_empty() {
            for name in modifier_part.split('+').map(str::trim) {
                if !modifiers.set_by_name(name) {
                    return Err(ChordParseError::UnknownModifier(name.to_owned()));
                }
            }
        }

        let key_part = key_part.trim();
        if key_part.is_empty() || is_modifier_name(key_part) {
            return Err(ChordParseError::NoKey);
        }

        Ok(Chord::new(parse_key(key_part)?, modifiers).normalize())
    }
}

fn is_modifier_name(name: &str) -> bool {
    ModifierState::default().set_by_name(name)
}

fn parse_key(s: &str) -> Result<Key, ChordParseError> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_whitespace() || c.is_control() {
            return Err(ChordParseError::UnknownKey(s.to_owned()));
        }
        return Ok(Key::Char(c));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|digits| digits.parse::<u8>().ok())
    {
        if (1..=MAX_FUNCTION_KEY).contains(&n) {
            return Ok(Key::Function(n));
        }
    }

    if let Some(named) = NamedKey::from_name(s) {
        return Ok(Key::Named(named));
    }

    let punctuation = match s.to_ascii_lowercase().as_str() {
        "plus" => '+',
        "minus" => '-',
        "comma" => ',',
        "period" => '.',
        "slash" => '/',
        "semicolon" => ';',
        "apostrophe" => '\'',
        "grave" => '`',
        "backslash" => '\\',
        "bracketleft" => '[',
        "bracketright" => ']',
        "equal" => '=',
        _ => return Err(ChordParseError::UnknownKey(s.to_owned())),
    };
    Ok(Key::Char(punctuation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(s: &str) -> Chord {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_state() {
        let state = ModifierState::default();
        assert!(state.is_empty());
    }

    #[test]
    fn test_parse_modifier_letter() {
        let c = chord("Control+Alt+v");
        assert!(c.modifiers.control);
        assert!(c.modifiers.alt);
        assert!(!c.modifiers.shift);
        assert_eq!(c.key, Key::Char('v'));
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(chord("F8").key, Key::Function(8));
        assert!(chord("F8").modifiers.is_empty());
        assert_eq!(chord("f35").key, Key::Function(35));
        assert!(chord("Shift+F8").modifiers.shift);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(chord("ctrl+ALT+V"), chord("Control+Alt+v"));
        assert_eq!(chord("page_up").key, Key::Named(NamedKey::PageUp));
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(chord("Control++").key, Key::Char('+'));
        assert_eq!(chord("Control+plus"), chord("Control++"));
        assert_eq!(chord("+").key, Key::Char('+'));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Chord>(), Err(ChordParseError::Empty));
        assert_eq!("   ".parse::<Chord>(), Err(ChordParseError::Empty));
        assert_eq!("Control+".parse::<Chord>(), Err(ChordParseError::NoKey));
        assert_eq!("Shift".parse::<Chord>(), Err(ChordParseError::NoKey));
        assert_eq!(
            "bogus-chord".parse::<Chord>(),
            Err(ChordParseError::UnknownKey("bogus-chord".into()))
        );
        assert_eq!(
            "Meta+x".parse::<Chord>(),
            Err(ChordParseError::UnknownModifier("Meta".into()))
        );
        assert!("F0".parse::<Chord>().is_err());
        assert!("F36".parse::<Chord>().is_err());
    }

    #[test]
    fn test_letter_case_normalized() {
        let typed = Chord::new(
            Key::Char('V'),
            ModifierState {
                control: true,
                alt: true,
                ..ModifierState::NONE
            },
        );
        assert!(typed.matches(&chord("Control+Alt+v")));
        assert!(!typed.matches(&chord("Control+v")));
    }

    #[test]
    fn test_display() {
        assert_eq!(chord("alt+ctrl+v").to_string(), "Control+Alt+v");
        assert_eq!(chord("shift+f8").to_string(), "Shift+F8");
        assert_eq!(chord("Super+Return").to_string(), "Super+Return");
        assert_eq!(chord("Control++").to_string(), "Control+plus");
    }
}
