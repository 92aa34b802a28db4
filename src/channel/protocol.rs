//! Wire format of both FIFOs
//!
//! Command FIFO: one bare ASCII verb per line (`toggle\n`, `command\n`).
//! Commit FIFO: one UTF-8 phrase per line, `\n` terminated, an optional
//! trailing `\r` is tolerated.

use std::fmt;

/// Line terminator on both channels
pub const LINE_END: u8 = b'\n';

/// Verbs the engine sends to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandToken {
    /// Start or stop listening
    Toggle,
    /// Run a voice command against the current selection
    Command,
}

impl CommandToken {
    /// The verb without its terminator
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Command => "command",
        }
    }

    /// The full line written to the command FIFO
    pub fn wire(self) -> &'static [u8] {
        match self {
            Self::Toggle => b"toggle\n",
            Self::Command => b"command\n",
        }
    }
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_is_verb_plus_newline() {
        for token in [CommandToken::Toggle, CommandToken::Command] {
            let wire = token.wire();
            assert_eq!(wire.last(), Some(&LINE_END));
            assert_eq!(&wire[..wire.len() - 1], token.as_str().as_bytes());
            assert!(wire.is_ascii());
        }
    }
}
