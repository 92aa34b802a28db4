//! Interface to the input-method framework hosting the engine

use std::fmt::Debug;
use std::io;
use std::os::fd::BorrowedFd;

use crate::hotkey::Chord;

/// Readiness conditions the engine asks the host to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoInterest {
    pub readable: bool,
    pub error: bool,
    pub hangup: bool,
}

impl IoInterest {
    /// Interest for the commit FIFO: all three route to the same handler
    pub const COMMIT_FIFO: Self = Self {
        readable: true,
        error: true,
        hangup: true,
    };
}

/// Callbacks the engine needs from its host
///
/// The host owns the event loop and the text contexts. The engine never
/// keeps a context alive; it only remembers which one has focus.
pub trait Host {
    /// Identifies one focused text-input target
    type Context: Clone + PartialEq + Debug;

    /// Event-loop registration; dropping it stops readiness reports
    type Watch;

    /// Insert `text` into `context`
    fn commit(&self, context: &Self::Context, text: &str);

    /// Register `fd` with the host event loop
    ///
    /// Once registered, the host calls [`Engine::on_inbound_ready`] whenever
    /// one of the `interest` conditions is reported.
    ///
    /// [`Engine::on_inbound_ready`]: super::Engine::on_inbound_ready
    fn watch(&self, fd: BorrowedFd<'_>, interest: IoInterest) -> io::Result<Self::Watch>;
}

/// A key event delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent<C> {
    /// Context the keystroke came from
    pub context: C,
    pub chord: Chord,
    /// True for key release, false for press
    pub release: bool,
}

impl<C> KeyEvent<C> {
    pub fn press(context: C, chord: Chord) -> Self {
        Self {
            context,
            chord,
            release: false,
        }
    }

    pub fn release(context: C, chord: Chord) -> Self {
        Self {
            context,
            chord,
            release: true,
        }
    }
}

/// What the host should do with a key event after the engine saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine handled it; do not insert it as text
    Consumed,
    /// Normal text entry
    PassThrough,
}

impl KeyOutcome {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}
