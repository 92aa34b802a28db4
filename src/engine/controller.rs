//! Engine controller
//!
//! Wires key presses to recognizer commands, and recognized lines from the
//! commit FIFO to the focused context. Constructing an [`Engine`] is the
//! transition to the ready state; dropping it is teardown.

use std::fs::File;
use std::os::fd::AsFd;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::channel::{
    ensure_fifo, open_inbound, send_command, CommandToken, DrainStop, LineFramer,
};
use crate::config::Config;
use crate::error::BridgeError;
use crate::focus::FocusTracker;
use crate::hotkey::{HotkeySet, COMMAND_MODE_CHORD};

use super::host::{Host, IoInterest, KeyEvent, KeyOutcome};

/// Bridge between the host input-method framework and the recognizer
pub struct Engine<H: Host> {
    host: H,
    /// Released before `inbound` is closed
    watch: Option<H::Watch>,
    inbound: File,
    framer: LineFramer,
    focus: Arc<FocusTracker<H::Context>>,
    hotkeys: HotkeySet,
    command_fifo: PathBuf,
}

impl<H: Host> Engine<H> {
    /// Create both FIFOs, load hotkeys, and start watching the commit FIFO
    ///
    /// Any failure here leaves the engine unusable and is returned to the
    /// host, which should treat it as a load failure.
    pub fn new(config: &Config, host: H) -> Result<Self, BridgeError> {
        for path in [&config.command_fifo, &config.commit_fifo] {
            ensure_fifo(path).map_err(|source| BridgeError::CreateFifo {
                path: path.clone(),
                source,
            })?;
        }

        let hotkeys = HotkeySet::load(config.hotkey_file.as_deref());

        let inbound =
            open_inbound(&config.commit_fifo).map_err(|source| BridgeError::OpenInbound {
                path: config.commit_fifo.clone(),
                source,
            })?;

        let watch = host
            .watch(inbound.as_fd(), IoInterest::COMMIT_FIFO)
            .map_err(BridgeError::Watch)?;

        info!(hotkeys = %hotkeys, "ASR engine loaded");

        Ok(Self {
            host,
            watch: Some(watch),
            inbound,
            framer: LineFramer::new(),
            focus: Arc::new(FocusTracker::new()),
            hotkeys,
            command_fifo: config.command_fifo.clone(),
        })
    }

    /// The host started serving `context` with this engine
    pub fn activate(&self, context: H::Context) {
        self.focus.set_focus(context);
    }

    /// The host stopped serving `context`
    pub fn deactivate(&self, context: &H::Context) {
        self.focus.clear_focus_if(context);
    }

    /// Lifecycle hook; the engine keeps no per-context input state
    pub fn reset(&self, context: &H::Context) {
        trace!(?context, "reset");
    }

    /// Handle a key event from `event.context`
    ///
    /// Releases are ignored. A press also marks its context as focused.
    /// The command-mode chord is checked before the toggle set.
    pub fn key_event(&self, event: &KeyEvent<H::Context>) -> KeyOutcome {
        if event.release {
            return KeyOutcome::PassThrough;
        }

        self.focus.set_focus(event.context.clone());

        let chord = event.chord.normalize();
        let token = if chord == COMMAND_MODE_CHORD {
            CommandToken::Command
        } else if self.hotkeys.matches(&chord) {
            CommandToken::Toggle
        } else {
            return KeyOutcome::PassThrough;
        };

        debug!(%chord, command = %token, "hotkey pressed");
        send_command(&self.command_fifo, token);
        KeyOutcome::Consumed
    }

    /// Readiness handler for the commit FIFO
    ///
    /// Called for readable, error and hangup alike. Drains the descriptor
    /// and commits every complete line. The host keeps watching whatever
    /// the result; the returned [`DrainStop`] tells an edge-triggered host
    /// whether the descriptor was read dry.
    pub fn on_inbound_ready(&mut self) -> DrainStop {
        let stop = self.framer.drain(&mut self.inbound);
        trace!(?stop, pending = self.framer.pending().len(), "commit FIFO drained");

        while let Some(line) = self.framer.next_line() {
            self.commit_line(&line);
        }
        stop
    }

    /// Deliver one recognized line to the focused context
    ///
    /// Returns whether the host's commit was called.
    fn commit_line(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            trace!("dropping empty line");
            return false;
        }

        let Some(context) = self.focus.focus() else {
            trace!("no focused context, dropping line");
            return false;
        };

        debug!(?context, len = text.len(), "committing text");
        self.host.commit(&context, text);
        true
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The event-loop registration made at construction
    pub fn watch(&self) -> Option<&H::Watch> {
        self.watch.as_ref()
    }

    pub fn focus(&self) -> Option<H::Context> {
        self.focus.focus()
    }

    pub fn hotkeys(&self) -> &HotkeySet {
        &self.hotkeys
    }
}

impl<H: Host> Drop for Engine<H> {
    fn drop(&mut self) {
        // Deregister before the descriptor closes with `inbound`
        drop(self.watch.take());
        debug!("ASR engine unloaded");
    }
}
