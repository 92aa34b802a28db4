//! Line-oriented host adapter
//!
//! Drives an [`Engine`] from JSON-lines [`HostEvent`]s and reports
//! [`HostOutput`]s to a writer. The commit FIFO is registered with the
//! tokio reactor, which plays the part of the host event loop.

use std::io::{self, Write};
use std::os::fd::{AsRawFd, BorrowedFd, RawFd};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tokio::io::unix::AsyncFd;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Interest};
use tracing::{debug, info, warn};

use crate::channel::DrainStop;
use crate::engine::{Engine, Host, IoInterest, KeyEvent};
use crate::events::{ContextId, HostEvent, HostOutput};
use crate::hotkey::Chord;
use crate::lifecycle::ShutdownSignal;

/// Host that writes one JSON object per line to `W`
pub struct LineHost<W> {
    out: Mutex<W>,
}

impl<W: Write> LineHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Write one output line, logging failures
    pub fn emit(&self, output: &HostOutput) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *out, output)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        if let Err(e) = written {
            warn!(error = %e, "failed to write host output");
        }
    }
}

impl<W: Write> Host for LineHost<W> {
    type Context = ContextId;
    type Watch = Arc<AsyncFd<RawFd>>;

    fn commit(&self, context: &ContextId, text: &str) {
        self.emit(&HostOutput::Commit {
            context: *context,
            text: text.to_owned(),
        });
    }

    fn watch(&self, fd: BorrowedFd<'_>, interest: IoInterest) -> io::Result<Self::Watch> {
        // epoll reports error and hangup with any readable interest
        if !interest.readable {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "commit FIFO must be watched for readability",
            ));
        }
        let watch = AsyncFd::with_interest(fd.as_raw_fd(), Interest::READABLE)?;
        Ok(Arc::new(watch))
    }
}

/// Apply one host event to the engine
pub fn dispatch<W: Write>(engine: &Engine<LineHost<W>>, event: HostEvent) {
    debug!(%event, "host event");
    match event {
        HostEvent::Activate { context } => engine.activate(context),
        HostEvent::Deactivate { context } => engine.deactivate(&context),
        HostEvent::Reset { context } => engine.reset(&context),
        HostEvent::Key {
            context,
            key,
            release,
        } => {
            let chord = match key.parse::<Chord>() {
                Ok(chord) => chord,
                Err(e) => {
                    debug!(key = %key, error = %e, "unparseable key, passing through");
                    // Still a keystroke in this context
                    if !release {
                        engine.activate(context);
                    }
                    engine.host().emit(&HostOutput::KeyResult {
                        context,
                        key,
                        consumed: false,
                    });
                    return;
                }
            };
            let event = KeyEvent {
                context,
                chord,
                release,
            };
            let consumed = engine.key_event(&event).is_consumed();
            engine.host().emit(&HostOutput::KeyResult {
                context,
                key: chord.to_string(),
                consumed,
            });
        }
    }
}

/// Parse and apply one input line; malformed lines are skipped
pub fn dispatch_line<W: Write>(engine: &Engine<LineHost<W>>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match serde_json::from_str::<HostEvent>(line) {
        Ok(event) => dispatch(engine, event),
        Err(e) => warn!(line, error = %e, "ignoring malformed host event"),
    }
}

/// Run the event loop until `input` closes or a shutdown signal arrives
pub async fn run<W, R>(
    engine: &mut Engine<LineHost<W>>,
    input: R,
    shutdown: &mut ShutdownSignal,
) -> Result<()>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let watch = engine
        .watch()
        .cloned()
        .context("engine has no event-loop registration")?;
    let mut lines = input.lines();

    loop {
        tokio::select! {
            ready = watch.readable() => {
                let mut guard = ready.context("commit FIFO readiness failed")?;
                let stop = engine.on_inbound_ready();
                if drained_dry(stop) {
                    guard.clear_ready();
                } else {
                    // Readiness stays set, so the next pass reads again
                    debug!(?stop, "commit FIFO not drained dry");
                }
            }
            line = lines.next_line() => {
                match line.context("failed to read host event")? {
                    Some(line) => dispatch_line(engine, &line),
                    None => {
                        info!("host input closed");
                        break;
                    }
                }
            }
            _ = shutdown.wait() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

/// Readiness is edge-triggered: it may only be cleared once a read has
/// reported would-block, or the next edge could already have been missed.
fn drained_dry(stop: DrainStop) -> bool {
    matches!(stop, DrainStop::WouldBlock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_cleared_only_when_drained_dry() {
        assert!(drained_dry(DrainStop::WouldBlock));
        assert!(!drained_dry(DrainStop::NoData));
        assert!(!drained_dry(DrainStop::Error));
    }

    #[tokio::test]
    async fn test_unparseable_key_passes_through_raw() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::Config::with_paths(dir.path().join("cmd"), dir.path().join("commit"));
        let engine = Engine::new(&config, LineHost::new(Vec::new())).unwrap();

        dispatch(
            &engine,
            HostEvent::Key {
                context: 9,
                key: "KP_Enter".into(),
                release: false,
            },
        );

        assert_eq!(engine.focus(), Some(9));
        let out = engine.host().out.lock().unwrap();
        let output: HostOutput = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            output,
            HostOutput::KeyResult {
                context: 9,
                key: "KP_Enter".into(),
                consumed: false,
            }
        );
    }
}
