//! Named-pipe endpoints
//!
//! Both FIFOs live at fixed filesystem paths with owner-only permissions.
//! The commit FIFO is held open read-write for the engine's lifetime; the
//! command FIFO is opened per write.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::path::Path;

use tracing::{debug, warn};

use super::protocol::CommandToken;

/// Permissions for newly created FIFOs
pub const FIFO_MODE: libc::mode_t = 0o600;

/// Make sure a FIFO exists at `path`
///
/// An existing FIFO, or a symlink resolving to one, is reused. Anything
/// else at the path is removed and replaced; a symlink is unlinked without
/// touching its target. Losing a creation race to another process counts
/// as success.
pub fn ensure_fifo(path: &Path) -> io::Result<()> {
    if std::fs::metadata(path).is_ok_and(|meta| meta.file_type().is_fifo()) {
        return Ok(());
    }
    remove_stale(path)?;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), FIFO_MODE) };
    if rc == 0 {
        debug!(?path, "created FIFO");
        return Ok(());
    }

    let err = io::Error::last_os_error();
    if err.kind() == io::ErrorKind::AlreadyExists {
        Ok(())
    } else {
        Err(err)
    }
}

/// Remove whatever non-FIFO entry sits at `path`, if any
fn remove_stale(path: &Path) -> io::Result<()> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    warn!(?path, "replacing non-FIFO file at channel path");
    let removed = if meta.is_dir() {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    match removed {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Open the commit FIFO for the engine's lifetime
///
/// Opened read-write so the descriptor never sees end-of-stream when the
/// recognizer restarts; an empty pipe reports would-block instead.
pub fn open_inbound(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}

/// Write one command verb to the command FIFO
///
/// Returns whether the full line was written. Failures are logged and
/// otherwise dropped: with no recognizer attached the open fails with
/// `ENXIO`, and the user can simply press the hotkey again.
pub fn send_command(path: &Path, token: CommandToken) -> bool {
    let mut fifo = match OpenOptions::new()
        .write(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
    {
        Ok(fifo) => fifo,
        Err(e) => {
            warn!(?path, error = %e, "recognizer command channel not ready");
            return false;
        }
    };

    let line = token.wire();
    match fifo.write(line) {
        Ok(n) if n == line.len() => {
            debug!(command = %token, "command sent");
            true
        }
        Ok(n) => {
            warn!(command = %token, written = n, expected = line.len(), "short command write");
            false
        }
        Err(e) => {
            warn!(command = %token, error = %e, "write command failed");
            false
        }
    }
}
