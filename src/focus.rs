//! Tracks which text context receives committed text
//!
//! A single slot guarded by a mutex. The lock is only held to read or
//! replace the handle, never across I/O.

use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Single-slot holder for the current commit target
///
/// Holds a host handle without owning the context it names.
#[derive(Debug)]
pub struct FocusTracker<C> {
    current: Mutex<Option<C>>,
}

impl<C: Clone + PartialEq + Debug> FocusTracker<C> {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Make `context` the commit target
    pub fn set_focus(&self, context: C) {
        let mut current = self.lock();
        if current.as_ref() != Some(&context) {
            debug!(?context, "focus changed");
        }
        *current = Some(context);
    }

    /// Clear the target, but only if it is still `context`
    ///
    /// Returns whether the slot was cleared. A late deactivation for a
    /// context that already lost focus leaves the slot alone.
    pub fn clear_focus_if(&self, context: &C) -> bool {
        let mut current = self.lock();
        if current.as_ref() == Some(context) {
            debug!(?context, "focus cleared");
            *current = None;
            true
        } else {
            false
        }
    }

    /// The current commit target, if any
    pub fn focus(&self) -> Option<C> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<C>> {
        // The slot holds a plain handle, so a panic elsewhere cannot leave it torn
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clone + PartialEq + Debug> Default for FocusTracker<C> {
    fn default() -> Self {
        Self::new()
    }
}
