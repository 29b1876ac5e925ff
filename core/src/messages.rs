//! The message log collaborator.
//!
//! `HeroService` reports every outcome as a human-readable line through a
//! `MessageLog`. `MessageService` is the stock implementation: an
//! append-only list meant to be shared (via `Arc`) with whatever displays it.

use std::sync::{Arc, Mutex, MutexGuard};

/// Sink for status messages.
pub trait MessageLog {
    fn add(&self, message: String);
}

impl<L: MessageLog + ?Sized> MessageLog for &L {
    fn add(&self, message: String) {
        (**self).add(message)
    }
}

impl<L: MessageLog + ?Sized> MessageLog for Arc<L> {
    fn add(&self, message: String) {
        (**self).add(message)
    }
}

/// In-memory message list.
#[derive(Debug, Default)]
pub struct MessageService {
    messages: Mutex<Vec<String>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a Vec<String> half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageLog for MessageService {
    fn add(&self, message: String) {
        self.lock().push(message);
    }
}
