use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use gloss_protocol::SessionId;
use tokio::sync::Notify;

/// One sentence playback. Only the scheduler's driving loop advances it;
/// anyone holding it may deactivate it.
#[derive(Debug)]
pub struct PlaybackSession {
    id: SessionId,
    glosses: Vec<String>,
    looping: bool,
    active: AtomicBool,
    current_index: AtomicUsize,
    cancel: Notify,
}

impl PlaybackSession {
    pub fn new(id: SessionId, glosses: Vec<String>, looping: bool) -> Self {
        Self {
            id,
            glosses,
            looping,
            active: AtomicBool::new(true),
            current_index: AtomicUsize::new(0),
            cancel: Notify::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn glosses(&self) -> &[String] {
        &self.glosses
    }

    pub fn len(&self) -> usize {
        self.glosses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glosses.is_empty()
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn current_index(&self) -> usize {
        self.current_index.load(Ordering::SeqCst)
    }

    pub fn current_word(&self) -> Option<&str> {
        self.glosses.get(self.current_index()).map(String::as_str)
    }

    pub(crate) fn advance(&self) {
        self.current_index.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn rewind(&self) {
        self.current_index.store(0, Ordering::SeqCst);
    }

    /// Marks the session inactive and wakes every suspended wait.
    /// Returns whether it was active.
    pub fn deactivate(&self) -> bool {
        let was_active = self.active.swap(false, Ordering::SeqCst);
        if was_active {
            self.cancel.notify_waiters();
        }
        was_active
    }

    /// Completes once the session is inactive.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.cancel.notified();
            if !self.is_active() {
                return;
            }
            notified.await;
        }
    }
}
