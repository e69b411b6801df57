//! Pre-filled multi-consumer URL queue

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Queue of URLs waiting to be fetched
///
/// Filled once by the pool, then closed before any worker starts. Each URL
/// is handed out exactly once.
#[derive(Debug, Default)]
pub struct UrlQueue {
    items: Mutex<VecDeque<String>>,
    closed: AtomicBool,
}

impl UrlQueue {
    /// Creates an empty queue sized for `capacity` URLs
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            closed: AtomicBool::new(false),
        }
    }

    /// Adds a URL; returns false if the queue has already been closed
    pub fn push(&self, url: String) -> bool {
        if self.is_closed() {
            return false;
        }
        self.lock().push_back(url);
        true
    }

    /// Stops accepting new URLs
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Takes the next URL, or `None` once the queue is exhausted
    pub fn pop(&self) -> Option<String> {
        self.lock().pop_front()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
