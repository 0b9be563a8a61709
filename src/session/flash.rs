//! Flash notices: one-shot messages carried across a redirect.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// How long an unread notice survives.
pub const DEFAULT_FLASH_TTL: Duration = Duration::from_millis(6000);

struct Notice {
    message: String,
    expires_at: Instant,
}

/// Per-session notice queues with a fixed expiry.
///
/// `take` drains the queue, so each notice is shown at most once.
/// Clone-friendly via Arc.
#[derive(Clone)]
pub struct FlashStore {
    ttl: Duration,
    queues: Arc<Mutex<HashMap<String, Vec<Notice>>>>,
}

impl Default for FlashStore {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_TTL)
    }
}

impl FlashStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queues: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn queues(&self) -> MutexGuard<'_, HashMap<String, Vec<Notice>>> {
        // Queues hold plain data; a panic mid-push cannot leave them inconsistent.
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `message` for the next page rendered for `session_id`.
    pub fn push(&self, session_id: &str, message: impl Into<String>) {
        let now = Instant::now();
        let mut queues = self.queues();

        queues.retain(|_, notices| {
            notices.retain(|n| n.expires_at > now);
            !notices.is_empty()
        });

        queues
            .entry(session_id.to_string())
            .or_default()
            .push(Notice {
                message: message.into(),
                expires_at: now + self.ttl,
            });
    }

    /// Drain the unexpired notices of `session_id`, oldest first.
    pub fn take(&self, session_id: &str) -> Vec<String> {
        let now = Instant::now();
        self.queues()
            .remove(session_id)
            .unwrap_or_default()
            .into_iter()
            .filter(|n| n.expires_at > now)
            .map(|n| n.message)
            .collect()
    }

    #[cfg(test)]
    fn pending_sessions(&self) -> usize {
        self.queues().len()
    }
}
