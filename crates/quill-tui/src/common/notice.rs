//! Transient, non-blocking notifications.
//!
//! Every component reports failures and confirmations here instead of
//! bubbling errors upward. Notices expire on their own; the newest one is
//! shown in the notice line and pruned on Tick.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Error);
    }

    fn push(&mut self, text: String, level: NoticeLevel) {
        self.items.push(Notice {
            text,
            level,
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    /// Drops expired notices. Called once per Tick.
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.items.retain(|n| n.expires_at > now);
    }

    /// The notice to display: the most recent live one.
    pub fn current(&self) -> Option<&Notice> {
        self.items.last()
    }

    /// True while any notice is visible (keeps the tick rate fast so
    /// expiry doesn't wait for input).
    pub fn has_pending(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
