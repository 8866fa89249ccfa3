//! Metrics tracking.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub tokens_issued: AtomicU64,
    pub tokens_rejected: AtomicU64,
    pub logins_failed: AtomicU64,
    pub users_created: AtomicU64,
    pub users_deleted: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            tokens_issued: AtomicU64::new(0),
            tokens_rejected: AtomicU64::new(0),
            logins_failed: AtomicU64::new(0),
            users_created: AtomicU64::new(0),
            users_deleted: AtomicU64::new(0),
        }
    }

    pub fn record_issue(&self) {
        self.tokens_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reject(&self) {
        self.tokens_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_login_failure(&self) {
        self.logins_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_user_created(&self) {
        self.users_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_user_deleted(&self) {
        self.users_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tokens_issued: self.tokens_issued.load(Ordering::Relaxed),
            tokens_rejected: self.tokens_rejected.load(Ordering::Relaxed),
            logins_failed: self.logins_failed.load(Ordering::Relaxed),
            users_created: self.users_created.load(Ordering::Relaxed),
            users_deleted: self.users_deleted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub tokens_issued: u64,
    pub tokens_rejected: u64,
    pub logins_failed: u64,
    pub users_created: u64,
    pub users_deleted: u64,
}
