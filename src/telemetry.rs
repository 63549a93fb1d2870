//! Metrics tracking.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub pages_rendered: AtomicU64,
    pub renders_waited: AtomicU64,
    pub renders_degraded: AtomicU64,
    pub users_listed: AtomicU64,
    pub requests_rejected: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            pages_rendered: AtomicU64::new(0),
            renders_waited: AtomicU64::new(0),
            renders_degraded: AtomicU64::new(0),
            users_listed: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
        }
    }

    pub fn record_page_render(&self) {
        self.pages_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render_waited(&self) {
        self.renders_waited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render_degraded(&self) {
        self.renders_degraded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_users_listed(&self) {
        self.users_listed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_rendered: self.pages_rendered.load(Ordering::Relaxed),
            renders_waited: self.renders_waited.load(Ordering::Relaxed),
            renders_degraded: self.renders_degraded.load(Ordering::Relaxed),
            users_listed: self.users_listed.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
        }
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub pages_rendered: u64,
    pub renders_waited: u64,
    pub renders_degraded: u64,
    pub users_listed: u64,
    pub requests_rejected: u64,
}
