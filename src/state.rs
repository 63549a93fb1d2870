//! Shared application state.

use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::monitoring::agent::{AgentConfig, CollectorAgent, RumAgent};
use crate::store::sqlite::UserStore;
use crate::telemetry::Metrics;

const DEFAULT_CONNECT_WAIT: Duration = Duration::from_millis(5000);

pub struct AppStateInner {
    pub users: UserStore,
    pub agent: Option<Arc<dyn RumAgent>>,
    pub metrics: Metrics,
    pub connect_wait: Duration,
    pub started_at: DateTime<Utc>,
    pub request_count: AtomicU64,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn increment_requests(&self) {
        let n = self.request_count.fetch_add(1, Relaxed) + 1;
        if n % 1000 == 0 {
            tracing::warn!(count = n, "high request volume");
        }
    }
}

struct StateBuilder {
    users: UserStore,
    agent: Option<Arc<dyn RumAgent>>,
    connect_wait: Duration,
}

impl StateBuilder {
    fn build(self) -> AppState {
        Arc::new(AppStateInner {
            users: self.users,
            agent: self.agent,
            metrics: Metrics::new(),
            connect_wait: self.connect_wait,
            started_at: Utc::now(),
            request_count: AtomicU64::new(0),
        })
    }
}

pub fn build_state(db_path: &str) -> Result<AppState> {
    let users = UserStore::open(db_path)?;
    users.seed_defaults()?;
    let agent = AgentConfig::from_env()
        .map(|config| -> Arc<dyn RumAgent> { CollectorAgent::spawn(config) });
    Ok(StateBuilder {
        users,
        agent,
        connect_wait: connect_wait_from_env(),
    }
    .build())
}

fn connect_wait_from_env() -> Duration {
    std::env::var("RUM_CONNECT_WAIT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_CONNECT_WAIT)
}

#[cfg(test)]
pub fn build_test_state() -> Result<AppState> {
    Ok(StateBuilder {
        users: UserStore::open_in_memory()?,
        agent: None,
        connect_wait: DEFAULT_CONNECT_WAIT,
    }
    .build())
}

#[cfg(test)]
pub fn build_test_state_with_agent(
    agent: Arc<dyn RumAgent>,
    connect_wait: Duration,
) -> Result<AppState> {
    Ok(StateBuilder {
        users: UserStore::open_in_memory()?,
        agent: Some(agent),
        connect_wait,
    }
    .build())
}
