//! Collector-backed RUM agent.
//! Used by: render, state, handlers::health.
//!
//! The agent handshakes with the collector in a background task and
//! publishes its connection state through a watch channel, so renders can
//! await connectivity without polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use url::Url;
use uuid::Uuid;

use crate::console;
use crate::monitoring::snippet::{browser_snippet, SnippetConfig, SnippetOptions};

const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Disconnected,
    Connected,
}

impl AgentState {
    pub fn is_connected(&self) -> bool {
        matches!(self, AgentState::Connected)
    }
}

/// Narrow seam over the monitoring collaborator. Production code uses
/// [`CollectorAgent`]; tests substitute fakes.
pub trait RumAgent: Send + Sync {
    fn state(&self) -> watch::Receiver<AgentState>;

    fn is_connected(&self) -> bool {
        self.state().borrow().is_connected()
    }

    fn browser_timing_header(&self, options: &SnippetOptions) -> String;
}

pub struct AgentConfig {
    pub license_key: String,
    pub collector_url: Url,
    pub app_name: String,
    pub retry_interval: Duration,
}

impl AgentConfig {
    /// Reads agent configuration from the environment. Returns `None`
    /// when monitoring is not configured; the license key is logged
    /// masked, for diagnostics only.
    pub fn from_env() -> Option<Self> {
        let license_key = std::env::var("RUM_LICENSE_KEY").ok()?;
        let collector = std::env::var("RUM_COLLECTOR_URL").ok()?;
        let collector_url = match Url::parse(&collector) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(url = %collector, error = %e, "invalid RUM_COLLECTOR_URL, monitoring disabled");
                return None;
            }
        };
        let app_name = std::env::var("RUM_APP_NAME").unwrap_or_else(|_| "pagebeacon".into());

        tracing::info!(
            license_key = %mask(&license_key),
            app = %app_name,
            collector = %collector_url,
            "RUM agent enabled"
        );
        Some(Self {
            license_key,
            collector_url,
            app_name,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        })
    }
}

pub struct CollectorAgent {
    config: AgentConfig,
    state: watch::Sender<AgentState>,
}

impl CollectorAgent {
    /// Starts the agent: the returned handle reports `Disconnected` until
    /// the background handshake succeeds.
    pub fn spawn(config: AgentConfig) -> Arc<Self> {
        let (state, _) = watch::channel(AgentState::Disconnected);
        let agent = Arc::new(Self { config, state });
        let task = Arc::clone(&agent);
        tokio::spawn(async move { task.run().await });
        agent
    }

    async fn run(&self) {
        loop {
            match self.connect().await {
                Ok(()) => {
                    tracing::info!(app = %self.config.app_name, "collector handshake complete");
                    console::log_agent_connected(&self.config.app_name);
                    // send_replace stores the state even before the first
                    // render subscribes.
                    self.state.send_replace(AgentState::Connected);
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "collector handshake failed, retrying");
                    tokio::time::sleep(self.config.retry_interval).await;
                }
            }
        }
    }

    async fn connect(&self) -> Result<(), reqwest::Error> {
        let endpoint = self.endpoint("connect");
        let response = reqwest::Client::new()
            .post(endpoint)
            .json(&serde_json::json!({
                "app_name": self.config.app_name,
                "license_key": self.config.license_key,
            }))
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Url {
        self.config
            .collector_url
            .join(path)
            .unwrap_or_else(|_| self.config.collector_url.clone())
    }
}

impl RumAgent for CollectorAgent {
    fn state(&self) -> watch::Receiver<AgentState> {
        self.state.subscribe()
    }

    fn browser_timing_header(&self, options: &SnippetOptions) -> String {
        // A transaction exists only while the collector is receiving; the
        // renderer opts into transactionless injection explicitly.
        let transaction = self
            .is_connected()
            .then(|| Uuid::new_v4().to_string());
        browser_snippet(
            &SnippetConfig {
                app_name: &self.config.app_name,
                beacon_url: self.endpoint("beacon").as_str(),
                token: &self.config.license_key,
                transaction: transaction.as_deref(),
            },
            options,
        )
    }
}

fn mask(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}…({} chars)", key.chars().count())
}
