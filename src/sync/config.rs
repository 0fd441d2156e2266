use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Timeout and poll cadence for one kind of wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Total time budget in milliseconds
    pub timeout_ms: u64,

    /// Delay between polls in milliseconds
    pub poll_interval_ms: u64,
}

impl WaitOptions {
    pub const fn new(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self { timeout_ms, poll_interval_ms }
    }

    /// Builder method: replace the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Builder method: replace the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_duration(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// The "no requests outstanding" gate used after a store reports a fresh load
///
/// A single user action can make a store load more than once before it settles, so a
/// fresh load count does not guarantee the final load has finished. The right timings
/// are empirical; disable the gate entirely where the extra wait is not wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuietPeriod {
    pub enabled: bool,

    pub timeout_ms: u64,

    pub poll_interval_ms: u64,

    /// After seeing no requests in flight, wait this long and look again
    pub recheck_ms: u64,
}

impl QuietPeriod {
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }

    pub fn wait(&self) -> WaitOptions {
        WaitOptions::new(self.timeout_ms, self.poll_interval_ms)
    }

    pub fn recheck(&self) -> Duration {
        Duration::from_millis(self.recheck_ms)
    }
}

impl Default for QuietPeriod {
    fn default() -> Self {
        Self { enabled: true, timeout_ms: 30_000, poll_interval_ms: 200, recheck_ms: 1_000 }
    }
}

/// How text is typed into inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingOptions {
    /// Pause a random short time between characters, like a person would
    pub realistic: bool,

    /// Lower bound of the pause between key presses, in microseconds
    pub min_pause_us: u64,

    /// Upper bound of the pause between key presses, in microseconds
    pub max_pause_us: u64,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self { realistic: true, min_pause_us: 100, max_pause_us: 2_000 }
    }
}

/// Timing configuration for every wait the engine performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Waiting for components to exist, be visible or be enabled
    pub component_wait: WaitOptions,

    /// Waiting for a store's load counter to go above zero
    pub store_load_wait: WaitOptions,

    pub quiet_period: QuietPeriod,

    /// Waiting for a tree to stop loading before touching its nodes
    pub tree_idle_wait: WaitOptions,

    /// Grace delay before re-checking that a tree really is idle
    pub tree_recheck_ms: u64,

    /// Waiting for a lazily loaded tree node to appear
    pub node_wait: WaitOptions,

    /// Waiting for a field to receive focus
    pub focus_wait: WaitOptions,

    pub typing: TypingOptions,

    /// Waiting for an injected helper script to register itself
    pub helper_load_wait: WaitOptions,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            component_wait: WaitOptions::new(10_000, 500),
            store_load_wait: WaitOptions::new(10_000, 100),
            quiet_period: QuietPeriod::default(),
            tree_idle_wait: WaitOptions::new(30_000, 200),
            tree_recheck_ms: 200,
            node_wait: WaitOptions::new(60_000, 500),
            focus_wait: WaitOptions::new(10_000, 500),
            typing: TypingOptions::default(),
            helper_load_wait: WaitOptions::new(2_000, 100),
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BrowserError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_json(&content).map_err(|e| BrowserError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| BrowserError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Builder method: set the quiet period gate
    pub fn quiet_period(mut self, quiet_period: QuietPeriod) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Builder method: set the typing behaviour
    pub fn typing(mut self, typing: TypingOptions) -> Self {
        self.typing = typing;
        self
    }

    pub fn tree_recheck(&self) -> Duration {
        Duration::from_millis(self.tree_recheck_ms)
    }
}
