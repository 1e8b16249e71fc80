//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resilience::{PollPolicy, RetryPolicy};

/// Root configuration for SDK clients and the CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SdkConfig {
    /// Node endpoint and per-request deadline.
    pub rpc: RpcConfig,

    /// Resubmission while the mempool is full.
    pub submission: SubmissionConfig,

    /// Receipt polling after submission.
    pub confirmation: ConfirmationConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Base URL of the node (e.g., "http://localhost:7070").
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:7070".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Submission retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Total submission attempts, the first included.
    pub max_attempts: u32,

    /// Delay before the first resubmission, in milliseconds.
    pub initial_interval_ms: u64,

    /// Factor applied to the delay after each resubmission.
    pub backoff_multiplier: f64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_interval_ms: 500,
            backoff_multiplier: 1.8,
        }
    }
}

impl SubmissionConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_interval: Duration::from_millis(self.initial_interval_ms),
            multiplier: self.backoff_multiplier,
        }
    }
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Receipt lookups before giving up.
    pub max_attempts: u32,

    /// Delay between lookups, in milliseconds.
    pub interval_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval_ms: 6_000,
        }
    }
}

impl ConfirmationConfig {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
