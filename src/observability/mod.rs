//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rpc / resilience / blockchain produce:
//!     → tracing events (submission, retries, confirmation, RPC failures)
//!     → metrics.rs (counters and histograms through the `metrics` facade)
//!
//! Binaries consume:
//!     → logging.rs (subscriber with env filter, pretty or JSON output)
//! ```
//!
//! The library installs no metrics exporter; an application that wants the
//! numbers registers a recorder of its choice.

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
