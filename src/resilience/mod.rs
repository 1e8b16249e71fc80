//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Writer.submit_transaction
//!     → retries.rs (retry on an explicit Attempt::Retry, geometric backoff from backoff.rs)
//! Writer.submit_and_confirm_transaction
//!     → polling.rs (probe until done, fixed interval)
//! Every RPC round-trip
//!     → timeouts.rs (per-call deadline)
//! ```
//!
//! # Design Decisions
//! - Only the explicit retry sentinel triggers another attempt; errors propagate
//! - Delays happen between attempts, never before the first or after the last
//! - Exhausting the attempt budget is a `Timeout`, distinct from failure
//! - Suspension is `tokio::time::sleep`; no thread is ever blocked

pub mod backoff;
pub mod polling;
pub mod retries;
pub mod timeouts;

pub use polling::{poll, PollPolicy};
pub use retries::{retry_with_backoff, Attempt, RetryPolicy};
