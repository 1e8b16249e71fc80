//! Metrics recorded through the `metrics` facade.
//!
//! # Metrics
//! - `pchain_rpc_requests_total` (counter): RPC calls by route, outcome
//! - `pchain_submission_retries_total` (counter): mempool-full resubmissions
//! - `pchain_confirmation_polls` (histogram): probes needed per poll
//! - `pchain_endpoint_healthy` (gauge): 1=healthy, 0=unhealthy
//!
//! Without an installed recorder every call here is a no-op.

/// Count one RPC call.
pub fn record_rpc_request(route: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    ::metrics::counter!("pchain_rpc_requests_total", "route" => route, "outcome" => outcome)
        .increment(1);
}

/// Count one resubmission after the mempool reported itself full.
pub fn record_submission_retry() {
    ::metrics::counter!("pchain_submission_retries_total").increment(1);
}

/// Record how many probes a poll made before it finished or gave up.
pub fn record_poll_attempts(attempts: u32) {
    ::metrics::histogram!("pchain_confirmation_polls").record(f64::from(attempts));
}

pub fn record_endpoint_health(healthy: bool) {
    ::metrics::gauge!("pchain_endpoint_healthy").set(if healthy { 1.0 } else { 0.0 });
}
