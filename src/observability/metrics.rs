//! Metrics collection.
//!
//! # Metrics
//! - `chain_client_signatures_total` (counter): signatures produced
//! - `chain_client_sign_failures_total` (counter): failed sign calls by reason
//! - `chain_client_required_keys_requests_total` (counter): required-keys queries
//!
//! Recording is a no-op until the embedding application installs a recorder.

/// Record signatures produced by one sign call.
pub fn record_signatures(count: usize) {
    metrics::counter!("chain_client_signatures_total").increment(count as u64);
}

/// Record a failed sign call.
pub fn record_sign_failure(reason: &'static str) {
    metrics::counter!("chain_client_sign_failures_total", "reason" => reason).increment(1);
}

/// Record a required-keys query sent to the node.
pub fn record_required_keys_request() {
    metrics::counter!("chain_client_required_keys_requests_total").increment(1);
}
