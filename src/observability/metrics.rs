//! Startup metrics.
//!
//! # Metrics
//! - `miner_startup_warnings_emitted_total` (counter): warnings shown, by kind
//! - `miner_startup_warning_check_skipped_total` (counter): skipped checks, by reason
//! - `miner_startup_balance_checks_total` (counter): balance queries, by result
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these are no-ops.

use metrics::counter;

/// Record a warning shown to the operator.
pub fn record_warning_emitted(kind: &'static str) {
    counter!("miner_startup_warnings_emitted_total", "kind" => kind).increment(1);
}

/// Record a warning check that did not run.
pub fn record_check_skipped(reason: &'static str) {
    counter!("miner_startup_warning_check_skipped_total", "reason" => reason).increment(1);
}

/// Record the outcome of a balance query.
pub fn record_balance_check(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    counter!("miner_startup_balance_checks_total", "result" => result).increment(1);
}
