//! Deduplicated startup warning check.
//!
//! # Protocol
//! ```text
//! try lock (non-blocking) ──contended──▶ skip silently
//!     │ acquired
//!     ▼
//! load marker (fail open)
//!     → rewards recipient ≠ master and due?  → warn, mark, persist
//!     → balance warning due?                 → query RPC
//!           error                            → ConnectionError (lock released)
//!           balance < threshold              → warn, mark, persist
//!           balance ≥ threshold              → nothing, window not refreshed
//!     ▼
//! guard drops → lock released
//! ```
//!
//! A marker entry is only written right after its warning was shown and
//! only while the lock is held.

use alloy::primitives::U256;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::blockchain::types::format_token_amount;
use crate::blockchain::{BalanceSource, BlockchainError};
use crate::config::{MinerConfig, WarningCheckConfig};
use crate::observability::metrics;
use crate::observability::Notices;
use crate::warnings::lock::{CheckLock, LockAttempt};
use crate::warnings::marker::{MarkerRecord, WarningKind};

/// Terminal failure of the warning check.
#[derive(Debug, Error)]
pub enum WarningCheckError {
    #[error("Connection error: Unable to establish a connection with INFINITY_RPC ({endpoint}).")]
    Connection {
        endpoint: String,
        #[source]
        source: BlockchainError,
    },
}

/// Why a check did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another process holds the lock.
    Contended,
    /// The lock file could not be opened or locked.
    LockUnavailable,
}

impl SkipReason {
    fn label(self) -> &'static str {
        match self {
            SkipReason::Contended => "contended",
            SkipReason::LockUnavailable => "lock_unavailable",
        }
    }
}

/// What a completed check did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// The rewards recipient reminder was shown.
    pub rewards_warned: bool,
    /// The low balance reminder was shown.
    pub balance_warned: bool,
    /// Balance fetched from the node, if the balance check was due.
    pub balance: Option<U256>,
}

/// Result of a check attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Skipped(SkipReason),
    Completed(CheckReport),
}

/// The warning check, bound to its configuration.
#[derive(Debug, Clone)]
pub struct WarningCheck {
    config: WarningCheckConfig,
}

impl WarningCheck {
    pub fn new(config: WarningCheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WarningCheckConfig {
        &self.config
    }

    /// Run the check at the current wall-clock time.
    pub async fn run<B: BalanceSource>(
        &self,
        miner: &MinerConfig,
        balances: &B,
        notices: &mut Notices,
    ) -> Result<CheckOutcome, WarningCheckError> {
        self.run_at(unix_now(), miner, balances, notices).await
    }

    /// Run the check as if the current time were `now` (Unix seconds).
    pub async fn run_at<B: BalanceSource>(
        &self,
        now: f64,
        miner: &MinerConfig,
        balances: &B,
        notices: &mut Notices,
    ) -> Result<CheckOutcome, WarningCheckError> {
        let lock_path = self.config.lock_path();
        let _lock = match CheckLock::try_acquire(&lock_path) {
            Ok(LockAttempt::Acquired(lock)) => lock,
            Ok(LockAttempt::Contended) => {
                tracing::debug!(path = %lock_path.display(), "Warning check held by another process, skipping");
                return Ok(skipped(SkipReason::Contended));
            }
            Err(e) => {
                tracing::debug!(path = %lock_path.display(), error = %e, "Warning check lock unavailable, skipping");
                return Ok(skipped(SkipReason::LockUnavailable));
            }
        };

        let report = self.run_locked(now, miner, balances, notices).await?;
        Ok(CheckOutcome::Completed(report))
    }

    async fn run_locked<B: BalanceSource>(
        &self,
        now: f64,
        miner: &MinerConfig,
        balances: &B,
        notices: &mut Notices,
    ) -> Result<CheckReport, WarningCheckError> {
        let marker_path = self.config.marker_path();
        let cooldown = self.config.cooldown_secs;
        let mut record = MarkerRecord::load(&marker_path);
        let mut report = CheckReport::default();

        if miner.has_external_recipient() && record.is_due(WarningKind::RewardsRecipient, now, cooldown) {
            notices.warn(format!(
                "[WARNING]: Make sure you have access to the REWARDS_RECIPIENT_ADDRESS ({}).",
                miner.rewards_recipient
            ));
            report.rewards_warned = true;
            mark_and_persist(&mut record, WarningKind::RewardsRecipient, now, &marker_path);
        }

        if record.is_due(WarningKind::LowBalance, now, cooldown) {
            let balance = match balances.native_balance(miner.master_address).await {
                Ok(balance) => {
                    metrics::record_balance_check(true);
                    balance
                }
                Err(source) => {
                    metrics::record_balance_check(false);
                    tracing::debug!(error = %source, "Balance query failed");
                    return Err(WarningCheckError::Connection {
                        endpoint: balances.endpoint(),
                        source,
                    });
                }
            };
            report.balance = Some(balance);

            if balance < self.config.min_balance_wei {
                notices.warn(format!(
                    "[WARNING]: Current master balance is {} $S. Consider topping it up.",
                    format_token_amount(balance)
                ));
                report.balance_warned = true;
                mark_and_persist(&mut record, WarningKind::LowBalance, now, &marker_path);
            } else {
                tracing::debug!(balance = %balance, "Master balance above threshold");
            }
        }

        Ok(report)
    }
}

fn skipped(reason: SkipReason) -> CheckOutcome {
    metrics::record_check_skipped(reason.label());
    CheckOutcome::Skipped(reason)
}

fn mark_and_persist(record: &mut MarkerRecord, kind: WarningKind, now: f64, path: &Path) {
    metrics::record_warning_emitted(kind.key());
    record.mark(kind, now);
    // The warning has already been shown; a failed write only means it may
    // show again on the next start.
    if let Err(e) = record.save(path) {
        tracing::warn!(path = %path.display(), kind = %kind, error = %e, "Failed to persist warning marker");
    }
}

/// Current Unix time in fractional seconds.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
