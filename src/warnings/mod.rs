//! Startup warning subsystem.
//!
//! # Data Flow
//! ```text
//! MinerConfig (validated addresses)
//!     → lock.rs (host-wide non-blocking exclusive lock, RAII release)
//!     → marker.rs (last-warned timestamps, fail-open JSON)
//!     → check.rs (rewards recipient + balance reminders with cooldown)
//!     → Notices (operator output)
//! ```
//!
//! # Design Decisions
//! - Only one process per host runs the check at a time; losers skip it
//! - Each warning type has its own cooldown window
//! - A check that does not warn never refreshes its window

pub mod check;
pub mod lock;
pub mod marker;

pub use check::{CheckOutcome, CheckReport, SkipReason, WarningCheck, WarningCheckError};
pub use lock::{CheckLock, LockAttempt};
pub use marker::{MarkerRecord, WarningKind};
