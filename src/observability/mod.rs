//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured diagnostic events, stderr)
//!     → metrics.rs (counters through the metrics facade)
//!     → notices.rs (operator-facing warnings and errors, stdout)
//! ```

pub mod logging;
pub mod metrics;
pub mod notices;

pub use notices::{Notice, NoticeLevel, Notices};
