//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     .env + environment → RawEnv → validate → warning check → ready
//!
//! Failure:
//!     StartupError → notice on stdout → exit status chosen by main
//! ```

pub mod startup;

pub use startup::{run_startup, AppContext, Startup, StartupError, DEFAULT_ERROR_EXIT_CODE};
