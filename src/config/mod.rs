//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional) + process environment
//!     → env.rs (dotenv load, snapshot into RawEnv)
//!     → validation.rs (key parsing, address checks)
//!     → MinerConfig (validated, immutable)
//!     → handed to the warning check and the rest of the process
//! ```
//!
//! # Design Decisions
//! - Config is immutable once validated
//! - Validation works on a snapshot, never on ambient `std::env`
//! - Optional settings have defaults; only `MASTER_PKEY` is required

pub mod env;
pub mod schema;
pub mod validation;

pub use env::RawEnv;
pub use schema::{MinerConfig, WarningCheckConfig};
pub use validation::{validate_config, ConfigError};
