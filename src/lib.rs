//! Startup configuration loader for the Infinity miner.

pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod warnings;

pub use config::{MinerConfig, RawEnv, WarningCheckConfig};
pub use lifecycle::{run_startup, AppContext, StartupError};
