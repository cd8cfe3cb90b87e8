//! Environment loading.
//!
//! `.env` files are applied to the process environment with `dotenvy`, then
//! the recognised variables are snapshotted into a [`RawEnv`]. Everything
//! downstream works on the snapshot, never on `std::env` directly.

use std::path::Path;

/// Private key of the master account (required).
pub const MASTER_PKEY: &str = "MASTER_PKEY";
/// Legacy master address override (deprecated).
pub const MASTER_ADDRESS: &str = "MASTER_ADDRESS";
/// Address receiving mining rewards.
pub const REWARDS_RECIPIENT_ADDRESS: &str = "REWARDS_RECIPIENT_ADDRESS";
/// HTTP JSON-RPC endpoint.
pub const INFINITY_RPC: &str = "INFINITY_RPC";
/// WebSocket endpoint, consumed by other subsystems.
pub const INFINITY_WS: &str = "INFINITY_WS";
/// Optional timeout for the balance query, in seconds.
pub const INFINITY_RPC_TIMEOUT_SECS: &str = "INFINITY_RPC_TIMEOUT_SECS";
/// Log verbosity.
pub const LOGLEVEL: &str = "LOGLEVEL";

/// Unvalidated snapshot of the configuration variables.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawEnv {
    pub master_pkey: Option<String>,
    pub master_address: Option<String>,
    pub rewards_recipient_address: Option<String>,
    pub infinity_rpc: Option<String>,
    pub infinity_ws: Option<String>,
    pub rpc_timeout_secs: Option<String>,
    pub log_level: Option<String>,
}

impl RawEnv {
    /// Snapshot the recognised variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Snapshot the recognised variables through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            master_pkey: lookup(MASTER_PKEY),
            master_address: lookup(MASTER_ADDRESS),
            rewards_recipient_address: lookup(REWARDS_RECIPIENT_ADDRESS),
            infinity_rpc: lookup(INFINITY_RPC),
            infinity_ws: lookup(INFINITY_WS),
            rpc_timeout_secs: lookup(INFINITY_RPC_TIMEOUT_SECS),
            log_level: lookup(LOGLEVEL),
        }
    }
}

// Hand-written so the private key never reaches a log line.
impl std::fmt::Debug for RawEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawEnv")
            .field("master_pkey", &self.master_pkey.as_ref().map(|_| "<redacted>"))
            .field("master_address", &self.master_address)
            .field("rewards_recipient_address", &self.rewards_recipient_address)
            .field("infinity_rpc", &self.infinity_rpc)
            .field("infinity_ws", &self.infinity_ws)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Apply a `.env` file to the process environment.
///
/// With no explicit path the default dotenv search is used. A missing file
/// is not an error; a present but malformed one is. Variables already set in
/// the environment take precedence over file values.
pub fn load_dotenv(path: Option<&Path>) -> Result<(), dotenvy::Error> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}
