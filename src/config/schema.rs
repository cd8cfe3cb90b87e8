//! Configuration schema definitions.
//!
//! [`MinerConfig`] is the validated, immutable result of startup
//! validation. [`WarningCheckConfig`] holds the tunables of the
//! deduplicated warning check; all of them have defaults.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::blockchain::types::WEI_PER_TOKEN;
use crate::blockchain::MasterIdentity;

/// File name of the host-wide lock guarding the warning check.
pub const LOCK_FILE_NAME: &str = ".infinity_miner_balance_check.lock";

/// File name of the persisted last-warned timestamps.
pub const MARKER_FILE_NAME: &str = ".infinity_miner_balance_checked";

/// Minimum time between two emissions of the same warning.
pub const DEFAULT_WARNING_COOLDOWN_SECS: u64 = 600;

/// Validated miner configuration.
#[derive(Debug, Clone, Serialize)]
pub struct MinerConfig {
    /// Master identity. Never serialized.
    #[serde(skip)]
    pub master: MasterIdentity,

    /// Address derived from the master key.
    pub master_address: Address,

    /// Address receiving rewards; defaults to the master address.
    pub rewards_recipient: Address,

    /// HTTP JSON-RPC endpoint.
    pub rpc_url: Option<String>,

    /// WebSocket endpoint, carried for other subsystems.
    pub ws_url: Option<String>,

    /// Timeout applied to the balance query, if any.
    pub rpc_timeout_secs: Option<u64>,

    /// Requested log level as given in the environment.
    pub log_level: String,
}

impl MinerConfig {
    /// Whether rewards go to an address other than the master's.
    pub fn has_external_recipient(&self) -> bool {
        self.master_address != self.rewards_recipient
    }

    /// Timeout for the balance call.
    pub fn rpc_timeout(&self) -> Option<Duration> {
        self.rpc_timeout_secs.map(Duration::from_secs)
    }
}

/// Warning check configuration.
#[derive(Debug, Clone, Serialize)]
pub struct WarningCheckConfig {
    /// Directory holding the lock and marker files.
    pub state_dir: PathBuf,

    /// Cooldown per warning type, in seconds.
    pub cooldown_secs: u64,

    /// Balance below which the top-up warning fires, in wei.
    pub min_balance_wei: U256,
}

impl WarningCheckConfig {
    /// Default configuration rooted at `state_dir`.
    pub fn with_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            ..Self::default()
        }
    }

    /// Path of the lock file.
    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join(LOCK_FILE_NAME)
    }

    /// Path of the marker file.
    pub fn marker_path(&self) -> PathBuf {
        self.state_dir.join(MARKER_FILE_NAME)
    }
}

impl Default for WarningCheckConfig {
    fn default() -> Self {
        Self {
            state_dir: std::env::temp_dir(),
            cooldown_secs: DEFAULT_WARNING_COOLDOWN_SECS,
            min_balance_wei: U256::from(10u64) * WEI_PER_TOKEN,
        }
    }
}
