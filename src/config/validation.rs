//! Credential validation.
//!
//! # Responsibilities
//! - Parse the master private key and derive the master address
//! - Enforce that the deprecated `MASTER_ADDRESS` matches the derived one
//! - Resolve the rewards recipient, defaulting to the master address
//!
//! # Design Decisions
//! - Validation is a pure function: `RawEnv → Result<MinerConfig, ConfigError>`
//! - Stops at the first failure; every failure is terminal for startup
//! - Error messages are the user-facing text printed at exit

use alloy::primitives::Address;
use thiserror::Error;

use crate::blockchain::wallet::redact_key;
use crate::blockchain::MasterIdentity;
use crate::config::env::RawEnv;
use crate::config::schema::MinerConfig;

/// Log level used when `LOGLEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Configuration errors. The display text is what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Configuration error: MASTER_PKEY is missing. Please set it in your .env file.")]
    MissingPrivateKey,

    #[error("Configuration error: The value provided for MASTER_PKEY ({redacted}) is not a valid private key.")]
    InvalidPrivateKey { redacted: String },

    #[error("Configuration error: MASTER_ADDRESS is deprecated. Please remove it from your .env file.")]
    DeprecatedMasterAddress,

    #[error("Configuration error: REWARDS_RECIPIENT_ADDRESS ({value}) is not a valid address.")]
    InvalidRecipient { value: String },

    #[error("Configuration error: INFINITY_RPC_TIMEOUT_SECS ({value}) must be a positive number of seconds.")]
    InvalidTimeout { value: String },
}

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validate a raw environment snapshot into a [`MinerConfig`].
pub fn validate_config(raw: &RawEnv) -> ConfigResult<MinerConfig> {
    let pkey = raw.master_pkey.as_deref().ok_or(ConfigError::MissingPrivateKey)?;

    let master = MasterIdentity::from_private_key(pkey).map_err(|_| {
        ConfigError::InvalidPrivateKey {
            redacted: redact_key(pkey),
        }
    })?;
    let master_address = master.address();

    if let Some(legacy) = raw.master_address.as_deref() {
        if !is_same_address(legacy, master_address) {
            tracing::debug!(legacy = %legacy, derived = %master_address, "MASTER_ADDRESS mismatch");
            return Err(ConfigError::DeprecatedMasterAddress);
        }
    }

    let rewards_recipient = match raw.rewards_recipient_address.as_deref() {
        Some(value) => parse_address(value).ok_or_else(|| ConfigError::InvalidRecipient {
            value: value.to_string(),
        })?,
        None => master_address,
    };

    let rpc_timeout_secs = raw
        .rpc_timeout_secs
        .as_deref()
        .map(parse_timeout)
        .transpose()?;

    Ok(MinerConfig {
        master,
        master_address,
        rewards_recipient,
        rpc_url: raw.infinity_rpc.clone(),
        ws_url: raw.infinity_ws.clone(),
        rpc_timeout_secs,
        log_level: raw
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    })
}

/// Compare an address string against a parsed address, ignoring case.
///
/// Checksums are not enforced; an unparseable string never matches.
pub fn is_same_address(candidate: &str, address: Address) -> bool {
    parse_address(candidate) == Some(address)
}

fn parse_address(value: &str) -> Option<Address> {
    value.trim().parse::<Address>().ok()
}

fn parse_timeout(value: &str) -> ConfigResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout {
            value: value.to_string(),
        }),
    }
}
