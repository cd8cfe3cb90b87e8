//! Master identity derived from the configured private key.
//!
//! # Security
//! - The private key is read once from the environment and held in memory only
//! - Keys are never logged or serialized; `Debug` shows the address alone
//! - Error messages carry a redacted form of the key, never the key itself

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Character used to mask the interior of a redacted key.
const MASK_CHAR: char = '*';

/// Number of characters left visible at each end of a redacted key.
///
/// Values of `2 * VISIBLE_EDGE` characters or fewer have no interior to mask
/// and would be shown in full, so [`redact_key`] masks them entirely.
const VISIBLE_EDGE: usize = 4;

/// The miner's master identity: signing key plus derived address.
#[derive(Clone)]
pub struct MasterIdentity {
    signer: PrivateKeySigner,
}

impl MasterIdentity {
    /// Parse a hex-encoded private key (with or without `0x` prefix).
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Master identity derived");

        Ok(Self { signer })
    }

    /// The address derived from the private key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

impl std::fmt::Debug for MasterIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterIdentity")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Mask a secret for display: first and last four characters stay visible.
///
/// Values too short to have an interior are masked completely so that no
/// character is shown twice or leaked whole.
pub fn redact_key(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= VISIBLE_EDGE * 2 {
        return MASK_CHAR.to_string().repeat(chars.len());
    }

    let head: String = chars[..VISIBLE_EDGE].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_EDGE..].iter().collect();
    let interior = MASK_CHAR.to_string().repeat(chars.len() - VISIBLE_EDGE * 2);
    format!("{head}{interior}{tail}")
}
