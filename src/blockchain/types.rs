//! Chain-specific types and error definitions.

use alloy::primitives::U256;
use thiserror::Error;

/// Smallest-unit denominator of one whole $S token (18 decimals).
pub const WEI_PER_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// No RPC endpoint configured.
    #[error("RPC endpoint not configured")]
    MissingEndpoint,

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Format a wei amount as whole tokens rounded to two decimals.
///
/// Rounding is half-up on the third decimal and done in integer space, so
/// large balances never lose precision.
pub fn format_token_amount(wei: U256) -> String {
    let cent = WEI_PER_TOKEN / U256::from(100u64);
    let half_cent = cent / U256::from(2u64);
    let cents = wei.saturating_add(half_cent) / cent;
    let whole = cents / U256::from(100u64);
    let frac = cents % U256::from(100u64);
    format!("{}.{:02}", whole, frac.to::<u64>())
}
