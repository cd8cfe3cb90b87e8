//! Blockchain RPC client used for native balance queries.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint on first use
//! - Fetch the native balance of an address
//! - Optionally bound the call with a timeout (unbounded by default)

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Source of native balances.
///
/// The warning check depends on this seam rather than on a concrete RPC
/// client so alternative sources can be plugged in.
#[allow(async_fn_in_trait)]
pub trait BalanceSource {
    /// Native balance of `address` in the smallest denomination.
    async fn native_balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Human-readable endpoint description used in connection errors.
    fn endpoint(&self) -> String;
}

/// HTTP JSON-RPC balance client.
///
/// Construction never touches the network; the provider is built when a
/// balance is requested, so a run that skips the balance check never
/// connects.
#[derive(Clone)]
pub struct BlockchainClient {
    /// JSON-RPC endpoint URL, if configured.
    rpc_url: Option<String>,
    /// Optional request timeout.
    timeout_duration: Option<Duration>,
}

impl BlockchainClient {
    /// Create a new client for `rpc_url`.
    pub fn new(rpc_url: Option<String>, timeout_duration: Option<Duration>) -> Self {
        Self {
            rpc_url,
            timeout_duration,
        }
    }

    fn parse_url(&self) -> BlockchainResult<url::Url> {
        // No implicit localhost fallback: an unset endpoint fails the query.
        let raw = self.rpc_url.as_deref().ok_or(BlockchainError::MissingEndpoint)?;
        raw.parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", raw, e)))
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        let url = self.parse_url()?;
        let provider = ProviderBuilder::new().connect_http(url);
        let fut = provider.get_balance(address);

        let result = match self.timeout_duration {
            Some(limit) => timeout(limit, fut)
                .await
                .map_err(|_| BlockchainError::Timeout(limit.as_secs()))?,
            None => fut.await,
        };

        let balance = result.map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        tracing::debug!(address = %address, balance = %balance, "Fetched native balance");
        Ok(balance)
    }
}

impl BalanceSource for BlockchainClient {
    async fn native_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.get_balance(address).await
    }

    fn endpoint(&self) -> String {
        self.rpc_url.clone().unwrap_or_else(|| "None".to_string())
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
