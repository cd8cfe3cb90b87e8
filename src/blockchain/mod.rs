//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (key parsing, address derivation, redaction)
//!     → client.rs (lazy RPC connection, balance queries)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data

pub mod client;
pub mod types;
pub mod wallet;

pub use client::{BalanceSource, BlockchainClient};
pub use types::{BlockchainError, BlockchainResult};
pub use wallet::MasterIdentity;
