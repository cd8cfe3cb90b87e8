//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate credentials from the environment snapshot
//! - Run the deduplicated warning check against the configured node
//! - Surface terminal failures as values; the entry point picks the exit code
//!
//! # Design Decisions
//! - Fail fast: any startup error is terminal
//! - Stages run in order, never concurrently
//! - Failures exit with status 0 unless the operator asks otherwise

use thiserror::Error;

use crate::blockchain::BlockchainClient;
use crate::config::{validate_config, ConfigError, MinerConfig, RawEnv, WarningCheckConfig};
use crate::observability::Notices;
use crate::warnings::{CheckOutcome, WarningCheck, WarningCheckError};

/// Exit status used for startup failures unless overridden.
pub const DEFAULT_ERROR_EXIT_CODE: u8 = 0;

/// Terminal startup failure. Display text is the operator message.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    WarningCheck(#[from] WarningCheckError),
}

/// Process-wide state built once at startup and passed down explicitly.
#[derive(Debug)]
pub struct AppContext {
    /// Operator-facing output.
    pub notices: Notices,
    /// Warning check tunables and state directory.
    pub warning_config: WarningCheckConfig,
}

impl AppContext {
    pub fn new(notices: Notices, warning_config: WarningCheckConfig) -> Self {
        Self {
            notices,
            warning_config,
        }
    }

    /// Print a terminal failure for the operator.
    pub fn report_failure(&mut self, err: &StartupError) {
        tracing::debug!(error = ?err, "Startup aborted");
        self.notices.error(err.to_string());
    }
}

/// Successful startup result.
#[derive(Debug)]
pub struct Startup {
    pub config: MinerConfig,
    pub check: CheckOutcome,
}

/// Validate configuration and run the warning check.
pub async fn run_startup(ctx: &mut AppContext, raw: &RawEnv) -> Result<Startup, StartupError> {
    let config = validate_config(raw)?;

    tracing::info!(
        master_address = %config.master_address,
        rewards_recipient = %config.rewards_recipient,
        rpc_url = config.rpc_url.as_deref().unwrap_or("<unset>"),
        "Credentials validated"
    );

    let client = BlockchainClient::new(config.rpc_url.clone(), config.rpc_timeout());
    let check = WarningCheck::new(ctx.warning_config.clone())
        .run(&config, &client, &mut ctx.notices)
        .await?;

    tracing::debug!(outcome = ?check, "Warning check finished");
    Ok(Startup { config, check })
}
