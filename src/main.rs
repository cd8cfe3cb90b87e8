//! Infinity miner startup check.
//!
//! Loads `.env`, validates the master credentials and runs the
//! deduplicated balance/ownership warning check.
//!
//! # Architecture Overview
//!
//! ```text
//!   .env ──▶ config::env ──▶ config::validation ──▶ MinerConfig
//!                                                       │
//!                                                       ▼
//!            observability::notices ◀── warnings::check ──▶ blockchain::client ──▶ INFINITY_RPC
//!                   (stdout)                 │
//!                                            ▼
//!                             <state-dir>/.infinity_miner_balance_check.lock
//!                             <state-dir>/.infinity_miner_balance_checked
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use infinity_config::config::env::load_dotenv;
use infinity_config::config::validation::DEFAULT_LOG_LEVEL;
use infinity_config::config::{RawEnv, WarningCheckConfig};
use infinity_config::lifecycle::{run_startup, AppContext, DEFAULT_ERROR_EXIT_CODE};
use infinity_config::observability::logging::init_logging;
use infinity_config::observability::Notices;

#[derive(Parser, Debug)]
#[command(name = "infinity-config")]
#[command(about = "Validate Infinity miner configuration and run startup checks", long_about = None)]
struct Cli {
    /// Explicit .env file (default: search from the working directory).
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Directory holding the shared lock and marker files.
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Exit status used when startup fails.
    #[arg(long, default_value_t = DEFAULT_ERROR_EXIT_CODE)]
    error_exit_code: u8,

    /// Log the resolved configuration (secrets omitted).
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let dotenv_result = load_dotenv(cli.env_file.as_deref());
    let raw = RawEnv::from_env();
    init_logging(raw.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));

    if let Err(e) = dotenv_result {
        tracing::warn!(error = %e, "Ignoring unreadable .env file");
    }

    let warning_config = match cli.state_dir {
        Some(dir) => WarningCheckConfig::with_state_dir(dir),
        None => WarningCheckConfig::default(),
    };
    let mut ctx = AppContext::new(Notices::stdout(), warning_config);

    match run_startup(&mut ctx, &raw).await {
        Ok(startup) => {
            if cli.print_config {
                match serde_json::to_string_pretty(&startup.config) {
                    Ok(json) => tracing::info!(config = %json, "Resolved configuration"),
                    Err(e) => tracing::warn!(error = %e, "Failed to render configuration"),
                }
            }
            tracing::info!("Startup checks complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            ctx.report_failure(&err);
            ExitCode::from(cli.error_exit_code)
        }
    }
}
