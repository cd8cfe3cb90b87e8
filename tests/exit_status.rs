//! Exit status and stdout contract of the `infinity-config` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

mod common;
use common::{OTHER_ADDRESS, TEST_PRIVATE_KEY};

/// The binary in `dir` with a clean environment, state kept in `dir`.
fn binary_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("infinity-config").unwrap();
    cmd.env_clear()
        .current_dir(dir)
        .arg("--state-dir")
        .arg(dir)
        .arg("--env-file")
        .arg(dir.join(".env"));
    cmd
}

#[test]
fn test_missing_key_exits_zero_with_message_on_stdout() {
    let dir = tempfile::tempdir().unwrap();

    binary_in(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::diff(
            "Configuration error: MASTER_PKEY is missing. Please set it in your .env file.\n",
        ))
        .stderr(predicate::str::contains("MASTER_PKEY is missing").not());
}

#[test]
fn test_legacy_address_mismatch_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    binary_in(dir.path())
        .env("MASTER_PKEY", TEST_PRIVATE_KEY)
        .env("MASTER_ADDRESS", OTHER_ADDRESS)
        .assert()
        .code(0)
        .stdout(predicate::str::diff(
            "Configuration error: MASTER_ADDRESS is deprecated. Please remove it from your .env file.\n",
        ));

    // Validation failed before the warning check touched the state dir.
    assert!(!dir.path().join(".infinity_miner_balance_check.lock").exists());
}

#[test]
fn test_unreachable_rpc_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let rpc_url = format!("http://{}", addr);

    binary_in(dir.path())
        .env("MASTER_PKEY", TEST_PRIVATE_KEY)
        .env("INFINITY_RPC", &rpc_url)
        .assert()
        .code(0)
        .stdout(predicate::str::diff(format!(
            "Connection error: Unable to establish a connection with INFINITY_RPC ({}).\n",
            rpc_url
        )));
}

#[test]
fn test_error_exit_code_override() {
    let dir = tempfile::tempdir().unwrap();

    binary_in(dir.path())
        .args(["--error-exit-code", "3"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with(
            "Configuration error: MASTER_PKEY is missing.",
        ));
}

#[test]
fn test_dotenv_file_supplies_credentials() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        format!("MASTER_PKEY={}\nMASTER_ADDRESS={}\n", TEST_PRIVATE_KEY, OTHER_ADDRESS),
    )
    .unwrap();

    // The key came from the file: validation reached the legacy address check.
    binary_in(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("MASTER_ADDRESS is deprecated"));
}
