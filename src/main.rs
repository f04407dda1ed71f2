//! Teller CLI
//!
//! Command-line interface for the single-branch retail bank.
//!
//! # Usage
//!
//! ```bash
//! teller open --holder "Asha Rao" --pin 4321 --type savings --initial-balance 2000
//! teller deposit 100001 500 --pin 4321
//! teller withdraw 100001 900 --pin 4321
//! teller transfer 100001 100002 250 --pin 4321
//! teller balance 100001 --pin 4321
//! teller admin bootstrap --username root --password secret
//! teller admin list-accounts --username root --password secret
//! ```
//!
//! Each invocation performs exactly one operation against the snapshot
//! (`--data-file`, default `accounts.json`) and exits. Administrative
//! commands authenticate against the administrator document
//! (`--admin-file`, default `admins.json`); create the first administrator
//! with `admin bootstrap`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid input, refused transaction, store failure, etc.)

use std::process;
use teller::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
