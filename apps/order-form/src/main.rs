//! # Order Form Entry Point
//!
//! ```text
//! order-form [CONFIG_PATH] < events.jsonl > views.jsonl
//! ```
//!
//! Reads one JSON event per line from stdin and writes one JSON reply per
//! line to stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    order_form::init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);

    match order_form::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("order-form failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
