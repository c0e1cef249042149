//! # Order Form Library
//!
//! State store, submission workflow and event loop for the pizza order
//! form. All validation decisions are delegated to `pizza-core`.
//!
//! ## Module Organization
//! ```text
//! order_form/
//! ├── lib.rs          ◄─── You are here (logging, event loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── form.rs     ◄─── FormStore, FormView, tickets
//! │   └── config.rs   ◄─── FormConfig, ValidationMode
//! ├── submission.rs   ◄─── submit() workflow
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── form.rs     ◄─── FormEvent handling
//! └── error.rs        ◄─── FormError, AppError, EventError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging                                                  │
//! │     • tracing-subscriber with env filter, writes to stderr              │
//! │     • Default: info, pizza crates at debug; RUST_LOG overrides          │
//! │                                                                         │
//! │  2. Load FormConfig (defaults < file < PIZZA_* env)                     │
//! │                                                                         │
//! │  3. Resolve the schema once, share it as Arc<Schema>                    │
//! │                                                                         │
//! │  4. Mount an empty FormStore                                            │
//! │                                                                         │
//! │  5. Event loop: one JSON event in, one JSON reply out                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod submission;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppResult;
use state::{FormConfig, FormStore};

pub use submission::SubmitOutcome;

/// Loads configuration, mounts the form and serves stdin until EOF.
pub fn run(config_path: Option<PathBuf>) -> AppResult<()> {
    let config = FormConfig::load(config_path)?;
    let mut store = FormStore::from_config(&config)?;

    info!(
        mode = %config.validation_mode,
        "Order form mounted"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&mut store, stdin.lock(), stdout.lock())
}

/// Feeds every non-blank line of `input` to the store, writing one reply
/// line per event to `output`.
pub fn serve<R: BufRead, W: Write>(
    store: &mut FormStore,
    input: R,
    mut output: W,
) -> AppResult<()> {
    let mut handled = 0usize;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = commands::handle_line(store, &line);
        serde_json::to_writer(&mut output, &reply)?;
        writeln!(output)?;
        output.flush()?;
        handled += 1;
    }

    info!(events = handled, "Input closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every event
/// - `RUST_LOG=order_form=trace` - Trace the app crate only
/// - Default: `info,order_form=debug,pizza_core=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,order_form=debug,pizza_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
