//! # Storefront Shell Library
//!
//! Hosts one storefront session and talks to the renderer over JSON lines.
//!
//! ## Module Organization
//! ```text
//! storefront_shell/
//! ├── lib.rs          ◄─── You are here (startup & bridge loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Session behind one Mutex + change feed
//! │   └── config.rs   ◄─── Shell configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── intent.rs   ◄─── Parse + dispatch one intent
//! │   └── view.rs     ◄─── Response building
//! └── error.rs        ◄─── ApiError (per line) and ShellError (fatal)
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use storefront_core::Session;
use tracing::{info, info_span, warn};
use tracing_subscriber::EnvFilter;

use commands::{current_view, handle_line, ViewResponse};
use error::ShellResult;
use state::{SessionState, ShellConfig};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Runs the shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • CLI path, STOREFRONT_CONFIG, or platform config dir               │
/// │     • STOREFRONT_* env overrides                                        │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • RUST_LOG > config log_filter > default                            │
/// │                                                                         │
/// │  3. Create Session ───────────────────────────────────────────────────► │
/// │     • Static catalog, empty cart, Login screen                          │
/// │                                                                         │
/// │  4. Bridge Loop ──────────────────────────────────────────────────────► │
/// │     • Initial view, then one response per intent line until EOF         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ShellResult<()> {
    let loaded = ShellConfig::load(std::env::args_os().nth(1).map(PathBuf::from));
    init_tracing(
        loaded
            .as_ref()
            .ok()
            .and_then(|config| config.log_filter.as_deref()),
    );

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load shell config: {}. Using defaults.", e);
            ShellConfig::default()
        }
    };

    let state = SessionState::new(Session::with_static_catalog(config.store_name.clone()));
    let span = info_span!("session", id = %state.id());
    let _guard = span.enter();

    info!(store = %config.store_name, "Starting storefront shell");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(&state, &config, stdin.lock(), stdout.lock())
}

/// The bridge loop over any line source and sink.
///
/// Writes the initial view, then one response per non-blank input line.
/// Returns when the input ends.
pub fn run_with<R, W>(
    state: &SessionState,
    config: &ShellConfig,
    input: R,
    mut output: W,
) -> ShellResult<()>
where
    R: BufRead,
    W: Write,
{
    write_response(&mut output, &current_view(state, config, None))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(state, config, &line);
        write_response(&mut output, &response)?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

fn write_response<W: Write>(output: &mut W, response: &ViewResponse) -> ShellResult<()> {
    serde_json::to_writer(&mut *output, response)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_core=trace` - Trace the core only
/// - Default: `info,storefront=debug`
fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)));

    // stdout carries the protocol
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
