//! # Storefront Shell Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   renderer ──stdin──►  storefront-shell  ──stdout──► renderer           │
//! │   (one Intent JSON        │                 (one ViewResponse JSON      │
//! │    per line)              │                  per line)                  │
//! │                           └──stderr──► logs                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `storefront-shell [CONFIG_PATH]`

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    match storefront_shell::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("storefront-shell: {}", e);
            ExitCode::FAILURE
        }
    }
}
