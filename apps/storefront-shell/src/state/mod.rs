//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐    ┌──────────────────────────────┐  │
//! │  │        SessionState          │    │        ShellConfig           │  │
//! │  │                              │    │                              │  │
//! │  │  Arc<Mutex<                  │    │  store_name                  │  │
//! │  │    Session + ChangeFeed      │    │  currency_symbol/decimals    │  │
//! │  │  >>                          │    │  log_filter                  │  │
//! │  └──────────────────────────────┘    └──────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: all access through one Mutex                          │
//! │  • ShellConfig: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::ShellConfig;
pub use session::{Change, SessionState};
