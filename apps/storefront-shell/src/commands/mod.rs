//! # Commands Module
//!
//! What the bridge does with each line it reads.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── intent.rs   ◄─── Parse and dispatch one intent
//! └── view.rs     ◄─── Build the response the renderer draws from
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  {"intent":"onCategorySelected","id":3}                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle_line ──► serde_json ──► dispatch_intent ──► Session::dispatch   │
//! │         │                             │ Err                             │
//! │         │                             ▼                                 │
//! │         │                         ApiError                              │
//! │         ▼                                                               │
//! │  current_view ──► { view, cartTotalDisplay, changes, error? }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod intent;
pub mod view;

pub use intent::{dispatch_intent, handle_line};
pub use view::{current_view, ViewResponse};
