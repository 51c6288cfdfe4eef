//! # storefront-core: Application Core of the Storefront Shell
//!
//! Everything a mobile storefront does except drawing pixels: the catalog,
//! the cart, navigation between screens, and the per-screen controllers that
//! turn user intents into state changes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Renderer (native UI)                         │   │
//! │  │      Login ──► Home ──► Products ──► ProductDetail ──► Cart     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Intents up, views down (JSON)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-shell (bridge)                       │   │
//! │  │       config, logging, JSON-lines loop, error envelope          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌──────────┐  ┌────────────┐  ┌─────────────┐   │   │
//! │  │   │ catalog │  │   cart   │  │ navigation │  │   screens   │   │   │
//! │  │   │Provider │  │CartStore │  │ Navigator  │  │ controllers │   │   │
//! │  │   └─────────┘  └──────────┘  └────────────┘  └─────────────┘   │   │
//! │  │                       ▲ session ties them together               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • SINGLE-THREADED STATE                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, CartLine, ScreenId)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Navigation, intent and validation errors
//! - [`validation`] - Param and field validation
//! - [`catalog`] - Category/product source
//! - [`cart`] - The cart store
//! - [`navigation`] - Frame stack and transition table
//! - [`intent`] - User intents sent by the renderer
//! - [`screens`] - Screen controllers and their view models
//! - [`session`] - One user's storefront: routes intents to the active screen
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Intent, Session, ScreenId};
//!
//! let mut session = Session::with_static_catalog("Hardware Store");
//! session.dispatch(Intent::LoginSubmit).unwrap();
//! session.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
//! session.dispatch(Intent::ProductSelected { id: 1 }).unwrap();
//! session.dispatch(Intent::AddToCart { id: 1 }).unwrap();
//!
//! assert_eq!(session.current_screen(), ScreenId::ProductDetail);
//! assert_eq!(session.cart().total().cents(), 1999);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod intent;
pub mod money;
pub mod navigation;
pub mod screens;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartEvent, CartStore, CartTotals};
pub use catalog::{CatalogProvider, StaticCatalog};
pub use error::{IntentError, NavigationError, ValidationError};
pub use intent::Intent;
pub use money::Money;
pub use navigation::{NavigationEvent, NavigationFrame, Navigator, Route, Transition};
pub use screens::ScreenView;
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Buffer size of the cart and navigation change channels.
///
/// A subscriber that falls further behind than this sees `Lagged` and skips
/// ahead; state itself is never lost, only notifications.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
