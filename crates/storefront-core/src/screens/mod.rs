//! # Screen Controllers
//!
//! One controller per screen. A controller is a thin adapter: it turns an
//! intent into at most one navigation operation and at most one cart
//! operation, and builds the read-only view the renderer draws.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Intent ──► controller.handle(intent, ctx) ──┬──► Navigator (≤ 1 op)   │
//! │                                               └──► CartStore (≤ 1 op)   │
//! │                                                                         │
//! │   controller.view(...) ──► ScreenView ──► renderer                      │
//! │                                                                         │
//! │   Cross-screen data only travels through Route params or the cart.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Login and Home keep local field state (text inputs), so they are structs
//! owned by the session. Products, ProductDetail and Cart are stateless:
//! everything they need comes from the active route or the cart.

use serde::Serialize;
use ts_rs::TS;

use crate::cart::CartStore;
use crate::catalog::CatalogProvider;
use crate::error::{IntentError, IntentResult};
use crate::intent::Intent;
use crate::navigation::Navigator;
use crate::types::ScreenId;

pub mod cart;
pub mod home;
pub mod login;
pub mod product_detail;
pub mod products;

pub use cart::CartView;
pub use home::{HomeController, HomeView};
pub use login::{LoginController, LoginView};
pub use product_detail::ProductDetailView;
pub use products::ProductsView;

/// What a controller may touch while handling an intent.
pub struct ScreenContext<'a> {
    pub navigator: &'a mut Navigator,
    pub cart: &'a mut CartStore,
    pub catalog: &'a dyn CatalogProvider,
}

/// View of the active screen, tagged with its screen id.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "screen")]
pub enum ScreenView {
    Login(LoginView),
    Home(HomeView),
    Products(ProductsView),
    ProductDetail(ProductDetailView),
    Cart(CartView),
}

impl ScreenView {
    pub fn screen(&self) -> ScreenId {
        match self {
            ScreenView::Login(_) => ScreenId::Login,
            ScreenView::Home(_) => ScreenId::Home,
            ScreenView::Products(_) => ScreenId::Products,
            ScreenView::ProductDetail(_) => ScreenId::ProductDetail,
            ScreenView::Cart(_) => ScreenId::Cart,
        }
    }
}

/// Intent names a screen accepts, in the form views expose them.
pub(crate) fn intent_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

pub(crate) fn unsupported(screen: ScreenId, intent: &Intent) -> IntentError {
    IntentError::Unsupported {
        screen,
        intent: intent.name(),
    }
}

/// `onBack` on any screen: pop, which fails on the root.
pub(crate) fn back(ctx: &mut ScreenContext<'_>) -> IntentResult<()> {
    ctx.navigator.pop()?;
    Ok(())
}
