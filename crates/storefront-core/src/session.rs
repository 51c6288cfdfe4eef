//! # Session
//!
//! One user's storefront: the navigator, the cart, the controllers with
//! local state, and a handle on the catalog. Owned explicitly and passed by
//! reference; there is no global instance, so tests build as many isolated
//! sessions as they like.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  dispatch(intent)                                                       │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  navigator.current().route()                                            │
//! │      │                                                                  │
//! │      ├── Login ─────────────► LoginController (username, password)      │
//! │      ├── Home ──────────────► HomeController (search query)            │
//! │      ├── Products{category} ► products::handle(category, ..)           │
//! │      ├── ProductDetail{p} ──► product_detail::handle(p, ..)            │
//! │      └── Cart ──────────────► cart::handle(..)                          │
//! │                                                                         │
//! │  Ok  → state changed, events emitted                                   │
//! │  Err → nothing changed, the intent is dropped                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call runs to completion before the next one starts. A host that
//! shares a session across threads must put it behind a single lock.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::cart::{CartEvent, CartStore};
use crate::catalog::{CatalogProvider, StaticCatalog};
use crate::error::IntentResult;
use crate::intent::Intent;
use crate::navigation::{NavigationEvent, Navigator, Route};
use crate::screens::{
    self, HomeController, LoginController, ScreenContext, ScreenView,
};
use crate::types::ScreenId;

/// A storefront session.
pub struct Session {
    store_name: String,
    catalog: Arc<dyn CatalogProvider>,
    navigator: Navigator,
    cart: CartStore,
    login: LoginController,
    home: HomeController,
}

impl Session {
    /// Starts a session at the Login screen with an empty cart.
    pub fn new(store_name: impl Into<String>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Session {
            store_name: store_name.into(),
            catalog,
            navigator: Navigator::new(),
            cart: CartStore::new(),
            login: LoginController::new(),
            home: HomeController::new(),
        }
    }

    /// Session backed by the built-in fixtures.
    pub fn with_static_catalog(store_name: impl Into<String>) -> Self {
        Self::new(store_name, Arc::new(StaticCatalog::new()))
    }

    /// Routes an intent to the active screen's controller.
    ///
    /// ## Errors
    /// Whatever the controller rejects: an intent the screen doesn't accept,
    /// an unknown id, or a refused navigation operation. State is unchanged
    /// on error.
    pub fn dispatch(&mut self, intent: Intent) -> IntentResult<()> {
        let route = self.navigator.current().route().clone();
        let screen = route.screen();

        let mut ctx = ScreenContext {
            navigator: &mut self.navigator,
            cart: &mut self.cart,
            catalog: self.catalog.as_ref(),
        };

        let result = match &route {
            Route::Login => self.login.handle(&intent, &mut ctx),
            Route::Home => self.home.handle(&intent, &mut ctx),
            Route::Products { category } => screens::products::handle(category, &intent, &mut ctx),
            Route::ProductDetail { product } => {
                screens::product_detail::handle(product, &intent, &mut ctx)
            }
            Route::Cart => screens::cart::handle(&intent, &mut ctx),
        };

        match &result {
            Ok(()) => debug!(
                %screen,
                intent = intent.name(),
                now = %self.navigator.current().screen(),
                "Intent handled"
            ),
            Err(e) => warn!(%screen, intent = intent.name(), error = %e, "Intent rejected"),
        }
        result
    }

    /// View of the active screen.
    pub fn view(&self) -> ScreenView {
        match self.navigator.current().route() {
            Route::Login => ScreenView::Login(self.login.view(&self.store_name)),
            Route::Home => ScreenView::Home(self.home.view(self.catalog.as_ref(), &self.cart)),
            Route::Products { category } => {
                ScreenView::Products(screens::products::view(category, self.catalog.as_ref()))
            }
            Route::ProductDetail { product } => {
                ScreenView::ProductDetail(screens::product_detail::view(product, &self.cart))
            }
            Route::Cart => ScreenView::Cart(screens::cart::view(&self.cart)),
        }
    }

    pub fn current_screen(&self) -> ScreenId {
        self.navigator.current().screen()
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.catalog.as_ref()
    }

    pub fn subscribe_cart(&self) -> broadcast::Receiver<CartEvent> {
        self.cart.subscribe()
    }

    pub fn subscribe_navigation(&self) -> broadcast::Receiver<NavigationEvent> {
        self.navigator.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IntentError, NavigationError};
    use crate::types::Product;
    use tokio::sync::broadcast::error::TryRecvError;

    fn logged_in() -> Session {
        let mut session = Session::with_static_catalog("Hardware Store");
        session.dispatch(Intent::LoginSubmit).unwrap();
        session
    }

    #[test]
    fn test_starts_at_login() {
        let session = Session::with_static_catalog("Hardware Store");
        assert_eq!(session.current_screen(), ScreenId::Login);

        let ScreenView::Login(view) = session.view() else {
            panic!("expected login view");
        };
        assert_eq!(view.title, "Hardware Store");
    }

    #[test]
    fn test_paints_scenario() {
        let mut session = Session::with_static_catalog("Hardware Store");
        session
            .dispatch(Intent::UsernameChanged {
                value: "anyone".into(),
            })
            .unwrap();
        session.dispatch(Intent::LoginSubmit).unwrap();

        assert_eq!(session.current_screen(), ScreenId::Home);
        assert_eq!(session.navigator().depth(), 1);
        assert_eq!(session.navigator().root().screen(), ScreenId::Home);

        // Paints is id 3
        session.dispatch(Intent::CategorySelected { id: 3 }).unwrap();
        assert_eq!(session.current_screen(), ScreenId::Products);
        assert_eq!(session.navigator().current().params()["category"], "Paints");

        session.dispatch(Intent::ProductSelected { id: 1 }).unwrap();
        let expected = Product {
            id: 1,
            name: "Hammer".to_string(),
            unit_price_cents: 1999,
            stock_quantity: 15,
        };
        assert_eq!(
            session.navigator().current().route(),
            &Route::ProductDetail {
                product: expected.clone()
            }
        );

        session.dispatch(Intent::AddToCart { id: 1 }).unwrap();
        let lines = session.cart().lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity(), 1);
        assert_eq!(lines[0].product(), &expected);
        assert_eq!(session.cart().total().to_string(), "$19.99");

        session.dispatch(Intent::AddToCart { id: 1 }).unwrap();
        assert_eq!(session.cart().lines()[0].quantity(), 2);
        assert_eq!(session.cart().total().to_string(), "$39.98");
    }

    #[test]
    fn test_back_through_the_stack() {
        let mut session = logged_in();
        session.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
        session.dispatch(Intent::ProductSelected { id: 2 }).unwrap();
        session.dispatch(Intent::OpenCart).unwrap();
        assert_eq!(session.navigator().depth(), 4);

        for expected in [ScreenId::ProductDetail, ScreenId::Products, ScreenId::Home] {
            session.dispatch(Intent::Back).unwrap();
            assert_eq!(session.current_screen(), expected);
        }

        assert_eq!(
            session.dispatch(Intent::Back),
            Err(IntentError::Navigation(NavigationError::StackEmpty {
                screen: ScreenId::Home
            }))
        );
        assert_eq!(session.navigator().depth(), 1);
    }

    #[test]
    fn test_rejected_intent_changes_nothing() {
        let mut session = logged_in();
        session.dispatch(Intent::CategorySelected { id: 2 }).unwrap();
        let frames = session.navigator().frames();

        assert!(matches!(
            session.dispatch(Intent::Checkout),
            Err(IntentError::Unsupported {
                screen: ScreenId::Products,
                intent: "onCheckout"
            })
        ));
        assert_eq!(
            session.dispatch(Intent::ProductSelected { id: 77 }),
            Err(IntentError::UnknownProduct(77))
        );
        assert_eq!(session.navigator().frames(), frames);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_cart_survives_navigation() {
        let mut session = logged_in();
        session.dispatch(Intent::CategorySelected { id: 4 }).unwrap();
        session.dispatch(Intent::ProductSelected { id: 3 }).unwrap();
        session.dispatch(Intent::AddToCart { id: 3 }).unwrap();
        session.dispatch(Intent::Back).unwrap();
        session.dispatch(Intent::Back).unwrap();

        let ScreenView::Home(view) = session.view() else {
            panic!("expected home view");
        };
        assert_eq!(view.cart_item_count, 1);

        session.dispatch(Intent::OpenCart).unwrap();
        let ScreenView::Cart(view) = session.view() else {
            panic!("expected cart view");
        };
        assert_eq!(view.totals.total.cents(), 9999);
    }

    #[test]
    fn test_checkout_and_remove() {
        let mut session = logged_in();
        session.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
        session.dispatch(Intent::ProductSelected { id: 1 }).unwrap();
        session.dispatch(Intent::AddToCart { id: 1 }).unwrap();
        session.dispatch(Intent::OpenCart).unwrap();

        session.dispatch(Intent::RemoveFromCart { id: 2 }).unwrap();
        assert_eq!(session.cart().item_count(), 1);

        session.dispatch(Intent::Checkout).unwrap();
        assert!(session.cart().total().is_zero());
        assert_eq!(session.current_screen(), ScreenId::Cart);
    }

    #[test]
    fn test_home_search_state_survives_round_trip() {
        let mut session = logged_in();
        session
            .dispatch(Intent::SearchChanged {
                value: "drill".into(),
            })
            .unwrap();
        session.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
        session.dispatch(Intent::Back).unwrap();

        let ScreenView::Home(view) = session.view() else {
            panic!("expected home view");
        };
        assert_eq!(view.search_query, "drill");
        assert_eq!(view.search_results.len(), 1);
    }

    #[test]
    fn test_isolated_sessions() {
        let mut a = logged_in();
        let b = logged_in();

        a.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
        assert_eq!(a.current_screen(), ScreenId::Products);
        assert_eq!(b.current_screen(), ScreenId::Home);
    }

    #[test]
    fn test_subscriptions() {
        let mut session = logged_in();
        let mut nav_rx = session.subscribe_navigation();
        let mut cart_rx = session.subscribe_cart();

        session.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
        session.dispatch(Intent::ProductSelected { id: 1 }).unwrap();
        session.dispatch(Intent::AddToCart { id: 1 }).unwrap();

        assert_eq!(nav_rx.try_recv().unwrap().active.screen(), ScreenId::Products);
        assert_eq!(
            nav_rx.try_recv().unwrap().active.screen(),
            ScreenId::ProductDetail
        );
        assert_eq!(nav_rx.try_recv().unwrap_err(), TryRecvError::Empty);

        assert_eq!(
            cart_rx.try_recv().unwrap(),
            CartEvent::ItemAdded {
                product_id: 1,
                quantity: 1
            }
        );
    }
}
