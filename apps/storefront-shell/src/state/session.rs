//! # Session State
//!
//! The session is wrapped in `Arc<Mutex<T>>` so every mutation of the cart
//! and the navigation stack goes through one exclusive-access path. No
//! caller can observe a half-applied intent.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State                                        │
//! │                                                                         │
//! │  SessionState { id, shared: Arc<Mutex<Shared>> }                        │
//! │                              │                                          │
//! │                 ┌────────────┴────────────┐                             │
//! │                 ▼                         ▼                             │
//! │        Session (core)              ChangeFeed                           │
//! │        navigator, cart,            receivers subscribed at startup,    │
//! │        controllers                 drained after every intent          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use storefront_core::{CartEvent, NavigationEvent, Session};
use tokio::sync::broadcast::{error::TryRecvError, Receiver};
use tracing::warn;
use uuid::Uuid;

/// One change notification, tagged with the component that emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "event", rename_all = "camelCase")]
pub enum Change {
    Navigation(NavigationEvent),
    Cart(CartEvent),
}

/// Subscriptions to the session's cart and navigator.
struct ChangeFeed {
    navigation: Receiver<NavigationEvent>,
    cart: Receiver<CartEvent>,
}

impl ChangeFeed {
    fn subscribe(session: &Session) -> Self {
        ChangeFeed {
            navigation: session.subscribe_navigation(),
            cart: session.subscribe_cart(),
        }
    }

    /// Everything emitted since the last drain, navigation first.
    fn drain(&mut self) -> Vec<Change> {
        let mut changes: Vec<Change> = drain_receiver(&mut self.navigation)
            .into_iter()
            .map(Change::Navigation)
            .collect();
        changes.extend(drain_receiver(&mut self.cart).into_iter().map(Change::Cart));
        changes
    }
}

fn drain_receiver<T: Clone>(rx: &mut Receiver<T>) -> Vec<T> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Change feed lagged, notifications dropped");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    events
}

struct Shared {
    session: Session,
    feed: ChangeFeed,
}

/// Thread-safe session state.
#[derive(Clone)]
pub struct SessionState {
    id: Uuid,
    shared: Arc<Mutex<Shared>>,
}

impl SessionState {
    /// Wraps a session and subscribes to its change notifications.
    pub fn new(session: Session) -> Self {
        let feed = ChangeFeed::subscribe(&session);
        SessionState {
            id: Uuid::new_v4(),
            shared: Arc::new(Mutex::new(Shared { session, feed })),
        }
    }

    /// Identifier recorded in log spans.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let shared = self.lock();
        f(&shared.session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut shared = self.lock();
        f(&mut shared.session)
    }

    /// Change notifications emitted since the previous call.
    pub fn drain_changes(&self) -> Vec<Change> {
        self.lock().feed.drain()
    }

    // A panic inside a closure leaves the session as the core left it; every
    // core operation is all-or-nothing, so the data is still consistent.
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Intent, ScreenId, Transition};

    fn state() -> SessionState {
        SessionState::new(Session::with_static_catalog("Hardware Store"))
    }

    #[test]
    fn test_with_session() {
        let state = state();
        assert_eq!(state.with_session(|s| s.current_screen()), ScreenId::Login);

        state
            .with_session_mut(|s| s.dispatch(Intent::LoginSubmit))
            .unwrap();
        assert_eq!(state.with_session(|s| s.current_screen()), ScreenId::Home);
    }

    #[test]
    fn test_drain_changes() {
        let state = state();
        assert!(state.drain_changes().is_empty());

        state.with_session_mut(|s| {
            s.dispatch(Intent::LoginSubmit).unwrap();
            s.dispatch(Intent::CategorySelected { id: 1 }).unwrap();
            s.dispatch(Intent::ProductSelected { id: 1 }).unwrap();
            s.dispatch(Intent::AddToCart { id: 1 }).unwrap();
        });

        let changes = state.drain_changes();
        assert_eq!(changes.len(), 4);
        assert!(matches!(
            &changes[0],
            Change::Navigation(NavigationEvent {
                transition: Transition::ReplaceRoot,
                ..
            })
        ));
        assert_eq!(
            changes[3],
            Change::Cart(CartEvent::ItemAdded {
                product_id: 1,
                quantity: 1
            })
        );

        // Drained once
        assert!(state.drain_changes().is_empty());
    }

    #[test]
    fn test_clones_share_the_session() {
        let state = state();
        let other = state.clone();
        other
            .with_session_mut(|s| s.dispatch(Intent::LoginSubmit))
            .unwrap();

        assert_eq!(state.id(), other.id());
        assert_eq!(state.with_session(|s| s.current_screen()), ScreenId::Home);
    }

    #[test]
    fn test_change_json() {
        let change = Change::Cart(CartEvent::ItemRemoved { product_id: 2 });
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["source"], "cart");
        assert_eq!(json["event"]["kind"], "itemRemoved");
        assert_eq!(json["event"]["productId"], 2);
    }
}
