//! # Cart Store
//!
//! Owns the shopping cart for the lifetime of a session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Intent                   Store Operation         Cart State Change     │
//! │  ──────                   ───────────────         ─────────────────     │
//! │                                                                         │
//! │  onAddToCart ────────────► add_item() ──────────► line replaced with   │
//! │                                                   qty + 1, or appended │
//! │                                                                         │
//! │  onRemoveFromCart ───────► remove_item() ───────► line dropped (or     │
//! │                                                   nothing, if absent)  │
//! │                                                                         │
//! │  onCheckout ─────────────► clear() ─────────────► lines emptied        │
//! │                                                                         │
//! │  (any view) ─────────────► lines() / total() ───► read only            │
//! │                                                                         │
//! │  Every mutation emits a CartEvent to subscribers.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are total: nothing here returns an error.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, Product};
use crate::EVENT_CHANNEL_CAPACITY;

// =============================================================================
// Cart Events
// =============================================================================

/// Change notification emitted after every cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CartEvent {
    /// A product was added; `quantity` is the line's new quantity.
    ItemAdded {
        #[serde(rename = "productId")]
        product_id: u32,
        quantity: u32,
    },
    /// A line was removed.
    ItemRemoved {
        #[serde(rename = "productId")]
        product_id: u32,
    },
    /// The cart was emptied.
    Cleared,
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id (adding the same product increases
///   the quantity of its line)
/// - Every line has quantity >= 1
/// - Insertion order is display order
/// - The total is derived on every read, never stored
#[derive(Debug)]
pub struct CartStore {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared
    created_at: DateTime<Utc>,

    events: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        CartStore {
            lines: Vec::new(),
            created_at: Utc::now(),
            events,
        }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its line is replaced by one with
    ///   quantity + 1, keeping its position
    /// - Product not in cart: a new line with quantity 1 is appended
    ///
    /// The product is copied; later catalog changes don't affect the line.
    /// Stock is not checked.
    pub fn add_item(&mut self, product: &Product) {
        let quantity = match self.lines.iter_mut().find(|l| l.product_id() == product.id) {
            Some(line) => {
                *line = line.incremented();
                line.quantity()
            }
            None => {
                let line = CartLine::new(product.clone());
                let quantity = line.quantity();
                self.lines.push(line);
                quantity
            }
        };

        debug!(product_id = product.id, quantity, "Cart item added");
        self.notify(CartEvent::ItemAdded {
            product_id: product.id,
            quantity,
        });
    }

    /// Removes the line for a product.
    ///
    /// ## Returns
    /// `true` if a line was removed, `false` if the product wasn't in the
    /// cart (a no-op, not an error).
    pub fn remove_item(&mut self, product_id: u32) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);

        if self.lines.len() == initial_len {
            debug!(product_id, "Remove ignored, product not in cart");
            return false;
        }

        debug!(product_id, "Cart item removed");
        self.notify(CartEvent::ItemRemoved { product_id });
        true
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();

        debug!("Cart cleared");
        self.notify(CartEvent::Cleared);
    }

    /// Σ(unit price × quantity), recomputed from the lines on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Snapshot of the lines at call time, in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Quantity of a product in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: u32) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id() == product_id)
            .map_or(0, CartLine::quantity)
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Subscribes to change notifications.
    ///
    /// Events sent before the call are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: CartEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u32,
    pub total: Money,
}

impl From<&CartStore> for CartTotals {
    fn from(cart: &CartStore) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Add sequences over a small id range, so repeats are common.
    fn add_sequence() -> impl Strategy<Value = Vec<(u32, i64)>> {
        prop::collection::vec((1u32..8, 0i64..100_000), 0..40)
    }

    fn filled(adds: &[(u32, i64)]) -> CartStore {
        let mut cart = CartStore::new();
        for &(id, price_cents) in adds {
            cart.add_item(&Product {
                id,
                name: format!("Product {}", id),
                unit_price_cents: price_cents,
                stock_quantity: 1,
            });
        }
        cart
    }

    /// (id, first-seen price, add count) per distinct id, in first-add order.
    fn expected_lines(adds: &[(u32, i64)]) -> Vec<(u32, i64, u32)> {
        let mut expected: Vec<(u32, i64, u32)> = Vec::new();
        for &(id, price_cents) in adds {
            match expected.iter_mut().find(|(seen, _, _)| *seen == id) {
                Some(entry) => entry.2 += 1,
                None => expected.push((id, price_cents, 1)),
            }
        }
        expected
    }

    proptest! {
        #[test]
        fn test_lines_follow_add_sequence(adds in add_sequence()) {
            let cart = filled(&adds);
            let expected = expected_lines(&adds);

            let lines = cart.lines();
            prop_assert_eq!(lines.len(), expected.len());
            for (line, &(id, price_cents, count)) in lines.iter().zip(&expected) {
                prop_assert_eq!(line.product_id(), id);
                prop_assert_eq!(line.quantity(), count);
                prop_assert_eq!(line.product().unit_price_cents, price_cents);
            }

            let total: i64 = expected
                .iter()
                .map(|&(_, price_cents, count)| price_cents * i64::from(count))
                .sum();
            prop_assert_eq!(cart.total().cents(), total);
            prop_assert_eq!(cart.total_quantity() as usize, adds.len());
        }

        #[test]
        fn test_second_remove_is_noop(adds in add_sequence(), target in 1u32..8) {
            let mut cart = filled(&adds);
            let present = cart.quantity_of(target) > 0;

            prop_assert_eq!(cart.remove_item(target), present);
            let lines = cart.lines();
            let total = cart.total();

            prop_assert!(!cart.remove_item(target));
            prop_assert_eq!(cart.lines(), lines);
            prop_assert_eq!(cart.total(), total);
            prop_assert_eq!(cart.quantity_of(target), 0);
        }

        #[test]
        fn test_clear_zeroes_total(adds in add_sequence()) {
            let mut cart = filled(&adds);
            cart.clear();

            prop_assert!(cart.is_empty());
            prop_assert_eq!(cart.total().cents(), 0);
        }
    }
}
