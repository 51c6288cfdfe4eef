//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │     Product     │   │    CartLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  product (copy) │       │
//! │  │  name           │   │  name           │   │  quantity ≥ 1   │       │
//! │  │  icon (glyph)   │   │  unit_price     │   └─────────────────┘       │
//! │  └─────────────────┘   │  stock_quantity │                              │
//! │                        └─────────────────┘   ┌─────────────────┐       │
//! │                                              │    ScreenId     │       │
//! │                                              │  Login, Home,   │       │
//! │                                              │  Products, ...  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Catalog types are immutable snapshots. A `CartLine` and a `ProductDetail`
//! navigation frame each carry their own copy of the `Product`, never a
//! reference into the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier.
    pub id: u32,

    /// Display name, also the key used to list the category's products.
    pub name: String,

    /// Glyph shown next to the name.
    pub icon: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within a category's listing.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Unit price in cents. On the wire this is `unitPrice`, a decimal
    /// number of major units (`19.99`).
    #[serde(rename = "unitPrice", with = "crate::money::decimal_units")]
    #[ts(type = "number")]
    pub unit_price_cents: i64,

    /// Units on hand. Informational only; the cart does not check it.
    pub stock_quantity: u32,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Checks if any units are on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One aggregated cart entry per distinct product.
///
/// ## Invariants
/// - `quantity >= 1`: a line is only created by [`CartLine::new`] and only
///   grows through [`CartLine::incremented`]
/// - Lines are never mutated in place; a quantity change produces a new line
///   that replaces the old one
///
/// Not `Deserialize`: lines only come into existence through the cart store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// Creates a line for a product with quantity 1.
    pub fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    /// Returns a replacement line with the quantity increased by one.
    #[must_use]
    pub fn incremented(&self) -> Self {
        CartLine {
            product: self.product.clone(),
            quantity: self.quantity.saturating_add(1),
        }
    }

    /// The product snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Id of the product this line aggregates.
    pub fn product_id(&self) -> u32 {
        self.product.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.unit_price() * self.quantity
    }
}

// =============================================================================
// Screen Id
// =============================================================================

/// Identifies a screen of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ScreenId {
    Login,
    Home,
    Products,
    ProductDetail,
    Cart,
}

impl ScreenId {
    /// All screens, in flow order.
    pub const ALL: [ScreenId; 5] = [
        ScreenId::Login,
        ScreenId::Home,
        ScreenId::Products,
        ScreenId::ProductDetail,
        ScreenId::Cart,
    ];

    /// Screens that may only ever sit at the bottom of the stack.
    pub const fn is_root(&self) -> bool {
        matches!(self, ScreenId::Login | ScreenId::Home)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenId::Login => "Login",
            ScreenId::Home => "Home",
            ScreenId::Products => "Products",
            ScreenId::ProductDetail => "ProductDetail",
            ScreenId::Cart => "Cart",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hammer() -> Product {
        Product {
            id: 1,
            name: "Hammer".to_string(),
            unit_price_cents: 1999,
            stock_quantity: 15,
        }
    }

    #[test]
    fn test_product_price() {
        assert_eq!(hammer().unit_price().cents(), 1999);
        assert!(hammer().in_stock());
    }

    #[test]
    fn test_cart_line_starts_at_one() {
        let line = CartLine::new(hammer());
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.product_id(), 1);
        assert_eq!(line.line_total().cents(), 1999);
    }

    #[test]
    fn test_cart_line_increment_replaces() {
        let line = CartLine::new(hammer());
        let next = line.incremented();

        assert_eq!(line.quantity(), 1);
        assert_eq!(next.quantity(), 2);
        assert_eq!(next.line_total().cents(), 3998);
        assert_eq!(next.product(), line.product());
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(hammer()).unwrap();
        assert_eq!(json["unitPrice"], 19.99);
        assert_eq!(json["stockQuantity"], 15);
        assert!(json.get("unitPriceCents").is_none());

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, hammer());
    }

    #[test]
    fn test_product_decimal_price() {
        let product: Product = serde_json::from_str(
            r#"{"id":2,"name":"Screwdriver Set","unitPrice":29.99,"stockQuantity":8}"#,
        )
        .unwrap();
        assert_eq!(product.unit_price_cents, 2999);

        for bad in ["19.999", "-5", "-0.05", "\"cheap\""] {
            let json = format!(r#"{{"id":1,"name":"Hammer","unitPrice":{},"stockQuantity":1}}"#, bad);
            assert!(serde_json::from_str::<Product>(&json).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_root_screens() {
        assert!(ScreenId::Login.is_root());
        assert!(ScreenId::Home.is_root());
        assert!(!ScreenId::Products.is_root());
        assert!(!ScreenId::ProductDetail.is_root());
        assert!(!ScreenId::Cart.is_root());
        assert_eq!(ScreenId::ProductDetail.to_string(), "ProductDetail");
    }
}
