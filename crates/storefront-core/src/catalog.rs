//! # Catalog
//!
//! The static set of categories and products the storefront browses.
//!
//! Every call hands out fresh copies; nothing outside this module can mutate
//! the fixtures. Lookups are lenient: an unknown category lists no products
//! and is not an error.

use tracing::trace;

use crate::types::{Category, Product};

/// Category fixtures: (id, name, icon).
const CATEGORIES: &[(u32, &str, &str)] = &[
    (1, "Tools", "🔧"),
    (2, "Construction", "🏗️"),
    (3, "Paints", "🎨"),
    (4, "Electrical", "⚡"),
    (5, "Plumbing", "🚰"),
];

/// Product fixtures: (id, name, price_cents, stock).
///
/// Every category currently lists the same products.
const PRODUCTS: &[(u32, &str, i64, u32)] = &[
    (1, "Hammer", 1999, 15),
    (2, "Screwdriver Set", 2999, 10),
    (3, "Power Drill", 9999, 5),
];

// =============================================================================
// Catalog Provider
// =============================================================================

/// Source of categories and products.
///
/// `Send + Sync` so one catalog can back a session guarded by a mutex.
pub trait CatalogProvider: Send + Sync {
    /// All categories, in display order. Restartable: every call returns the
    /// full list.
    fn list_categories(&self) -> Vec<Category>;

    /// Products of the named category. Unknown names yield an empty list.
    fn list_products(&self, category_name: &str) -> Vec<Product>;

    /// Looks a category up by id.
    fn find_category(&self, id: u32) -> Option<Category> {
        self.list_categories().into_iter().find(|c| c.id == id)
    }

    /// Looks a product up within one category's listing.
    fn find_product(&self, category_name: &str, id: u32) -> Option<Product> {
        self.list_products(category_name)
            .into_iter()
            .find(|p| p.id == id)
    }

    /// Products across all categories whose name contains `query`,
    /// case-insensitively. Each product id appears once, first listing wins.
    /// An empty query matches nothing.
    fn search_products(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<Product> = Vec::new();
        for category in self.list_categories() {
            for product in self.list_products(&category.name) {
                if product.name.to_lowercase().contains(&needle)
                    && !found.iter().any(|p| p.id == product.id)
                {
                    found.push(product);
                }
            }
        }
        found
    }
}

// =============================================================================
// Static Catalog
// =============================================================================

/// The built-in hardware store fixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        StaticCatalog
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_categories(&self) -> Vec<Category> {
        CATEGORIES
            .iter()
            .map(|&(id, name, icon)| Category {
                id,
                name: name.to_string(),
                icon: icon.to_string(),
            })
            .collect()
    }

    fn list_products(&self, category_name: &str) -> Vec<Product> {
        let known = CATEGORIES.iter().any(|&(_, name, _)| name == category_name);
        if !known {
            trace!(category = %category_name, "Unknown category, listing nothing");
            return Vec::new();
        }

        PRODUCTS
            .iter()
            .map(|&(id, name, unit_price_cents, stock_quantity)| Product {
                id,
                name: name.to_string(),
                unit_price_cents,
                stock_quantity,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
