//! Home screen: category grid, search box, cart button.

use serde::Serialize;
use ts_rs::TS;

use super::{back, intent_names, unsupported, ScreenContext};
use crate::cart::CartStore;
use crate::catalog::CatalogProvider;
use crate::error::{IntentError, IntentResult};
use crate::intent::Intent;
use crate::navigation::Route;
use crate::types::{Category, Product, ScreenId};
use crate::validation::validate_search_query;

const ACCEPTS: &[&str] = &[
    "onSearchChanged",
    "onCategorySelected",
    "onOpenCart",
    "onBack",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub categories: Vec<Category>,
    pub search_query: String,
    /// Products matching the query; empty while the query is empty.
    pub search_results: Vec<Product>,
    /// Distinct products in the cart (badge).
    pub cart_item_count: usize,
    pub intents: Vec<String>,
}

/// Local state of the home screen.
#[derive(Debug, Default)]
pub struct HomeController {
    search_query: String,
}

impl HomeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, intent: &Intent, ctx: &mut ScreenContext<'_>) -> IntentResult<()> {
        match intent {
            Intent::SearchChanged { value } => {
                self.search_query = validate_search_query(value)?;
                Ok(())
            }
            Intent::CategorySelected { id } => {
                let category = ctx
                    .catalog
                    .find_category(*id)
                    .ok_or(IntentError::UnknownCategory(*id))?;
                ctx.navigator.push(Route::Products {
                    category: category.name,
                })?;
                Ok(())
            }
            Intent::OpenCart => {
                ctx.navigator.push(Route::Cart)?;
                Ok(())
            }
            Intent::Back => back(ctx),
            other => Err(unsupported(ScreenId::Home, other)),
        }
    }

    pub fn view(&self, catalog: &dyn CatalogProvider, cart: &CartStore) -> HomeView {
        HomeView {
            categories: catalog.list_categories(),
            search_query: self.search_query.clone(),
            search_results: catalog.search_products(&self.search_query),
            cart_item_count: cart.item_count(),
            intents: intent_names(ACCEPTS),
        }
    }
}
