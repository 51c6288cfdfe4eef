//! Products screen: the product list of one category.

use serde::Serialize;
use ts_rs::TS;

use super::{back, intent_names, unsupported, ScreenContext};
use crate::catalog::CatalogProvider;
use crate::error::{IntentError, IntentResult};
use crate::intent::Intent;
use crate::navigation::Route;
use crate::types::{Product, ScreenId};

const ACCEPTS: &[&str] = &["onProductSelected", "onBack"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductsView {
    pub category: String,
    /// Empty for a category the catalog doesn't know.
    pub products: Vec<Product>,
    pub intents: Vec<String>,
}

/// Handles an intent on the Products screen of `category`.
pub fn handle(category: &str, intent: &Intent, ctx: &mut ScreenContext<'_>) -> IntentResult<()> {
    match intent {
        Intent::ProductSelected { id } => {
            let product = ctx
                .catalog
                .find_product(category, *id)
                .ok_or(IntentError::UnknownProduct(*id))?;
            ctx.navigator.push(Route::ProductDetail { product })?;
            Ok(())
        }
        Intent::Back => back(ctx),
        other => Err(unsupported(ScreenId::Products, other)),
    }
}

pub fn view(category: &str, catalog: &dyn CatalogProvider) -> ProductsView {
    ProductsView {
        category: category.to_string(),
        products: catalog.list_products(category),
        intents: intent_names(ACCEPTS),
    }
}
