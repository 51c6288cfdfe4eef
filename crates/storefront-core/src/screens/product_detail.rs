//! Product detail screen.
//!
//! Shows the product snapshot carried by the route, not a fresh catalog
//! lookup.

use serde::Serialize;
use ts_rs::TS;

use super::{back, intent_names, unsupported, ScreenContext};
use crate::cart::CartStore;
use crate::error::{IntentError, IntentResult};
use crate::intent::Intent;
use crate::navigation::Route;
use crate::types::{Product, ScreenId};

const ACCEPTS: &[&str] = &["onAddToCart", "onOpenCart", "onBack"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub product: Product,
    /// False when no units are on hand. Adding still works; the renderer
    /// may mark the product as sold out.
    pub in_stock: bool,
    /// Units of this product already in the cart.
    pub quantity_in_cart: u32,
    pub cart_item_count: usize,
    pub intents: Vec<String>,
}

/// Handles an intent on the detail screen of `product`.
pub fn handle(product: &Product, intent: &Intent, ctx: &mut ScreenContext<'_>) -> IntentResult<()> {
    match intent {
        Intent::AddToCart { id } if *id == product.id => {
            ctx.cart.add_item(product);
            Ok(())
        }
        Intent::AddToCart { id } => Err(IntentError::UnknownProduct(*id)),
        Intent::OpenCart => {
            ctx.navigator.push(Route::Cart)?;
            Ok(())
        }
        Intent::Back => back(ctx),
        other => Err(unsupported(ScreenId::ProductDetail, other)),
    }
}

pub fn view(product: &Product, cart: &CartStore) -> ProductDetailView {
    ProductDetailView {
        product: product.clone(),
        in_stock: product.in_stock(),
        quantity_in_cart: cart.quantity_of(product.id),
        cart_item_count: cart.item_count(),
        intents: intent_names(ACCEPTS),
    }
}
