//! Cart screen: lines, total, remove, checkout.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use ts_rs::TS;

use super::{back, intent_names, unsupported, ScreenContext};
use crate::cart::{CartStore, CartTotals};
use crate::error::IntentResult;
use crate::intent::Intent;
use crate::types::{CartLine, ScreenId};

const ACCEPTS: &[&str] = &["onRemoveFromCart", "onCheckout", "onBack"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// When the cart was created or last checked out.
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub intents: Vec<String>,
}

/// Handles an intent on the Cart screen.
///
/// Removing a product that isn't in the cart is a no-op. Checkout empties
/// the cart and stays on this screen.
pub fn handle(intent: &Intent, ctx: &mut ScreenContext<'_>) -> IntentResult<()> {
    match intent {
        Intent::RemoveFromCart { id } => {
            ctx.cart.remove_item(*id);
            Ok(())
        }
        Intent::Checkout => {
            info!(
                items = ctx.cart.item_count(),
                total_cents = ctx.cart.total().cents(),
                "Checkout"
            );
            ctx.cart.clear();
            Ok(())
        }
        Intent::Back => back(ctx),
        other => Err(unsupported(ScreenId::Cart, other)),
    }
}

pub fn view(cart: &CartStore) -> CartView {
    CartView {
        lines: cart.lines(),
        totals: CartTotals::from(cart),
        created_at: cart.created_at(),
        intents: intent_names(ACCEPTS),
    }
}
