//! # Intents
//!
//! User actions the renderer reports to the core. The renderer never changes
//! state itself; it sends an intent and redraws from the resulting view.
//!
//! ## Wire Shape
//! ```text
//! { "intent": "onCategorySelected", "id": 1 }
//! { "intent": "onBack" }
//! ```
//!
//! Ids are what the active screen showed: category ids on Home, product ids
//! on Products/Cart. Which screen accepts which intent is decided by the
//! screen controllers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "intent")]
pub enum Intent {
    /// Login button pressed.
    #[serde(rename = "onLoginSubmit")]
    LoginSubmit,

    #[serde(rename = "onUsernameChanged")]
    UsernameChanged { value: String },

    #[serde(rename = "onPasswordChanged")]
    PasswordChanged { value: String },

    /// Home search box edited.
    #[serde(rename = "onSearchChanged")]
    SearchChanged { value: String },

    /// Category tile tapped on Home.
    #[serde(rename = "onCategorySelected")]
    CategorySelected { id: u32 },

    /// Product row tapped on Products.
    #[serde(rename = "onProductSelected")]
    ProductSelected { id: u32 },

    /// "Add to cart" on ProductDetail; `id` must be the shown product.
    #[serde(rename = "onAddToCart")]
    AddToCart { id: u32 },

    /// Line removed on Cart.
    #[serde(rename = "onRemoveFromCart")]
    RemoveFromCart { id: u32 },

    /// Cart button (Home, ProductDetail).
    #[serde(rename = "onOpenCart")]
    OpenCart,

    #[serde(rename = "onCheckout")]
    Checkout,

    /// Back button or gesture.
    #[serde(rename = "onBack")]
    Back,
}

impl Intent {
    /// The wire name, for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::LoginSubmit => "onLoginSubmit",
            Intent::UsernameChanged { .. } => "onUsernameChanged",
            Intent::PasswordChanged { .. } => "onPasswordChanged",
            Intent::SearchChanged { .. } => "onSearchChanged",
            Intent::CategorySelected { .. } => "onCategorySelected",
            Intent::ProductSelected { .. } => "onProductSelected",
            Intent::AddToCart { .. } => "onAddToCart",
            Intent::RemoveFromCart { .. } => "onRemoveFromCart",
            Intent::OpenCart => "onOpenCart",
            Intent::Checkout => "onCheckout",
            Intent::Back => "onBack",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_intents() {
        let intent: Intent =
            serde_json::from_value(json!({ "intent": "onCategorySelected", "id": 3 })).unwrap();
        assert_eq!(intent, Intent::CategorySelected { id: 3 });

        let intent: Intent = serde_json::from_value(json!({ "intent": "onBack" })).unwrap();
        assert_eq!(intent, Intent::Back);

        let intent: Intent =
            serde_json::from_str(r#"{"intent":"onUsernameChanged","value":"ana"}"#).unwrap();
        assert_eq!(
            intent,
            Intent::UsernameChanged {
                value: "ana".to_string()
            }
        );
    }

    #[test]
    fn test_reject_malformed() {
        assert!(serde_json::from_value::<Intent>(json!({ "intent": "onFly" })).is_err());
        assert!(serde_json::from_value::<Intent>(json!({ "intent": "onAddToCart" })).is_err());
        assert!(
            serde_json::from_value::<Intent>(json!({ "intent": "onAddToCart", "id": -1 })).is_err()
        );
        assert!(serde_json::from_value::<Intent>(json!({ "id": 1 })).is_err());
    }

    #[test]
    fn test_name_matches_wire_tag() {
        let intents = [
            Intent::LoginSubmit,
            Intent::SearchChanged {
                value: String::new(),
            },
            Intent::AddToCart { id: 1 },
            Intent::OpenCart,
            Intent::Back,
        ];
        for intent in intents {
            let json = serde_json::to_value(&intent).unwrap();
            assert_eq!(json["intent"], intent.name());
        }
    }
}
