//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── ValidationError  - Field-level param failures                     │
//! │  ├── NavigationError  - Rejected stack operations                      │
//! │  └── IntentError      - Intents the active screen cannot honour        │
//! │                                                                         │
//! │  storefront-shell errors (in app)                                      │
//! │  └── ApiError         - What the renderer sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → NavigationError → IntentError → ApiError      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is local and recoverable. The caller drops the intent and
//! the state is exactly what it was before the call. Cart operations have no
//! error type at all.

use thiserror::Error;

use crate::types::ScreenId;

// =============================================================================
// Navigation Error
// =============================================================================

/// Errors from the navigation state machine.
///
/// A failed operation never touches the frame stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The params don't satisfy the target screen's contract.
    ///
    /// ## When This Occurs
    /// - `Products` pushed without a `category` string
    /// - `ProductDetail` pushed with a missing or malformed `product`
    #[error("Invalid params for {screen}: {reason}")]
    InvalidParams { screen: ScreenId, reason: String },

    /// Pop attempted on the root frame.
    #[error("Cannot go back from {screen}: it is the root screen")]
    StackEmpty { screen: ScreenId },

    /// The edge is not in the transition table.
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: ScreenId, to: ScreenId },
}

impl NavigationError {
    /// Builds an `InvalidParams` from a field validation failure.
    pub fn invalid_params(screen: ScreenId, source: ValidationError) -> Self {
        NavigationError::InvalidParams {
            screen,
            reason: source.to_string(),
        }
    }
}

// =============================================================================
// Intent Error
// =============================================================================

/// Errors from dispatching an intent to the active screen controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// The navigation operation the intent maps to was rejected.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The active screen does not accept this intent.
    #[error("{intent} is not handled on the {screen} screen")]
    Unsupported {
        screen: ScreenId,
        intent: &'static str,
    },

    /// No category with this id in the catalog.
    #[error("Category not found: {0}")]
    UnknownCategory(u32),

    /// No product with this id on the active screen.
    #[error("Product not found: {0}")]
    UnknownProduct(u32),

    /// A local text field rejected its input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used while parsing untyped navigation params and local field input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (wrong JSON type, unparseable object).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type NavigationResult<T> = Result<T, NavigationError>;

pub type IntentResult<T> = Result<T, IntentError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NavigationError::IllegalTransition {
            from: ScreenId::Login,
            to: ScreenId::Cart,
        };
        assert_eq!(err.to_string(), "Illegal transition from Login to Cart");

        let err = NavigationError::StackEmpty {
            screen: ScreenId::Home,
        };
        assert_eq!(
            err.to_string(),
            "Cannot go back from Home: it is the root screen"
        );
    }

    #[test]
    fn test_invalid_params_from_validation() {
        let err = NavigationError::invalid_params(
            ScreenId::Products,
            ValidationError::Required {
                field: "category".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Invalid params for Products: category is required"
        );
    }

    #[test]
    fn test_navigation_converts_to_intent_error() {
        let nav_err = NavigationError::StackEmpty {
            screen: ScreenId::Home,
        };
        let intent_err: IntentError = nav_err.clone().into();
        assert_eq!(intent_err, IntentError::Navigation(nav_err));
        // transparent: same message
        assert_eq!(
            intent_err.to_string(),
            "Cannot go back from Home: it is the root screen"
        );
    }
}
