//! # Navigation State Machine
//!
//! A stack of frames, one per visited screen. The top frame is the active
//! screen; the bottom frame is the root.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────┐ replace_root ┌──────┐  push   ┌──────────┐                  │
//! │   │ Login │─────────────►│ Home │────────►│ Products │                  │
//! │   └───────┘              └──────┘ category└────┬─────┘                  │
//! │    (root)                 (root)  │            │ push                   │
//! │                                   │ push       ▼ product                │
//! │                                   │     ┌───────────────┐               │
//! │                                   │     │ ProductDetail │               │
//! │                                   │     └───────┬───────┘               │
//! │                                   ▼             │ push                  │
//! │                              ┌──────┐◄──────────┘                       │
//! │                              │ Cart │                                   │
//! │                              └──────┘                                   │
//! │                                                                         │
//! │   pop: any non-root frame returns to the frame below it                │
//! │   anything else: IllegalTransition                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Params
//! Each screen's params are a variant of [`Route`], so a `Products` frame
//! cannot exist without a category and a `ProductDetail` frame cannot exist
//! without a product. Untyped params (JSON from the renderer) are parsed into
//! a `Route` by [`Route::from_params`] before anything touches the stack.
//!
//! Every failed operation leaves the stack exactly as it was.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::debug;
use ts_rs::TS;

use crate::error::{NavigationError, NavigationResult, ValidationError};
use crate::types::{Product, ScreenId};
use crate::validation::{validate_category_name, validate_product};
use crate::EVENT_CHANNEL_CAPACITY;

// =============================================================================
// Route
// =============================================================================

/// A screen together with the params it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "screen", content = "params")]
pub enum Route {
    Login,
    Home,
    /// Product list of one category, keyed by category name.
    Products { category: String },
    /// Detail of one product; carries its own copy of the product.
    ProductDetail { product: Product },
    Cart,
}

impl Route {
    /// The screen this route shows.
    pub fn screen(&self) -> ScreenId {
        match self {
            Route::Login => ScreenId::Login,
            Route::Home => ScreenId::Home,
            Route::Products { .. } => ScreenId::Products,
            Route::ProductDetail { .. } => ScreenId::ProductDetail,
            Route::Cart => ScreenId::Cart,
        }
    }

    /// Checks param values the type system can't: blank category names,
    /// blank product names, negative prices.
    pub fn validate(&self) -> NavigationResult<()> {
        let screen = self.screen();
        match self {
            Route::Products { category } => validate_category_name(category)
                .map_err(|e| NavigationError::invalid_params(screen, e)),
            Route::ProductDetail { product } => {
                validate_product(product).map_err(|e| NavigationError::invalid_params(screen, e))
            }
            Route::Login | Route::Home | Route::Cart => Ok(()),
        }
    }

    /// Parses untyped params for a screen.
    ///
    /// ## Contract
    /// | Screen        | Required param             |
    /// |---------------|----------------------------|
    /// | Products      | `category`: string         |
    /// | ProductDetail | `product`: Product object  |
    /// | others        | none                       |
    ///
    /// `params` must be an object or `null`. Keys a screen doesn't declare
    /// are dropped. A product's `unitPrice` is a decimal (`19.99`); negative
    /// or sub-cent prices are `InvalidParams`.
    ///
    /// ## Example
    /// ```rust
    /// use serde_json::json;
    /// use storefront_core::navigation::Route;
    /// use storefront_core::types::ScreenId;
    ///
    /// let route = Route::from_params(ScreenId::Products, &json!({ "category": "Tools" })).unwrap();
    /// assert_eq!(route, Route::Products { category: "Tools".to_string() });
    ///
    /// assert!(Route::from_params(ScreenId::Products, &json!({})).is_err());
    /// ```
    pub fn from_params(screen: ScreenId, params: &Value) -> NavigationResult<Route> {
        let fields = match params {
            Value::Null => None,
            Value::Object(map) => Some(map),
            other => {
                return Err(NavigationError::invalid_params(
                    screen,
                    ValidationError::InvalidFormat {
                        field: "params".to_string(),
                        reason: format!("expected an object, got {}", json_type(other)),
                    },
                ))
            }
        };

        let route = match screen {
            ScreenId::Login => Route::Login,
            ScreenId::Home => Route::Home,
            ScreenId::Cart => Route::Cart,
            ScreenId::Products => {
                let category = match required_field(screen, fields, "category")? {
                    Value::String(name) => name.clone(),
                    other => {
                        return Err(NavigationError::invalid_params(
                            screen,
                            ValidationError::InvalidFormat {
                                field: "category".to_string(),
                                reason: format!("expected a string, got {}", json_type(other)),
                            },
                        ))
                    }
                };
                Route::Products { category }
            }
            ScreenId::ProductDetail => {
                let value = required_field(screen, fields, "product")?;
                let product: Product = serde_json::from_value(value.clone()).map_err(|e| {
                    NavigationError::invalid_params(
                        screen,
                        ValidationError::InvalidFormat {
                            field: "product".to_string(),
                            reason: e.to_string(),
                        },
                    )
                })?;
                Route::ProductDetail { product }
            }
        };

        route.validate()?;
        Ok(route)
    }
}

fn required_field<'a>(
    screen: ScreenId,
    fields: Option<&'a Map<String, Value>>,
    name: &str,
) -> NavigationResult<&'a Value> {
    match fields.and_then(|f| f.get(name)) {
        None | Some(Value::Null) => Err(NavigationError::invalid_params(
            screen,
            ValidationError::Required {
                field: name.to_string(),
            },
        )),
        Some(value) => Ok(value),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Frames & Transitions
// =============================================================================

/// One entry of the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NavigationFrame {
    route: Route,
}

impl NavigationFrame {
    pub fn new(route: Route) -> Self {
        NavigationFrame { route }
    }

    pub fn screen(&self) -> ScreenId {
        self.route.screen()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The params as an untyped key-value map (`{}` for screens without
    /// params).
    pub fn params(&self) -> Value {
        serde_json::to_value(&self.route)
            .ok()
            .and_then(|mut v| v.get_mut("params").map(Value::take))
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// Kind of stack operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    Push,
    Pop,
    ReplaceRoot,
}

/// Checks an edge against the transition table.
///
/// Pop is legal from any screen that isn't a root; whether a frame actually
/// sits below is the stack's business.
pub fn is_legal(transition: Transition, from: ScreenId, to: ScreenId) -> bool {
    use ScreenId::*;

    match transition {
        Transition::Push => matches!(
            (from, to),
            (Home, Products) | (Home, Cart) | (Products, ProductDetail) | (ProductDetail, Cart)
        ),
        Transition::ReplaceRoot => matches!((from, to), (Login, Home)),
        Transition::Pop => !from.is_root(),
    }
}

/// Change notification emitted after every successful stack operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
    pub transition: Transition,
    /// Screen that was active before the operation.
    pub from: ScreenId,
    /// Frame that is active now.
    pub active: NavigationFrame,
    /// Stack depth after the operation.
    pub depth: usize,
}

// =============================================================================
// Navigator
// =============================================================================

/// The navigation state machine.
///
/// ## Invariants
/// - The stack is never empty: `root` is always present
/// - Only Login or Home can be the root
/// - Every frame's params satisfied its screen's contract when it was added
#[derive(Debug)]
pub struct Navigator {
    root: NavigationFrame,
    above: Vec<NavigationFrame>,
    events: broadcast::Sender<NavigationEvent>,
}

impl Navigator {
    /// Starts at Login with nothing below it.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Navigator {
            root: NavigationFrame::new(Route::Login),
            above: Vec::new(),
            events,
        }
    }

    /// Read-only peek at the active frame.
    pub fn current(&self) -> &NavigationFrame {
        self.above.last().unwrap_or(&self.root)
    }

    /// Bottom frame of the stack.
    pub fn root(&self) -> &NavigationFrame {
        &self.root
    }

    /// Number of frames, root included.
    pub fn depth(&self) -> usize {
        1 + self.above.len()
    }

    /// Snapshot of the stack, root first.
    pub fn frames(&self) -> Vec<NavigationFrame> {
        std::iter::once(&self.root)
            .chain(self.above.iter())
            .cloned()
            .collect()
    }

    /// Pushes a frame on top of the active one.
    ///
    /// ## Errors
    /// - `IllegalTransition` if the edge isn't a push edge of the table
    /// - `InvalidParams` if the route's params fail validation
    pub fn push(&mut self, route: Route) -> NavigationResult<()> {
        let from = self.current().screen();
        self.check(Transition::Push, from, route.screen())?;
        route.validate()?;

        self.above.push(NavigationFrame::new(route));
        self.notify(Transition::Push, from);
        Ok(())
    }

    /// Parses untyped params and pushes.
    ///
    /// The edge is checked before the params, so a push to a screen that
    /// isn't reachable reports `IllegalTransition` whatever the params.
    pub fn push_params(&mut self, screen: ScreenId, params: &Value) -> NavigationResult<()> {
        self.check(Transition::Push, self.current().screen(), screen)?;
        let route = Route::from_params(screen, params)?;
        self.push(route)
    }

    /// Removes the active frame and re-activates the one below.
    ///
    /// ## Errors
    /// `StackEmpty` when only the root frame is left.
    pub fn pop(&mut self) -> NavigationResult<NavigationFrame> {
        let Some(removed) = self.above.pop() else {
            debug!(screen = %self.root.screen(), "Pop rejected at root");
            return Err(NavigationError::StackEmpty {
                screen: self.root.screen(),
            });
        };

        self.notify(Transition::Pop, removed.screen());
        Ok(removed)
    }

    /// Discards all history and makes `route` the new root.
    ///
    /// Only Login → Home is legal: once logged in, the login form is
    /// unreachable by going back.
    pub fn replace_root(&mut self, route: Route) -> NavigationResult<()> {
        let from = self.current().screen();
        self.check(Transition::ReplaceRoot, from, route.screen())?;
        route.validate()?;

        self.above.clear();
        self.root = NavigationFrame::new(route);
        self.notify(Transition::ReplaceRoot, from);
        Ok(())
    }

    /// Parses untyped params and replaces the root.
    pub fn replace_root_params(&mut self, screen: ScreenId, params: &Value) -> NavigationResult<()> {
        self.check(Transition::ReplaceRoot, self.current().screen(), screen)?;
        let route = Route::from_params(screen, params)?;
        self.replace_root(route)
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    fn check(&self, transition: Transition, from: ScreenId, to: ScreenId) -> NavigationResult<()> {
        if is_legal(transition, from, to) {
            Ok(())
        } else {
            debug!(?transition, %from, %to, "Transition rejected");
            Err(NavigationError::IllegalTransition { from, to })
        }
    }

    fn notify(&self, transition: Transition, from: ScreenId) {
        let active = self.current().clone();
        debug!(
            ?transition,
            %from,
            to = %active.screen(),
            depth = self.depth(),
            "Navigated"
        );
        let _ = self.events.send(NavigationEvent {
            transition,
            from,
            active,
            depth: self.depth(),
        });
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
