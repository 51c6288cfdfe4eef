//! # Intent Commands
//!
//! A bad line never ends the session: malformed JSON and rejected intents
//! both come back as an `error` on an otherwise normal response.

use storefront_core::Intent;
use tracing::debug;

use super::view::{current_view, ViewResponse};
use crate::error::ApiError;
use crate::state::{SessionState, ShellConfig};

/// Dispatches one intent to the session.
pub fn dispatch_intent(state: &SessionState, intent: Intent) -> Result<(), ApiError> {
    debug!(intent = intent.name(), "Dispatching intent");
    state
        .with_session_mut(|session| session.dispatch(intent))
        .map_err(|e| {
            let err = ApiError::from(e);
            debug!(error = %err, "Intent rejected");
            err
        })
}

/// Parses one line, dispatches it, and builds the response.
pub fn handle_line(state: &SessionState, config: &ShellConfig, line: &str) -> ViewResponse {
    let error = match serde_json::from_str::<Intent>(line) {
        Ok(intent) => dispatch_intent(state, intent).err(),
        Err(e) => Some(ApiError::from(e)),
    };
    current_view(state, config, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{ScreenId, ScreenView, Session};

    fn state() -> SessionState {
        SessionState::new(Session::with_static_catalog("Hardware Store"))
    }

    #[test]
    fn test_dispatch_intent() {
        let state = state();
        dispatch_intent(&state, Intent::LoginSubmit).unwrap();

        let err = dispatch_intent(&state, Intent::CategorySelected { id: 99 }).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Category not found: 99");
    }

    #[test]
    fn test_handle_line() {
        let state = state();
        let config = ShellConfig::default();

        let response = handle_line(&state, &config, r#"{"intent":"onLoginSubmit"}"#);
        assert!(response.error.is_none());
        assert_eq!(response.view.screen(), ScreenId::Home);

        let response = handle_line(&state, &config, r#"{"intent":"onCategorySelected","id":2}"#);
        let ScreenView::Products(view) = &response.view else {
            panic!("expected products view");
        };
        assert_eq!(view.category, "Construction");
    }

    #[test]
    fn test_handle_bad_lines() {
        let state = state();
        let config = ShellConfig::default();

        let response = handle_line(&state, &config, "not json");
        assert_eq!(response.error.map(|e| e.code), Some(ErrorCode::BadRequest));
        assert_eq!(response.view.screen(), ScreenId::Login);

        let response = handle_line(&state, &config, r#"{"intent":"onCheckout"}"#);
        assert_eq!(response.error.map(|e| e.code), Some(ErrorCode::Unsupported));
        assert!(response.changes.is_empty());
    }
}
