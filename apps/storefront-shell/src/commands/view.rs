//! # View Responses
//!
//! Every response carries the full view of the active screen, so the
//! renderer can always redraw from the latest line alone.

use serde::Serialize;
use storefront_core::ScreenView;

use crate::error::ApiError;
use crate::state::{Change, SessionState, ShellConfig};

/// One line written to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub view: ScreenView,

    /// Cart total formatted with the configured currency
    pub cart_total_display: String,

    /// Change notifications emitted while handling the intent
    pub changes: Vec<Change>,

    /// Set when the intent was rejected; the view is then unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Builds the response for the session's current state.
pub fn current_view(
    state: &SessionState,
    config: &ShellConfig,
    error: Option<ApiError>,
) -> ViewResponse {
    let changes = state.drain_changes();
    let (view, total_cents) = state.with_session(|s| (s.view(), s.cart().total().cents()));

    ViewResponse {
        view,
        cart_total_display: config.format_currency(total_cents),
        changes,
        error,
    }
}
