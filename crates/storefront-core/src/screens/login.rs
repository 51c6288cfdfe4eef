//! Login screen.
//!
//! No credential check happens here: submit always succeeds and replaces the
//! root with Home, whatever the fields contain.

use serde::Serialize;
use tracing::info;
use ts_rs::TS;

use super::{back, intent_names, unsupported, ScreenContext};
use crate::error::IntentResult;
use crate::intent::Intent;
use crate::navigation::Route;
use crate::types::ScreenId;

const ACCEPTS: &[&str] = &[
    "onUsernameChanged",
    "onPasswordChanged",
    "onLoginSubmit",
    "onBack",
];

/// What the login form shows. The password itself is never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub title: String,
    pub username: String,
    pub password_filled: bool,
    pub intents: Vec<String>,
}

/// Local state of the login form.
#[derive(Debug, Default)]
pub struct LoginController {
    username: String,
    password: String,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, intent: &Intent, ctx: &mut ScreenContext<'_>) -> IntentResult<()> {
        match intent {
            Intent::UsernameChanged { value } => {
                self.username = value.clone();
                Ok(())
            }
            Intent::PasswordChanged { value } => {
                self.password = value.clone();
                Ok(())
            }
            Intent::LoginSubmit => {
                ctx.navigator.replace_root(Route::Home)?;
                self.password.clear();
                info!(username = %self.username, "Logged in");
                Ok(())
            }
            Intent::Back => back(ctx),
            other => Err(unsupported(ScreenId::Login, other)),
        }
    }

    pub fn view(&self, title: &str) -> LoginView {
        LoginView {
            title: title.to_string(),
            username: self.username.clone(),
            password_filled: !self.password.is_empty(),
            intents: intent_names(ACCEPTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use crate::catalog::StaticCatalog;
    use crate::error::{IntentError, NavigationError};
    use crate::navigation::Navigator;

    #[test]
    fn test_fields_and_submit() {
        let (mut navigator, mut cart, catalog) =
            (Navigator::new(), CartStore::new(), StaticCatalog::new());
        let mut ctx = ScreenContext {
            navigator: &mut navigator,
            cart: &mut cart,
            catalog: &catalog,
        };
        let mut login = LoginController::new();

        login
            .handle(&Intent::UsernameChanged { value: "ana".into() }, &mut ctx)
            .unwrap();
        login
            .handle(&Intent::PasswordChanged { value: "secret".into() }, &mut ctx)
            .unwrap();

        let view = login.view("Hardware Store");
        assert_eq!(view.username, "ana");
        assert!(view.password_filled);
        assert!(!serde_json::to_string(&view).unwrap().contains("secret"));

        login.handle(&Intent::LoginSubmit, &mut ctx).unwrap();
        assert_eq!(ctx.navigator.current().screen(), ScreenId::Home);
        assert_eq!(ctx.navigator.depth(), 1);
        assert!(!login.view("Hardware Store").password_filled);
    }

    #[test]
    fn test_empty_fields_still_log_in() {
        let (mut navigator, mut cart, catalog) =
            (Navigator::new(), CartStore::new(), StaticCatalog::new());
        let mut ctx = ScreenContext {
            navigator: &mut navigator,
            cart: &mut cart,
            catalog: &catalog,
        };

        LoginController::new()
            .handle(&Intent::LoginSubmit, &mut ctx)
            .unwrap();
        assert_eq!(ctx.navigator.current().screen(), ScreenId::Home);
    }

    #[test]
    fn test_rejected_intents() {
        let (mut navigator, mut cart, catalog) =
            (Navigator::new(), CartStore::new(), StaticCatalog::new());
        let mut ctx = ScreenContext {
            navigator: &mut navigator,
            cart: &mut cart,
            catalog: &catalog,
        };
        let mut login = LoginController::new();

        assert_eq!(
            login.handle(&Intent::Back, &mut ctx),
            Err(IntentError::Navigation(NavigationError::StackEmpty {
                screen: ScreenId::Login
            }))
        );
        assert_eq!(
            login.handle(&Intent::OpenCart, &mut ctx),
            Err(IntentError::Unsupported {
                screen: ScreenId::Login,
                intent: "onOpenCart"
            })
        );
        assert_eq!(ctx.navigator.current().screen(), ScreenId::Login);
    }
}
