//! Login, logout and the account profile.
//!
//! Login is local only: a name and an email, no password, no verification.

use axum::{Json, extract::State, http::StatusCode};
use cartwheel_core::{Email, SessionAction, User};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::state::AppState;

/// Name used when the login form leaves it blank.
pub const DEFAULT_USER_NAME: &str = "User";

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
}

impl LoginForm {
    /// Turn the form into a user: blank name becomes [`DEFAULT_USER_NAME`],
    /// the email must parse.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an invalid email.
    pub fn into_user(self) -> Result<User> {
        let email =
            Email::parse(&self.email).map_err(|e| AppError::BadRequest(format!("email: {e}")))?;
        let name = match self.name.trim() {
            "" => DEFAULT_USER_NAME.to_string(),
            name => name.to_string(),
        };
        Ok(User {
            name,
            email: email.into_inner(),
        })
    }
}

/// Profile of the logged-in user.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub name: String,
    pub email: String,
    pub initials: String,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            initials: user.initials(),
        }
    }
}

/// Log in, replacing any current user. Cart and wishlist are untouched.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(form): AppJson<LoginForm>,
) -> Result<Json<AccountView>> {
    let user = form.into_user()?;
    let view = AccountView::from(&user);

    state.session().lock().await.dispatch(SessionAction::Login(user));
    info!(email = %view.email, "User logged in");

    Ok(Json(view))
}

/// Log out. Cart and wishlist are cleared with the user.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session().lock().await.dispatch(SessionAction::Logout);
    info!("User logged out");
    StatusCode::NO_CONTENT
}

/// Profile page data; 401 when nobody is logged in.
#[instrument(skip(state))]
pub async fn account(State(state): State<AppState>) -> Result<Json<AccountView>> {
    let store = state.session().lock().await;
    store
        .state()
        .user()
        .map(|user| Json(AccountView::from(user)))
        .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
}
