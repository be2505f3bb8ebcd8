//! Local login, logout and whoami.

use cartwheel_core::{SessionAction, User};
use cartwheel_storefront::routes::auth::LoginForm;
use cartwheel_storefront::session::SessionStore;

/// Log in as `name <email>`. A blank name becomes "User".
///
/// # Errors
///
/// Returns an error if the email does not parse; the session is untouched.
pub fn login(
    store: &mut SessionStore,
    name: &str,
    email: &str,
) -> Result<User, Box<dyn std::error::Error>> {
    let user = LoginForm {
        name: name.to_string(),
        email: email.to_string(),
    }
    .into_user()?;

    store.dispatch(SessionAction::Login(user.clone()));
    tracing::info!("Logged in as {} <{}>", user.name, user.email);
    Ok(user)
}

/// Log out. Cart and wishlist go with the user.
pub fn logout(store: &mut SessionStore) {
    store.dispatch(SessionAction::Logout);
    tracing::info!("Logged out");
}

/// Show the current user.
pub fn whoami(store: &SessionStore) -> Option<&User> {
    let user = store.state().user();
    match user {
        Some(user) => tracing::info!("{} <{}> [{}]", user.name, user.email, user.initials()),
        None => tracing::info!("Not logged in"),
    }
    user
}
