//! Session actions and the pure reducer.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::{CartProduct, SessionState, User};
use crate::types::ProductId;

/// Which way a quantity update moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "inc", alias = "increment")]
    Increment,
    #[serde(rename = "dec", alias = "decrement")]
    Decrement,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increment => "inc",
            Self::Decrement => "dec",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Direction`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction {0:?}, expected \"inc\" or \"dec\"")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inc" | "increment" | "+" => Ok(Self::Increment),
            "dec" | "decrement" | "-" => Ok(Self::Decrement),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Everything that can change a [`SessionState`].
///
/// Serialized as `{ "type": "addToCart", "payload": { ... } }` so an action
/// can travel over HTTP as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SessionAction {
    Login(User),
    Logout,
    AddToCart(CartProduct),
    RemoveFromCart(ProductId),
    UpdateQuantity {
        id: ProductId,
        #[serde(alias = "type")]
        direction: Direction,
    },
    ToggleWishlist(CartProduct),
}

impl SessionAction {
    /// Stable action name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::AddToCart(_) => "addToCart",
            Self::RemoveFromCart(_) => "removeFromCart",
            Self::UpdateQuantity { .. } => "updateQuantity",
            Self::ToggleWishlist(_) => "toggleWishlist",
        }
    }
}

/// Apply `action` to `state` and return the next state.
///
/// Total over well-formed input: actions on unknown ids are no-ops.
#[must_use]
pub fn reduce(mut state: SessionState, action: SessionAction) -> SessionState {
    state.apply(action);
    state
}
