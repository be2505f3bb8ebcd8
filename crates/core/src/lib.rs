//! Cartwheel Core - Shared types and session state.
//!
//! This crate provides the types used across all Cartwheel components:
//! - `storefront` - JSON storefront over the product catalog API
//! - `cli` - Command-line host for the same session
//!
//! # Architecture
//!
//! The core crate contains only types, the session reducer and the
//! persistence port - no file access, no HTTP clients. Hosts plug a concrete
//! [`SessionStorage`] in at the edge.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and emails
//! - [`session`] - The cart/wishlist/user aggregate, its actions and reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod session;
pub mod types;

pub use session::{
    CartItem, CartProduct, Direction, MemoryStorage, SessionAction, SessionState, SessionStorage,
    StorageError, User, WishlistItem, reduce,
};
pub use types::*;
