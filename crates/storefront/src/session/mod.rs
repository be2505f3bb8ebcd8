//! Session hosting: the store context object and its file-backed slot.
//!
//! The reducer and persistence port live in `cartwheel-core`; this module
//! wires them to a real medium and to the rest of the storefront.

mod file;
mod store;

pub use file::JsonFileStorage;
pub use store::{SessionStore, SharedSession};
