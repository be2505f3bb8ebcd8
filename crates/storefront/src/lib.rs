//! Cartwheel storefront library.
//!
//! Hosts the session store on a JSON file slot, talks to the product
//! catalog API, and serves both over a JSON HTTP API. The `cartwheel` CLI
//! reuses the same pieces without the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod shop;
pub mod state;
