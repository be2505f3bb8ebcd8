//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Request ID (add unique ID to each request)
//! 3. CORS (permissive, the API is consumed by a separate frontend)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
