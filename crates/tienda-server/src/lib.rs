//! # tienda-server
//!
//! HTTP boundary for the tienda storefront. Handler modules register
//! themselves through `configure(cfg)`; every response is a single JSON
//! payload, and typed errors are translated to status codes here and
//! nowhere else.

pub mod errors;
pub mod handlers;

pub use errors::{json_config, ApiError, ApiResult};
