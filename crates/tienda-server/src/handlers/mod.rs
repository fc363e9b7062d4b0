//! HTTP handlers, one module per endpoint family.

pub mod admin_handlers;
pub mod order_handlers;
pub mod product_handlers;
pub mod user_handlers;

use actix_web::HttpRequest;

use tienda_core::StoreConfig;

use crate::errors::ApiError;

/// Gate an admin mutation on the configured allow-list. The caller's
/// external auth uid arrives in the `x-auth-uid` header.
pub(crate) fn require_admin(config: &StoreConfig, req: &HttpRequest) -> Result<(), ApiError> {
    let uid = req
        .headers()
        .get("x-auth-uid")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if config.is_admin(uid) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
