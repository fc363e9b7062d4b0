//! Checkout endpoint.

use actix_web::{web, HttpResponse};

use tienda_core::types::order::OrderRequest;
use tienda_storage::StoreEngine;

use crate::errors::{ApiError, ApiResult};

/// Configure checkout routes. The default service catches wrong verbs
/// on the resource so the 405 carries the same JSON error body as
/// every other failure path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/checkout")
            .route(web::post().to(checkout))
            .default_service(web::to(method_not_allowed)),
    );
}

async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(ApiError::MethodNotAllowed)
}

/// Place an order. The engine validates fail-fast, resolves the user,
/// and runs the all-or-nothing stock check and writes in one
/// transaction; any failure maps to 400/404/409/500 with no partial
/// rows visible.
async fn checkout(
    engine: web::Data<StoreEngine>,
    body: web::Json<OrderRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    let confirmation = web::block(move || engine.place_order(&req)).await??;

    Ok(HttpResponse::Created().json(confirmation))
}
