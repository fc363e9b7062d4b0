//! Product catalog endpoints — public reads plus admin mutations.

use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::Serialize;

use tienda_core::types::catalog::Category;
use tienda_core::types::product::{NewProduct, Product, ProductUpdate};
use tienda_core::StoreConfig;
use tienda_storage::StoreEngine;

use crate::errors::{ApiError, ApiResult};
use crate::handlers::require_admin;

/// Configure product and category routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .service(list_products)
            .service(get_product)
            .service(create_product)
            .service(update_product),
    )
    .service(web::scope("/api/categories").service(list_categories));
}

#[derive(Debug, Serialize)]
struct ProductsResponse {
    success: bool,
    productos: Vec<Product>,
}

#[derive(Debug, Serialize)]
struct CategoriesResponse {
    success: bool,
    categorias: Vec<Category>,
}

/// List products visible in the storefront.
#[get("")]
async fn list_products(engine: web::Data<StoreEngine>) -> ApiResult<HttpResponse> {
    let productos = web::block(move || engine.list_products()).await??;

    Ok(HttpResponse::Ok().json(ProductsResponse {
        success: true,
        productos,
    }))
}

/// Get product by ID.
#[get("/{id}")]
async fn get_product(
    engine: web::Data<StoreEngine>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let product = web::block(move || engine.get_product(id))
        .await??
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(product))
}

/// Create a product (admin only).
#[post("")]
async fn create_product(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    body: web::Json<NewProduct>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    if body.nombre.trim().is_empty() {
        return Err(ApiError::Validation("nombre is required".to_string()));
    }
    if body.precio < Decimal::ZERO {
        return Err(ApiError::Validation("precio must not be negative".to_string()));
    }
    if body.stock < 0 {
        return Err(ApiError::Validation("stock must not be negative".to_string()));
    }

    let product = web::block(move || engine.create_product(&body.into_inner())).await??;

    Ok(HttpResponse::Created().json(product))
}

/// Update a product (admin only). Absent fields are left unchanged.
#[put("/{id}")]
async fn update_product(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    if let Some(precio) = body.precio {
        if precio < Decimal::ZERO {
            return Err(ApiError::Validation("precio must not be negative".to_string()));
        }
    }
    if let Some(stock) = body.stock {
        if stock < 0 {
            return Err(ApiError::Validation("stock must not be negative".to_string()));
        }
    }

    let id = path.into_inner();
    let product = web::block(move || engine.update_product(id, &body.into_inner())).await??;

    Ok(HttpResponse::Ok().json(product))
}

/// List categories for the catalog and admin forms.
#[get("")]
async fn list_categories(engine: web::Data<StoreEngine>) -> ApiResult<HttpResponse> {
    let categorias = web::block(move || engine.list_categories()).await??;

    Ok(HttpResponse::Ok().json(CategoriesResponse {
        success: true,
        categorias,
    }))
}
