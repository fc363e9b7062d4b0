//! Supplier and product-type administration endpoints.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use tienda_core::types::catalog::{NewSupplier, ProductType, Supplier};
use tienda_core::StoreConfig;
use tienda_storage::StoreEngine;

use crate::errors::{ApiError, ApiResult};
use crate::handlers::require_admin;

/// Configure supplier and product-type routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/suppliers")
            .service(list_suppliers)
            .service(create_supplier)
            .service(update_supplier)
            .service(delete_supplier),
    )
    .service(
        web::scope("/api/product-types")
            .service(list_product_types)
            .service(create_product_type)
            .service(update_product_type)
            .service(delete_product_type),
    );
}

#[derive(Debug, Serialize)]
struct SuppliersResponse {
    success: bool,
    proveedores: Vec<Supplier>,
}

#[derive(Debug, Serialize)]
struct ProductTypesResponse {
    success: bool,
    tipos_productos: Vec<ProductType>,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Deserialize)]
struct CategoryFilter {
    categoria: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct NewProductType {
    tipo: String,
    categoria_id: i64,
}

#[derive(Debug, Deserialize)]
struct ProductTypeRename {
    tipo: String,
}

/// List suppliers, optionally filtered by category.
#[get("")]
async fn list_suppliers(
    engine: web::Data<StoreEngine>,
    query: web::Query<CategoryFilter>,
) -> ApiResult<HttpResponse> {
    let filter = query.into_inner().categoria;
    let proveedores = web::block(move || match filter {
        Some(categoria) => engine.list_suppliers_by_category(categoria),
        None => engine.list_suppliers(),
    })
    .await??;

    Ok(HttpResponse::Ok().json(SuppliersResponse {
        success: true,
        proveedores,
    }))
}

/// Create a supplier (admin only).
#[post("")]
async fn create_supplier(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    body: web::Json<NewSupplier>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    if body.nombre.trim().is_empty() {
        return Err(ApiError::Validation("nombre is required".to_string()));
    }
    if body.ruc.trim().is_empty() {
        return Err(ApiError::Validation("ruc is required".to_string()));
    }

    let supplier = web::block(move || engine.create_supplier(&body.into_inner())).await??;

    Ok(HttpResponse::Created().json(supplier))
}

/// Replace a supplier's fields (admin only).
#[put("/{id}")]
async fn update_supplier(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<NewSupplier>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    let id = path.into_inner();
    web::block(move || engine.update_supplier(id, &body.into_inner())).await??;

    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        message: "supplier updated",
    }))
}

/// Delete a supplier (admin only).
#[delete("/{id}")]
async fn delete_supplier(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    let id = path.into_inner();
    web::block(move || engine.delete_supplier(id)).await??;

    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        message: "supplier deleted",
    }))
}

/// List product types for a category.
#[get("")]
async fn list_product_types(
    engine: web::Data<StoreEngine>,
    query: web::Query<CategoryFilter>,
) -> ApiResult<HttpResponse> {
    let Some(categoria) = query.into_inner().categoria else {
        return Err(ApiError::Validation("categoria is required".to_string()));
    };

    let tipos_productos = web::block(move || engine.list_product_types(categoria)).await??;

    Ok(HttpResponse::Ok().json(ProductTypesResponse {
        success: true,
        tipos_productos,
    }))
}

/// Create a product type (admin only).
#[post("")]
async fn create_product_type(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    body: web::Json<NewProductType>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    let NewProductType { tipo, categoria_id } = body.into_inner();
    if tipo.trim().is_empty() {
        return Err(ApiError::Validation("tipo is required".to_string()));
    }

    let id = web::block(move || engine.create_product_type(tipo.trim(), categoria_id)).await??;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "id": id,
    })))
}

/// Rename a product type (admin only).
#[put("/{id}")]
async fn update_product_type(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ProductTypeRename>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    let id = path.into_inner();
    let tipo = body.into_inner().tipo;
    if tipo.trim().is_empty() {
        return Err(ApiError::Validation("tipo is required".to_string()));
    }

    web::block(move || engine.update_product_type(id, tipo.trim())).await??;

    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        message: "product type updated",
    }))
}

/// Delete a product type (admin only).
#[delete("/{id}")]
async fn delete_product_type(
    engine: web::Data<StoreEngine>,
    config: web::Data<StoreConfig>,
    http_req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    require_admin(&config, &http_req)?;

    let id = path.into_inner();
    web::block(move || engine.delete_product_type(id)).await??;

    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        message: "product type deleted",
    }))
}
