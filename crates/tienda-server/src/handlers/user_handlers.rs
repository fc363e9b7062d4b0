//! User account and purchase-history endpoints.

use actix_web::{get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use tienda_core::types::catalog::PurchaseRecord;
use tienda_core::types::user::{NewUser, ProfileUpdate, UserProfile};
use tienda_storage::StoreEngine;

use crate::errors::{ApiError, ApiResult};

/// Configure user and history routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(register_user)
            .service(get_profile)
            .service(update_profile),
    )
    .service(web::scope("/api/history").service(purchase_history));
}

#[derive(Debug, Serialize)]
struct RegisteredResponse {
    success: bool,
    usuario_id: i64,
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    success: bool,
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct UpdatedResponse {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    success: bool,
    compras: Vec<PurchaseRecord>,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    firebase_uid: String,
}

/// Register a user resolved by the external identity service.
#[post("")]
async fn register_user(
    engine: web::Data<StoreEngine>,
    body: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    if body.firebase_uid.trim().is_empty() {
        return Err(ApiError::Validation("firebase_uid is required".to_string()));
    }
    if body.email.trim().is_empty() {
        return Err(ApiError::Validation("email is required".to_string()));
    }

    let usuario_id = web::block(move || engine.register_user(&body.into_inner())).await??;

    Ok(HttpResponse::Created().json(RegisteredResponse {
        success: true,
        usuario_id,
    }))
}

/// Fetch the profile for an external auth uid.
#[get("/{uid}")]
async fn get_profile(
    engine: web::Data<StoreEngine>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let uid = path.into_inner();
    let user = web::block(move || engine.get_profile(&uid))
        .await??
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        user,
    }))
}

/// Update profile fields. Absent fields are left unchanged.
#[put("/{uid}")]
async fn update_profile(
    engine: web::Data<StoreEngine>,
    path: web::Path<String>,
    body: web::Json<ProfileUpdate>,
) -> ApiResult<HttpResponse> {
    let uid = path.into_inner();
    web::block(move || engine.update_profile(&uid, &body.into_inner())).await??;

    Ok(HttpResponse::Ok().json(UpdatedResponse {
        success: true,
        message: "profile updated",
    }))
}

/// Purchase history for a user, newest first.
#[get("")]
async fn purchase_history(
    engine: web::Data<StoreEngine>,
    query: web::Query<HistoryQuery>,
) -> ApiResult<HttpResponse> {
    let uid = query.into_inner().firebase_uid;
    if uid.trim().is_empty() {
        return Err(ApiError::Validation("firebase_uid is required".to_string()));
    }

    let compras = web::block(move || engine.purchase_history(&uid)).await??;

    Ok(HttpResponse::Ok().json(HistoryResponse {
        success: true,
        compras,
    }))
}
