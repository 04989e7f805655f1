use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::admin_auth_service::{
    generate_admin_token, validate_admin_password, verify_admin_token,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminLoginResponse {
    pub token: String,
    /// Unix millis, ~24h à frente
    pub expires_at: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminVerifyResponse {
    pub valid: bool,
}

/// POST /api/v1/admin/login - Senha compartilhada → token admin.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    tag = "Admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AdminLoginResponse),
        (status = 401, description = "Wrong password")
    )
)]
pub async fn login(payload: web::Json<AdminLoginRequest>) -> impl Responder {
    if !validate_admin_password(&payload.password) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "Senha incorreta"
        }));
    }

    match generate_admin_token() {
        Ok((token, expires_at)) => {
            HttpResponse::Ok().json(AdminLoginResponse { token, expires_at })
        }
        Err(e) => {
            log::error!("Failed to generate admin token: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Failed to generate token"
            }))
        }
    }
}

/// GET /api/v1/admin/verify - Valida o token admin do header Authorization.
#[utoipa::path(
    get,
    path = "/api/v1/admin/verify",
    tag = "Admin",
    responses(
        (status = 200, description = "Token is valid", body = AdminVerifyResponse),
        (status = 401, description = "Missing or invalid token", body = AdminVerifyResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn verify(req: HttpRequest) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            return HttpResponse::Unauthorized().json(AdminVerifyResponse { valid: false });
        }
    };

    match verify_admin_token(token) {
        Ok(_) => HttpResponse::Ok().json(AdminVerifyResponse { valid: true }),
        Err(_) => HttpResponse::Unauthorized().json(AdminVerifyResponse { valid: false }),
    }
}
