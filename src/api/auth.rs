use actix_web::{cookie::Cookie, web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    api::error_response,
    database::MongoDB,
    models::{SessionCallbackRequest, UserInfo},
    services::{
        session_service::{generate_session_token, SessionClaims, SESSION_COOKIE_NAME},
        user_service,
    },
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionCallbackResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// POST /api/v1/auth/callback - Troca o payload do provedor OAuth por uma
/// sessão local: upsert do usuário + cookie de sessão.
#[utoipa::path(
    post,
    path = "/api/v1/auth/callback",
    tag = "Auth",
    request_body = SessionCallbackRequest,
    responses(
        (status = 200, description = "Session established", body = SessionCallbackResponse),
        (status = 400, description = "Missing open_id")
    )
)]
pub async fn session_callback(
    db: web::Data<MongoDB>,
    payload: web::Json<SessionCallbackRequest>,
) -> impl Responder {
    let user = match user_service::upsert_user(&db, &payload).await {
        Ok(user) => user,
        Err(e) => return error_response(&e),
    };

    let token = match generate_session_token(&user) {
        Ok(token) => token,
        Err(e) => {
            log::error!("Failed to sign session token: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Failed to establish session"
            }));
        }
    };

    let cookie = Cookie::build(SESSION_COOKIE_NAME, token)
        .path("/")
        .http_only(true)
        .finish();

    HttpResponse::Ok().cookie(cookie).json(SessionCallbackResponse {
        success: true,
        user: UserInfo::from(user),
    })
}

/// GET /api/v1/auth/me - Usuário da sessão atual, ou null para anônimos.
/// Nunca retorna erro por ausência de sessão.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user, or null for anonymous callers", body = UserInfo)
    )
)]
pub async fn get_me(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
) -> impl Responder {
    let claims = match session {
        Some(claims) => claims,
        None => return HttpResponse::Ok().json(serde_json::Value::Null),
    };

    match user_service::get_user_by_open_id(&db, &claims.sub).await {
        Ok(user) => HttpResponse::Ok().json(user.map(UserInfo::from)),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/auth/logout - Limpa o cookie de sessão.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub async fn logout() -> impl Responder {
    let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "success": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn callback_response_serializes_with_wrapper() {
        let response = SessionCallbackResponse {
            success: true,
            user: UserInfo {
                id: "abc".to_string(),
                open_id: "open-123".to_string(),
                name: Some("Maria".to_string()),
                email: None,
                login_method: Some("google".to_string()),
                role: Role::User,
                last_signed_in: 0,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["open_id"], "open-123");
        assert_eq!(json["user"]["role"], "user");
    }
}
