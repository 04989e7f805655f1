pub mod admin;
pub mod auth;
pub mod books;
pub mod health;
pub mod swagger;
pub mod tech;

use actix_web::HttpResponse;

use crate::{
    database::MongoDB,
    models::{Role, User},
    services::{session_service::SessionClaims, user_service},
    utils::error::AppError,
};

/// Mapeia a taxonomia de erros para status HTTP com corpo
/// {"success": false, "error": ...}.
pub fn error_response(error: &AppError) -> HttpResponse {
    let body = serde_json::json!({
        "success": false,
        "error": error.to_string(),
    });

    match error {
        AppError::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
        AppError::Forbidden(_) => HttpResponse::Forbidden().json(body),
        AppError::DatabaseError(_) => HttpResponse::InternalServerError().json(body),
    }
}

fn ensure_admin(user: &User) -> Result<(), AppError> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }
    Ok(())
}

/// Pré-condição das mutações de catálogo: sessão presente e papel admin.
/// O papel é consultado no banco a cada request — o JWT de sessão só
/// carrega identidade. Falha ANTES de qualquer escrita.
pub async fn require_admin(
    db: &MongoDB,
    claims: Option<&SessionClaims>,
) -> Result<User, AppError> {
    let claims = claims.ok_or_else(|| AppError::Unauthorized("Missing session".to_string()))?;

    let user = user_service::get_user_by_open_id(db, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown session user".to_string()))?;

    ensure_admin(&user)?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionCallbackRequest;
    use crate::services::book_service;

    fn user_with_role(role: Role) -> User {
        User {
            id: None,
            open_id: "open-123".to_string(),
            name: None,
            email: None,
            login_method: Some("google".to_string()),
            role,
            last_signed_in: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn admin_role_passes_gate() {
        assert!(ensure_admin(&user_with_role(Role::Admin)).is_ok());
    }

    #[test]
    fn user_role_is_forbidden() {
        let result = ensure_admin(&user_with_role(Role::User));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn non_admin_mutation_fails_before_persistence() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/catalogo-produtos-test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        // Anônimo (sem sessão) → 401
        let anonymous = require_admin(&db, None).await;
        assert!(matches!(anonymous, Err(AppError::Unauthorized(_))));

        // Usuário comum (não é o OWNER_OPEN_ID) → 403
        let open_id = format!("visitante-{}", uuid::Uuid::new_v4());
        user_service::upsert_user(
            &db,
            &SessionCallbackRequest {
                open_id: open_id.clone(),
                name: Some("Visitante".to_string()),
                email: None,
                login_method: Some("google".to_string()),
            },
        )
        .await
        .unwrap();

        let claims = crate::services::session_service::SessionClaims {
            sub: open_id.clone(),
            name: None,
            email: None,
            login_method: None,
            iat: 0,
            exp: 0,
        };

        let category_id = format!("cat-{}", uuid::Uuid::new_v4());
        let gate = require_admin(&db, Some(&claims)).await;
        assert!(matches!(gate, Err(AppError::Forbidden(_))));

        // Com o gate falhando, o handler nunca chama o create — nada
        // persistido para essa categoria
        let books = book_service::get_books(&db, Some(&category_id)).await.unwrap();
        assert!(books.is_empty());
    }
}
