// ==================== SESSION TOKENS ====================
// JWT de sessão carregando a identidade vinda do provedor OAuth.
// O papel (role) NÃO vai no token — é consultado em users a cada request.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;

pub const SESSION_COOKIE_NAME: &str = "catalog_session";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// open_id do usuário no provedor externo
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

pub fn generate_session_token(user: &User) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::days(30)).timestamp() as usize;

    let claims = SessionClaims {
        sub: user.open_id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        login_method: user.login_method.clone(),
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate session token: {}", e))
}

pub fn verify_session_token(token: &str) -> Result<SessionClaims, String> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid session token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_user() -> User {
        User {
            id: None,
            open_id: "open-123".to_string(),
            name: Some("Maria".to_string()),
            email: Some("maria@example.com".to_string()),
            login_method: Some("google".to_string()),
            role: Role::User,
            last_signed_in: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn session_token_round_trips() {
        let token = generate_session_token(&sample_user()).unwrap();
        let claims = verify_session_token(&token).unwrap();
        assert_eq!(claims.sub, "open-123");
        assert_eq!(claims.email.as_deref(), Some("maria@example.com"));
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(verify_session_token("not-a-jwt").is_err());
    }
}
