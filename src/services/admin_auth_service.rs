// ==================== ADMIN ACCESS GATE ====================
// Senha única compartilhada (ADMIN_PASSWORD) liberando um token bearer
// com prefixo "admin-". O corpo após o prefixo é um JWT HS256 assinado
// com expiração de 24h — o formato opaco com prefixo é mantido por
// compatibilidade com o cliente, mas a verificação valida assinatura
// e expiração, não só o prefixo.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ADMIN_TOKEN_PREFIX: &str = "admin-";

/// Validade do token admin: 24 horas (em milissegundos, como o cliente espera)
pub const ADMIN_TOKEN_EXPIRY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

fn admin_password() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string())
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

pub fn validate_admin_password(password: &str) -> bool {
    password == admin_password()
}

/// Gera o token admin e o instante de expiração (unix millis, 24h à frente).
pub fn generate_admin_token() -> Result<(String, i64), String> {
    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = (now + Duration::hours(24)).timestamp() as usize;

    let claims = AdminClaims {
        sub: "admin".to_string(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    let jwt = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate admin token: {}", e))?;

    let expires_at = now.timestamp_millis() + ADMIN_TOKEN_EXPIRY_MS;

    Ok((format!("{}{}", ADMIN_TOKEN_PREFIX, jwt), expires_at))
}

/// Verifica o token admin: prefixo esperado + assinatura + expiração.
pub fn verify_admin_token(token: &str) -> Result<AdminClaims, String> {
    let jwt = token
        .strip_prefix(ADMIN_TOKEN_PREFIX)
        .ok_or_else(|| "Token inválido".to_string())?;

    decode::<AdminClaims>(
        jwt,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Token inválido: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Os testes usam os fallbacks de env (ADMIN_PASSWORD/JWT_SECRET não setados)

    #[test]
    fn accepts_configured_password() {
        assert!(validate_admin_password("admin123"));
    }

    #[test]
    fn rejects_wrong_password() {
        assert!(!validate_admin_password("wrong"));
        assert!(!validate_admin_password(""));
    }

    #[test]
    fn token_has_expected_prefix() {
        let (token, _) = generate_admin_token().unwrap();
        assert!(token.starts_with(ADMIN_TOKEN_PREFIX));
    }

    #[test]
    fn expiry_is_roughly_24h_out() {
        let before = Utc::now().timestamp_millis();
        let (_, expires_at) = generate_admin_token().unwrap();
        let after = Utc::now().timestamp_millis();

        assert!(expires_at >= before + ADMIN_TOKEN_EXPIRY_MS);
        assert!(expires_at <= after + ADMIN_TOKEN_EXPIRY_MS);
    }

    #[test]
    fn generated_token_verifies() {
        let (token, _) = generate_admin_token().unwrap();
        let claims = verify_admin_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn rejects_unprefixed_token() {
        assert!(verify_admin_token("qualquer-coisa").is_err());
    }

    #[test]
    fn rejects_prefixed_but_unsigned_token() {
        // Antes da troca por JWT, qualquer string com prefixo passava.
        assert!(verify_admin_token("admin-nao-assinado").is_err());
    }
}
