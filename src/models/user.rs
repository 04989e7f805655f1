use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Papel do usuário. Só o dono configurado (OWNER_OPEN_ID) vira admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Usuário autenticado via provedor OAuth externo (armazenado no MongoDB).
/// Upsert a cada sign-in, chaveado por open_id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Identificador do provedor externo (único)
    pub open_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_method: Option<String>,

    #[serde(default)]
    pub role: Role,

    pub last_signed_in: i64,

    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload recebido do callback OAuth (troca de sessão).
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SessionCallbackRequest {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Role,
    pub last_signed_in: i64,
}

impl From<User> for UserInfo {
    fn from(u: User) -> Self {
        UserInfo {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            open_id: u.open_id,
            name: u.name,
            email: u.email,
            login_method: u.login_method,
            role: u.role,
            last_signed_in: u.last_signed_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn role_defaults_to_user_when_missing() {
        let user: User = serde_json::from_value(serde_json::json!({
            "open_id": "abc",
            "last_signed_in": 0,
            "created_at": 0,
            "updated_at": 0
        }))
        .unwrap();
        assert_eq!(user.role, Role::User);
    }
}
