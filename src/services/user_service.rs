// ==================== USER OPERATIONS ====================
// Upsert a cada sign-in externo, chaveado por open_id. O papel admin é
// atribuído apenas se o open_id bater com OWNER_OPEN_ID.

use mongodb::bson::doc;

use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::{Role, SessionCallbackRequest, User},
    utils::error::AppError,
};

fn owner_open_id() -> String {
    std::env::var("OWNER_OPEN_ID").unwrap_or_default()
}

/// Papel do usuário na criação: admin só para o dono configurado.
pub fn role_for_open_id(open_id: &str) -> Role {
    let owner = owner_open_id();
    if !owner.is_empty() && open_id == owner {
        Role::Admin
    } else {
        Role::User
    }
}

/// Cria ou atualiza o usuário vindo do callback OAuth e retorna o
/// documento persistido.
pub async fn upsert_user(db: &MongoDB, payload: &SessionCallbackRequest) -> Result<User, AppError> {
    if payload.open_id.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "open_id is required for upsert".to_string(),
        ));
    }

    let collection = db.collection::<User>(USERS_COLLECTION);
    let now = chrono::Utc::now().timestamp();

    let existing = collection
        .find_one(doc! { "open_id": &payload.open_id })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to upsert user: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

    match existing {
        Some(_) => {
            let mut set = doc! {
                "last_signed_in": now,
                "updated_at": now,
            };
            // Campos de perfil só sobrescrevem quando vêm preenchidos
            if let Some(name) = &payload.name {
                set.insert("name", name);
            }
            if let Some(email) = &payload.email {
                set.insert("email", email);
            }
            if let Some(login_method) = &payload.login_method {
                set.insert("login_method", login_method);
            }

            collection
                .update_one(doc! { "open_id": &payload.open_id }, doc! { "$set": set })
                .await
                .map_err(|e| {
                    log::error!("[Database] Failed to upsert user: {}", e);
                    AppError::DatabaseError(e.to_string())
                })?;

            collection
                .find_one(doc! { "open_id": &payload.open_id })
                .await
                .map_err(|e| {
                    log::error!("[Database] Failed to reload user: {}", e);
                    AppError::DatabaseError(e.to_string())
                })?
                .ok_or_else(|| AppError::DatabaseError("User vanished after upsert".to_string()))
        }
        None => {
            let mut user = User {
                id: None,
                open_id: payload.open_id.clone(),
                name: payload.name.clone(),
                email: payload.email.clone(),
                login_method: payload.login_method.clone(),
                role: role_for_open_id(&payload.open_id),
                last_signed_in: now,
                created_at: now,
                updated_at: now,
            };

            let result = collection.insert_one(&user).await.map_err(|e| {
                log::error!("[Database] Failed to create user: {}", e);
                AppError::DatabaseError(e.to_string())
            })?;

            user.id = result.inserted_id.as_object_id();
            Ok(user)
        }
    }
}

pub async fn get_user_by_open_id(db: &MongoDB, open_id: &str) -> Result<Option<User>, AppError> {
    let collection = db.collection::<User>(USERS_COLLECTION);
    collection
        .find_one(doc! { "open_id": open_id })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to get user: {}", e);
            AppError::DatabaseError(e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_owner_gets_user_role() {
        // OWNER_OPEN_ID não setado nos testes
        assert_eq!(role_for_open_id("someone"), Role::User);
    }
}
