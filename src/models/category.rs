use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Categoria de livros ou produtos tech (coleções separadas, mesmo formato).
/// name e slug são únicos dentro da coleção (índice no startup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub slug: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: c.name,
            slug: c.slug,
            description: c.description,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
