use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::tags::TagsInput;

/// Produto tech do catálogo (armazenado no MongoDB).
/// Mesmo ciclo de vida do Book, sem difficulty/language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechProduct {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_link: Option<String>,

    /// Hex do _id da categoria (referência soft)
    pub category_id: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTechProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub purchase_link: Option<String>,
    pub category_id: String,
    pub tags: Option<TagsInput>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateTechProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub purchase_link: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<TagsInput>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TechProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub purchase_link: Option<String>,
    pub category_id: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<TechProduct> for TechProductResponse {
    fn from(p: TechProduct) -> Self {
        TechProductResponse {
            id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: p.name,
            description: p.description,
            image_url: p.image_url,
            purchase_link: p.purchase_link,
            category_id: p.category_id,
            tags: p.tags,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
