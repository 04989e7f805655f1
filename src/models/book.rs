use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::tags::TagsInput;

/// Dificuldade de leitura do livro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Livro do catálogo (armazenado no MongoDB).
/// category_id é referência "soft" — não há integridade referencial
/// com book_categories (deletar categoria pode deixar livros órfãos).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_link: Option<String>,

    /// Hex do _id da categoria (referência soft)
    pub category_id: String,

    pub difficulty: Difficulty,

    pub language: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

/// Request para criar livro (mutação admin)
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub purchase_link: Option<String>,
    pub category_id: String,
    pub difficulty: Difficulty,
    pub language: String,
    pub tags: Option<TagsInput>,
}

/// Request para atualizar livro — só os campos presentes são aplicados
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub purchase_link: Option<String>,
    pub category_id: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub language: Option<String>,
    pub tags: Option<TagsInput>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub purchase_link: Option<String>,
    pub category_id: String,
    pub difficulty: Difficulty,
    pub language: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        BookResponse {
            id: b.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: b.title,
            description: b.description,
            image_url: b.image_url,
            purchase_link: b.purchase_link,
            category_id: b.category_id,
            difficulty: b.difficulty,
            language: b.language,
            tags: b.tags,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Beginner).unwrap(),
            "\"beginner\""
        );
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert_eq!(
            serde_json::to_string(&Difficulty::Advanced).unwrap(),
            "\"advanced\""
        );
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let result: Result<Difficulty, _> = serde_json::from_str("\"expert\"");
        assert!(result.is_err());
    }

    #[test]
    fn create_request_accepts_joined_tags() {
        let req: CreateBookRequest = serde_json::from_value(serde_json::json!({
            "title": "Clean Code",
            "category_id": "abc",
            "difficulty": "intermediate",
            "language": "Inglês",
            "tags": "Clean Code, Best Practices"
        }))
        .unwrap();
        assert!(req.tags.is_some());
    }
}
