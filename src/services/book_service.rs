// ==================== BOOK OPERATIONS ====================
// CRUD de livros sobre a coleção books. Leituras retornam Err em falha
// de driver (nada de mascarar como lista vazia); escritas propagam.

use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::options::ReturnDocument;

use crate::{
    database::{MongoDB, BOOKS_COLLECTION},
    models::{Book, BookResponse, CreateBookRequest, UpdateBookRequest},
    utils::error::AppError,
    utils::tags::normalize_tags,
};

fn parse_object_id(id: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("Invalid {} ID", what)))
}

/// Lista livros, opcionalmente filtrados por categoria, mais recentes
/// primeiro. Filtro sem resultados devolve lista vazia, nunca erro.
pub async fn get_books(
    db: &MongoDB,
    category_id: Option<&str>,
) -> Result<Vec<BookResponse>, AppError> {
    let collection = db.collection::<Book>(BOOKS_COLLECTION);

    let filter = match category_id {
        Some(category_id) => doc! { "category_id": category_id },
        None => doc! {},
    };

    let mut cursor = collection
        .find(filter)
        .sort(doc! { "created_at": -1 })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to get books: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

    let mut books = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(book) => books.push(BookResponse::from(book)),
            Err(e) => {
                log::error!("[Database] Failed to read book: {}", e);
                return Err(AppError::DatabaseError(e.to_string()));
            }
        }
    }

    Ok(books)
}

pub async fn get_book_by_id(db: &MongoDB, id: &str) -> Result<Option<BookResponse>, AppError> {
    let object_id = parse_object_id(id, "book")?;
    let collection = db.collection::<Book>(BOOKS_COLLECTION);

    collection
        .find_one(doc! { "_id": object_id })
        .await
        .map(|book| book.map(BookResponse::from))
        .map_err(|e| {
            log::error!("[Database] Failed to get book: {}", e);
            AppError::DatabaseError(e.to_string())
        })
}

pub async fn create_book(db: &MongoDB, request: CreateBookRequest) -> Result<BookResponse, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidRequest("title is required".to_string()));
    }
    if request.language.trim().is_empty() {
        return Err(AppError::InvalidRequest("language is required".to_string()));
    }
    if request.category_id.trim().is_empty() {
        return Err(AppError::InvalidRequest("category_id is required".to_string()));
    }

    let now = chrono::Utc::now().timestamp();
    let mut book = Book {
        id: None,
        title: request.title,
        description: request.description,
        image_url: request.image_url,
        purchase_link: request.purchase_link,
        category_id: request.category_id,
        difficulty: request.difficulty,
        language: request.language,
        tags: request.tags.as_ref().map(normalize_tags).unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<Book>(BOOKS_COLLECTION);
    let result = collection.insert_one(&book).await.map_err(|e| {
        log::error!("[Database] Failed to create book: {}", e);
        AppError::DatabaseError(e.to_string())
    })?;

    book.id = result.inserted_id.as_object_id();
    Ok(BookResponse::from(book))
}

/// Monta o documento $set só com os campos presentes no request.
fn build_update_doc(request: &UpdateBookRequest) -> Result<Document, AppError> {
    let mut set = Document::new();

    if let Some(title) = &request.title {
        set.insert("title", title);
    }
    if let Some(description) = &request.description {
        set.insert("description", description);
    }
    if let Some(image_url) = &request.image_url {
        set.insert("image_url", image_url);
    }
    if let Some(purchase_link) = &request.purchase_link {
        set.insert("purchase_link", purchase_link);
    }
    if let Some(category_id) = &request.category_id {
        set.insert("category_id", category_id);
    }
    if let Some(difficulty) = &request.difficulty {
        let difficulty = to_bson(difficulty).map_err(|e| AppError::DatabaseError(e.to_string()))?;
        set.insert("difficulty", difficulty);
    }
    if let Some(language) = &request.language {
        set.insert("language", language);
    }
    if let Some(tags) = &request.tags {
        set.insert("tags", normalize_tags(tags));
    }

    set.insert("updated_at", chrono::Utc::now().timestamp());
    Ok(set)
}

/// Atualização parcial. Retorna o livro atualizado, ou None se o id não
/// existe.
pub async fn update_book(
    db: &MongoDB,
    id: &str,
    request: UpdateBookRequest,
) -> Result<Option<BookResponse>, AppError> {
    let object_id = parse_object_id(id, "book")?;
    let collection = db.collection::<Book>(BOOKS_COLLECTION);

    let set = build_update_doc(&request)?;

    collection
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await
        .map(|book| book.map(BookResponse::from))
        .map_err(|e| {
            log::error!("[Database] Failed to update book: {}", e);
            AppError::DatabaseError(e.to_string())
        })
}

/// Remove por id. Não confirma existência (delete de id ausente é no-op).
pub async fn delete_book(db: &MongoDB, id: &str) -> Result<(), AppError> {
    let object_id = parse_object_id(id, "book")?;
    let collection = db.collection::<Book>(BOOKS_COLLECTION);

    collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to delete book: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::utils::tags::TagsInput;

    fn empty_update() -> UpdateBookRequest {
        UpdateBookRequest {
            title: None,
            description: None,
            image_url: None,
            purchase_link: None,
            category_id: None,
            difficulty: None,
            language: None,
            tags: None,
        }
    }

    #[test]
    fn update_doc_contains_only_supplied_fields() {
        let request = UpdateBookRequest {
            title: Some("B".to_string()),
            ..empty_update()
        };

        let set = build_update_doc(&request).unwrap();
        assert_eq!(set.get_str("title").unwrap(), "B");
        assert!(set.contains_key("updated_at"));
        // language/difficulty/category_id não supridos ficam de fora do $set
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn update_doc_normalizes_tags() {
        let request = UpdateBookRequest {
            tags: Some(TagsInput::Joined("a, b, c".to_string())),
            ..empty_update()
        };

        let set = build_update_doc(&request).unwrap();
        let tags = set.get_array("tags").unwrap();
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn update_doc_serializes_difficulty_lowercase() {
        let request = UpdateBookRequest {
            difficulty: Some(Difficulty::Advanced),
            ..empty_update()
        };

        let set = build_update_doc(&request).unwrap();
        assert_eq!(set.get_str("difficulty").unwrap(), "advanced");
    }

    #[test]
    fn rejects_malformed_id() {
        assert!(parse_object_id("not-an-oid", "book").is_err());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn create_update_delete_roundtrip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/catalogo-produtos-test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let created = create_book(
            &db,
            CreateBookRequest {
                title: "A".to_string(),
                description: None,
                image_url: None,
                purchase_link: None,
                category_id: "c".to_string(),
                difficulty: Difficulty::Beginner,
                language: "EN".to_string(),
                tags: Some(TagsInput::Joined("a, b, c".to_string())),
            },
        )
        .await
        .unwrap();
        assert_eq!(created.tags, vec!["a", "b", "c"]);

        // Update parcial: só o título muda, o resto permanece
        let updated = update_book(
            &db,
            &created.id,
            UpdateBookRequest {
                title: Some("B".to_string()),
                ..empty_update()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.title, "B");
        assert_eq!(updated.language, "EN");
        assert_eq!(updated.difficulty, Difficulty::Beginner);
        assert_eq!(updated.category_id, "c");

        // Filtro sem resultados → lista vazia, não erro
        let empty = get_books(&db, Some("categoria-inexistente")).await.unwrap();
        assert!(empty.is_empty());

        // Delete seguido de byId → None
        delete_book(&db, &created.id).await.unwrap();
        assert!(get_book_by_id(&db, &created.id).await.unwrap().is_none());
    }
}
