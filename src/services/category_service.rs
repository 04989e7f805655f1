// ==================== CATEGORY OPERATIONS ====================
// book_categories e tech_categories têm o mesmo formato; as funções
// recebem o nome da coleção. name e slug são únicos (índice no startup).

use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::{
    database::MongoDB,
    models::{Category, CategoryResponse, CreateCategoryRequest},
    utils::error::AppError,
};

/// Lista todas as categorias ordenadas por nome (ascendente).
pub async fn get_categories(
    db: &MongoDB,
    collection_name: &str,
) -> Result<Vec<CategoryResponse>, AppError> {
    let collection = db.collection::<Category>(collection_name);

    let mut cursor = collection
        .find(doc! {})
        .sort(doc! { "name": 1 })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to get categories ({}): {}", collection_name, e);
            AppError::DatabaseError(e.to_string())
        })?;

    let mut categories = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(category) => categories.push(CategoryResponse::from(category)),
            Err(e) => {
                log::error!("[Database] Failed to read category ({}): {}", collection_name, e);
                return Err(AppError::DatabaseError(e.to_string()));
            }
        }
    }

    Ok(categories)
}

/// Cria uma categoria. Nome e slug duplicados são rejeitados antes do
/// insert (o índice único cobre a corrida restante).
pub async fn create_category(
    db: &MongoDB,
    collection_name: &str,
    request: CreateCategoryRequest,
) -> Result<CategoryResponse, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name is required".to_string()));
    }
    if request.slug.trim().is_empty() {
        return Err(AppError::InvalidRequest("slug is required".to_string()));
    }

    let collection = db.collection::<Category>(collection_name);

    let duplicate = collection
        .find_one(doc! { "$or": [ { "name": &request.name }, { "slug": &request.slug } ] })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to check category ({}): {}", collection_name, e);
            AppError::DatabaseError(e.to_string())
        })?;

    if duplicate.is_some() {
        return Err(AppError::InvalidRequest(
            "Category name or slug already exists".to_string(),
        ));
    }

    let now = chrono::Utc::now().timestamp();
    let mut category = Category {
        id: None,
        name: request.name,
        slug: request.slug,
        description: request.description,
        created_at: now,
        updated_at: now,
    };

    let result = collection.insert_one(&category).await.map_err(|e| {
        log::error!("[Database] Failed to create category ({}): {}", collection_name, e);
        AppError::DatabaseError(e.to_string())
    })?;

    category.id = result.inserted_id.as_object_id();
    Ok(CategoryResponse::from(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::BOOK_CATEGORIES_COLLECTION;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn created_category_is_listed_sorted_by_name() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/catalogo-produtos-test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let suffix = uuid::Uuid::new_v4().to_string();
        let created = create_category(
            &db,
            BOOK_CATEGORIES_COLLECTION,
            CreateCategoryRequest {
                name: format!("Categoria {}", suffix),
                slug: format!("categoria-{}", suffix),
                description: Some("Categoria de teste".to_string()),
            },
        )
        .await
        .unwrap();

        let categories = get_categories(&db, BOOK_CATEGORIES_COLLECTION).await.unwrap();
        assert!(categories.iter().any(|c| c.id == created.id));

        let names: Vec<_> = categories.iter().map(|c| c.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_slug_is_rejected() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/catalogo-produtos-test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let suffix = uuid::Uuid::new_v4().to_string();
        let request = || CreateCategoryRequest {
            name: format!("Duplicada {}", suffix),
            slug: format!("duplicada-{}", suffix),
            description: None,
        };

        create_category(&db, BOOK_CATEGORIES_COLLECTION, request())
            .await
            .unwrap();
        let second = create_category(&db, BOOK_CATEGORIES_COLLECTION, request()).await;
        assert!(matches!(second, Err(AppError::InvalidRequest(_))));
    }
}
