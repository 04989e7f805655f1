// ==================== TECH PRODUCT OPERATIONS ====================
// Mesmo contrato do book_service, sem difficulty/language.

use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;

use crate::{
    database::{MongoDB, TECH_PRODUCTS_COLLECTION},
    models::{CreateTechProductRequest, TechProduct, TechProductResponse, UpdateTechProductRequest},
    utils::error::AppError,
    utils::tags::normalize_tags,
};

fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest("Invalid product ID".to_string()))
}

pub async fn get_tech_products(
    db: &MongoDB,
    category_id: Option<&str>,
) -> Result<Vec<TechProductResponse>, AppError> {
    let collection = db.collection::<TechProduct>(TECH_PRODUCTS_COLLECTION);

    let filter = match category_id {
        Some(category_id) => doc! { "category_id": category_id },
        None => doc! {},
    };

    let mut cursor = collection
        .find(filter)
        .sort(doc! { "created_at": -1 })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to get tech products: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

    let mut products = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(product) => products.push(TechProductResponse::from(product)),
            Err(e) => {
                log::error!("[Database] Failed to read tech product: {}", e);
                return Err(AppError::DatabaseError(e.to_string()));
            }
        }
    }

    Ok(products)
}

pub async fn get_tech_product_by_id(
    db: &MongoDB,
    id: &str,
) -> Result<Option<TechProductResponse>, AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<TechProduct>(TECH_PRODUCTS_COLLECTION);

    collection
        .find_one(doc! { "_id": object_id })
        .await
        .map(|product| product.map(TechProductResponse::from))
        .map_err(|e| {
            log::error!("[Database] Failed to get tech product: {}", e);
            AppError::DatabaseError(e.to_string())
        })
}

pub async fn create_tech_product(
    db: &MongoDB,
    request: CreateTechProductRequest,
) -> Result<TechProductResponse, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name is required".to_string()));
    }
    if request.category_id.trim().is_empty() {
        return Err(AppError::InvalidRequest("category_id is required".to_string()));
    }

    let now = chrono::Utc::now().timestamp();
    let mut product = TechProduct {
        id: None,
        name: request.name,
        description: request.description,
        image_url: request.image_url,
        purchase_link: request.purchase_link,
        category_id: request.category_id,
        tags: request.tags.as_ref().map(normalize_tags).unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<TechProduct>(TECH_PRODUCTS_COLLECTION);
    let result = collection.insert_one(&product).await.map_err(|e| {
        log::error!("[Database] Failed to create tech product: {}", e);
        AppError::DatabaseError(e.to_string())
    })?;

    product.id = result.inserted_id.as_object_id();
    Ok(TechProductResponse::from(product))
}

fn build_update_doc(request: &UpdateTechProductRequest) -> Document {
    let mut set = Document::new();

    if let Some(name) = &request.name {
        set.insert("name", name);
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
    if let Some(tags) = &request.tags {
        set.insert("tags", normalize_tags(tags));
    }

    set.insert("updated_at", chrono::Utc::now().timestamp());
    set
}

pub async fn update_tech_product(
    db: &MongoDB,
    id: &str,
    request: UpdateTechProductRequest,
) -> Result<Option<TechProductResponse>, AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<TechProduct>(TECH_PRODUCTS_COLLECTION);

    collection
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": build_update_doc(&request) })
        .return_document(ReturnDocument::After)
        .await
        .map(|product| product.map(TechProductResponse::from))
        .map_err(|e| {
            log::error!("[Database] Failed to update tech product: {}", e);
            AppError::DatabaseError(e.to_string())
        })
}

pub async fn delete_tech_product(db: &MongoDB, id: &str) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<TechProduct>(TECH_PRODUCTS_COLLECTION);

    collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| {
            log::error!("[Database] Failed to delete tech product: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tags::TagsInput;

    #[test]
    fn update_doc_contains_only_supplied_fields() {
        let request = UpdateTechProductRequest {
            name: Some("Keychron K8 Pro".to_string()),
            description: None,
            image_url: None,
            purchase_link: None,
            category_id: None,
            tags: Some(TagsInput::List(vec!["Mecânico".into(), "RGB".into()])),
        };

        let set = build_update_doc(&request);
        assert_eq!(set.get_str("name").unwrap(), "Keychron K8 Pro");
        assert_eq!(set.get_array("tags").unwrap().len(), 2);
        assert!(set.contains_key("updated_at"));
        assert_eq!(set.len(), 3);
    }
}
