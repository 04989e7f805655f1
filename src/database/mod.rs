use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const BOOK_CATEGORIES_COLLECTION: &str = "book_categories";
pub const BOOKS_COLLECTION: &str = "books";
pub const TECH_CATEGORIES_COLLECTION: &str = "tech_categories";
pub const TECH_PRODUCTS_COLLECTION: &str = "tech_products";
pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("catalogo-produtos");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Cria os índices necessários: unicidade de name/slug nas categorias,
    /// open_id único em users e lookup por category_id nos catálogos.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let unique = || IndexOptions::builder().unique(true).build();

        for collection_name in [BOOK_CATEGORIES_COLLECTION, TECH_CATEGORIES_COLLECTION] {
            let collection = self
                .database()
                .collection::<mongodb::bson::Document>(collection_name);

            let name_index = IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(unique())
                .build();
            match collection.create_index(name_index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(name) unique", collection_name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }

            let slug_index = IndexModel::builder()
                .keys(doc! { "slug": 1 })
                .options(unique())
                .build();
            match collection.create_index(slug_index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(slug) unique", collection_name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        let users = self
            .database()
            .collection::<mongodb::bson::Document>(USERS_COLLECTION);
        let open_id_index = IndexModel::builder()
            .keys(doc! { "open_id": 1 })
            .options(unique())
            .build();
        match users.create_index(open_id_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(open_id) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        for collection_name in [BOOKS_COLLECTION, TECH_PRODUCTS_COLLECTION] {
            let collection = self
                .database()
                .collection::<mongodb::bson::Document>(collection_name);
            let category_index = IndexModel::builder()
                .keys(doc! { "category_id": 1 })
                .build();
            match collection.create_index(category_index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(category_id)", collection_name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/catalogo-produtos".to_string());
        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
