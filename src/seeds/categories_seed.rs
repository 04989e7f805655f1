use mongodb::bson::doc;

use crate::database::{MongoDB, BOOK_CATEGORIES_COLLECTION, TECH_CATEGORIES_COLLECTION};
use crate::models::Category;

/// Seed das categorias padrão no MongoDB.
/// Só insere quando a coleção está vazia — idempotente.
pub async fn seed_default_categories(db: &MongoDB) {
    seed_collection(db, BOOK_CATEGORIES_COLLECTION, default_book_categories()).await;
    seed_collection(db, TECH_CATEGORIES_COLLECTION, default_tech_categories()).await;
}

async fn seed_collection(db: &MongoDB, collection_name: &str, defaults: Vec<Category>) {
    let collection = db.collection::<Category>(collection_name);

    let count = collection.count_documents(doc! {}).await.unwrap_or(0);
    if count > 0 {
        log::info!(
            "📋 {}: {} categories already in DB — skipping seed",
            collection_name,
            count
        );
        return;
    }

    log::info!(
        "📋 {}: seeding {} default categories...",
        collection_name,
        defaults.len()
    );

    match collection.insert_many(&defaults).await {
        Ok(result) => {
            log::info!(
                "   ✅ Inserted {} categories into {}",
                result.inserted_ids.len(),
                collection_name
            );
        }
        Err(e) => {
            log::error!("   ❌ Failed to seed {}: {}", collection_name, e);
        }
    }
}

fn category(name: &str, slug: &str, description: &str, now: i64) -> Category {
    Category {
        id: None,
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        created_at: now,
        updated_at: now,
    }
}

fn default_book_categories() -> Vec<Category> {
    let now = chrono::Utc::now().timestamp();
    vec![
        category(
            "Lógica de Programação",
            "logica-programacao",
            "Fundamentos de lógica e algoritmos para programação",
            now,
        ),
        category(
            "Desenvolvimento Web",
            "desenvolvimento-web",
            "Tecnologias e frameworks para desenvolvimento web",
            now,
        ),
        category(
            "Inteligência Artificial",
            "inteligencia-artificial",
            "Machine Learning, Deep Learning e IA",
            now,
        ),
        category("Fundamentos do C#", "csharp", "Programação em C# e .NET", now),
        category("Benchmarks", "benchmarks", "Performance e otimização de código", now),
    ]
}

fn default_tech_categories() -> Vec<Category> {
    let now = chrono::Utc::now().timestamp();
    vec![
        category("Teclados", "teclados", "Teclados mecânicos e sem fio", now),
        category("Mouses", "mouses", "Mouses ergonômicos e de alta precisão", now),
        category("Monitores", "monitores", "Monitores 4K e ultrawide", now),
        category("Switches", "switches", "Switches mecânicos para teclados", now),
        category(
            "Headsets",
            "headsets",
            "Fones e headsets para gaming e produtividade",
            now,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slugs_are_unique() {
        for defaults in [default_book_categories(), default_tech_categories()] {
            let mut slugs: Vec<_> = defaults.iter().map(|c| c.slug.clone()).collect();
            slugs.sort();
            slugs.dedup();
            assert_eq!(slugs.len(), defaults.len());
        }
    }
}
