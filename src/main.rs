mod api;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let database_url = env::var("MONGODB_URL")
        .unwrap_or_else(|_| "mongodb://localhost:27017/catalogo-produtos".to_string());
    let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    log::info!("🚀 Starting Catalog Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // 🌱 Seed default categories
    seeds::categories_seed::seed_default_categories(&db).await;

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(middleware::auth::SessionMiddleware)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth: sessão derivada do provedor OAuth externo
            .service(
                web::scope("/api/v1/auth")
                    .route("/callback", web::post().to(api::auth::session_callback))
                    .route("/me", web::get().to(api::auth::get_me))
                    .route("/logout", web::post().to(api::auth::logout)),
            )
            // Admin: gate por senha compartilhada
            .service(
                web::scope("/api/v1/admin")
                    .route("/login", web::post().to(api::admin::login))
                    .route("/verify", web::get().to(api::admin::verify)),
            )
            // Books: leituras públicas, mutações exigem papel admin
            .service(
                web::scope("/api/v1/books")
                    .route("/categories", web::get().to(api::books::get_categories))
                    .route("/categories", web::post().to(api::books::create_category))
                    .route("", web::get().to(api::books::list_books))
                    .route("", web::post().to(api::books::create_book))
                    .route("/{id}", web::get().to(api::books::get_book))
                    .route("/{id}", web::put().to(api::books::update_book))
                    .route("/{id}", web::delete().to(api::books::delete_book)),
            )
            // Tech products: mesmo contrato dos books
            .service(
                web::scope("/api/v1/tech")
                    .route("/categories", web::get().to(api::tech::get_categories))
                    .route("/categories", web::post().to(api::tech::create_category))
                    .route("", web::get().to(api::tech::list_products))
                    .route("", web::post().to(api::tech::create_product))
                    .route("/{id}", web::get().to(api::tech::get_product))
                    .route("/{id}", web::put().to(api::tech::update_product))
                    .route("/{id}", web::delete().to(api::tech::delete_product)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
