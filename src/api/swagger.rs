use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Service API",
        version = "1.0.0",
        description = "Catálogo de livros e produtos tech agrupados por categorias.\n\n**Leituras** são públicas; **mutações** exigem sessão com papel admin. O painel admin usa um token bearer emitido em `/api/v1/admin/login`."
    ),
    paths(
        // Auth
        crate::api::auth::session_callback,
        crate::api::auth::get_me,
        crate::api::auth::logout,

        // Admin
        crate::api::admin::login,
        crate::api::admin::verify,

        // Health
        crate::api::health::health_check,

        // Books
        crate::api::books::get_categories,
        crate::api::books::create_category,
        crate::api::books::list_books,
        crate::api::books::get_book,
        crate::api::books::create_book,
        crate::api::books::update_book,
        crate::api::books::delete_book,

        // Tech
        crate::api::tech::get_categories,
        crate::api::tech::create_category,
        crate::api::tech::list_products,
        crate::api::tech::get_product,
        crate::api::tech::create_product,
        crate::api::tech::update_product,
        crate::api::tech::delete_product,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::admin::AdminLoginRequest,
            crate::api::admin::AdminLoginResponse,
            crate::api::admin::AdminVerifyResponse,
            crate::api::auth::SessionCallbackResponse,
            crate::models::SessionCallbackRequest,
            crate::models::UserInfo,
            crate::models::Role,
            crate::models::CreateCategoryRequest,
            crate::models::CategoryResponse,
            crate::models::CreateBookRequest,
            crate::models::UpdateBookRequest,
            crate::models::BookResponse,
            crate::models::Difficulty,
            crate::models::CreateTechProductRequest,
            crate::models::UpdateTechProductRequest,
            crate::models::TechProductResponse,
            crate::utils::tags::TagsInput,
        )
    ),
    tags(
        (name = "Auth", description = "Sessão derivada do provedor OAuth externo: callback, usuário atual e logout."),
        (name = "Admin", description = "Gate de acesso do painel admin: senha compartilhada → token bearer com validade de 24h."),
        (name = "Books", description = "Catálogo de livros e suas categorias."),
        (name = "Tech", description = "Catálogo de produtos tech e suas categorias."),
        (name = "Health", description = "Health check do serviço."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Token admin emitido em /api/v1/admin/login"))
                        .build(),
                ),
            );
        }
    }
}
