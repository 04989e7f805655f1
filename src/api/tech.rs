use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::{books::ListQuery, error_response, require_admin},
    database::{MongoDB, TECH_CATEGORIES_COLLECTION},
    models::{CreateCategoryRequest, CreateTechProductRequest, UpdateTechProductRequest},
    services::{category_service, session_service::SessionClaims, tech_service},
};

/// GET /api/v1/tech/categories - Categorias tech, ordenadas por nome.
#[utoipa::path(
    get,
    path = "/api/v1/tech/categories",
    tag = "Tech",
    responses(
        (status = 200, description = "Tech categories sorted by name")
    )
)]
pub async fn get_categories(db: web::Data<MongoDB>) -> impl Responder {
    match category_service::get_categories(&db, TECH_CATEGORIES_COLLECTION).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/tech/categories - Cria categoria tech (admin).
#[utoipa::path(
    post,
    path = "/api/v1/tech/categories",
    tag = "Tech",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_category(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    payload: web::Json<CreateCategoryRequest>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match category_service::create_category(&db, TECH_CATEGORIES_COLLECTION, payload.into_inner())
        .await
    {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/tech - Lista produtos, filtro opcional por categoria.
#[utoipa::path(
    get,
    path = "/api/v1/tech",
    tag = "Tech",
    params(ListQuery),
    responses(
        (status = 200, description = "Tech products, newest first")
    )
)]
pub async fn list_products(db: web::Data<MongoDB>, query: web::Query<ListQuery>) -> impl Responder {
    match tech_service::get_tech_products(&db, query.category_id.as_deref()).await {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/tech/{id} - Produto por id, ou null.
#[utoipa::path(
    get,
    path = "/api/v1/tech/{id}",
    tag = "Tech",
    responses(
        (status = 200, description = "Tech product or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_product(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match tech_service::get_tech_product_by_id(&db, &path.into_inner()).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/tech - Cria produto tech (admin).
#[utoipa::path(
    post,
    path = "/api/v1/tech",
    tag = "Tech",
    request_body = CreateTechProductRequest,
    responses(
        (status = 200, description = "Tech product created"),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_product(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    payload: web::Json<CreateTechProductRequest>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match tech_service::create_tech_product(&db, payload.into_inner()).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => error_response(&e),
    }
}

/// PUT /api/v1/tech/{id} - Atualização parcial (admin).
#[utoipa::path(
    put,
    path = "/api/v1/tech/{id}",
    tag = "Tech",
    request_body = UpdateTechProductRequest,
    responses(
        (status = 200, description = "Updated product or null"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn update_product(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    path: web::Path<String>,
    payload: web::Json<UpdateTechProductRequest>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match tech_service::update_tech_product(&db, &path.into_inner(), payload.into_inner()).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/v1/tech/{id} - Remove produto (admin).
#[utoipa::path(
    delete,
    path = "/api/v1/tech/{id}",
    tag = "Tech",
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn delete_product(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match tech_service::delete_tech_product(&db, &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => error_response(&e),
    }
}
