use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    api::{error_response, require_admin},
    database::{MongoDB, BOOK_CATEGORIES_COLLECTION},
    models::{CreateBookRequest, CreateCategoryRequest, UpdateBookRequest},
    services::{book_service, category_service, session_service::SessionClaims},
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Filtra por categoria (hex do _id)
    pub category_id: Option<String>,
}

/// GET /api/v1/books/categories - Categorias de livros, ordenadas por nome.
#[utoipa::path(
    get,
    path = "/api/v1/books/categories",
    tag = "Books",
    responses(
        (status = 200, description = "Book categories sorted by name")
    )
)]
pub async fn get_categories(db: web::Data<MongoDB>) -> impl Responder {
    match category_service::get_categories(&db, BOOK_CATEGORIES_COLLECTION).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/books/categories - Cria categoria de livros (admin).
#[utoipa::path(
    post,
    path = "/api/v1/books/categories",
    tag = "Books",
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

    match category_service::create_category(&db, BOOK_CATEGORIES_COLLECTION, payload.into_inner())
        .await
    {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/books - Lista livros, filtro opcional por categoria,
/// mais recentes primeiro.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "Books",
    params(ListQuery),
    responses(
        (status = 200, description = "Books, newest first")
    )
)]
pub async fn list_books(db: web::Data<MongoDB>, query: web::Query<ListQuery>) -> impl Responder {
    match book_service::get_books(&db, query.category_id.as_deref()).await {
        Ok(books) => HttpResponse::Ok().json(books),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/books/{id} - Livro por id, ou null.
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    tag = "Books",
    responses(
        (status = 200, description = "Book or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_book(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match book_service::get_book_by_id(&db, &path.into_inner()).await {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/books - Cria livro (admin).
#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "Books",
    request_body = CreateBookRequest,
    responses(
        (status = 200, description = "Book created"),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_book(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    payload: web::Json<CreateBookRequest>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match book_service::create_book(&db, payload.into_inner()).await {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => error_response(&e),
    }
}

/// PUT /api/v1/books/{id} - Atualização parcial (admin). Só os campos
/// presentes são aplicados; id inexistente retorna null.
#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    tag = "Books",
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Updated book or null"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn update_book(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    path: web::Path<String>,
    payload: web::Json<UpdateBookRequest>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match book_service::update_book(&db, &path.into_inner(), payload.into_inner()).await {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/v1/books/{id} - Remove livro (admin). Não confirma
/// existência do id.
#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    tag = "Books",
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn delete_book(
    db: web::Data<MongoDB>,
    session: Option<web::ReqData<SessionClaims>>,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(e) = require_admin(&db, session.as_deref()).await {
        return error_response(&e);
    }

    match book_service::delete_book(&db, &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => error_response(&e),
    }
}
