pub mod admin_auth_service;
pub mod book_service;
pub mod category_service;
pub mod session_service;
pub mod tech_service;
pub mod user_service;
