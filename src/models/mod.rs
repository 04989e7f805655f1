pub mod book;
pub mod category;
pub mod tech_product;
pub mod user;

pub use book::*;
pub use category::*;
pub use tech_product::*;
pub use user::*;
