//! Row models and DTOs, one module per table.

pub mod book;
pub mod bookmark;
pub mod category;
pub mod news;
pub mod rating;
pub mod role;
pub mod session;
pub mod transaction;
pub mod user;
