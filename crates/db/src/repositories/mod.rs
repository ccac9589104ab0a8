//! Per-table repositories: static async methods over `&PgPool`.

pub mod book_repo;
pub mod bookmark_repo;
pub mod category_repo;
pub mod news_repo;
pub mod rating_repo;
pub mod role_repo;
pub mod session_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use bookmark_repo::BookmarkRepo;
pub use category_repo::CategoryRepo;
pub use news_repo::NewsRepo;
pub use rating_repo::RatingRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use transaction_repo::{BorrowOutcome, ReturnOutcome, TransactionRepo};
pub use user_repo::UserRepo;

/// Whether a sqlx error is a violation of the named unique constraint.
///
/// PostgreSQL reports unique violations with SQLSTATE 23505.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
