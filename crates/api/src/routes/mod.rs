pub mod auth;
pub mod bookmarks;
pub mod books;
pub mod categories;
pub mod news;
pub mod ratings;
pub mod roles;
pub mod transactions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the top-level route tree.
///
/// ```text
/// /users/register, /users/login, /refreshToken, /users/logout   auth
/// /users, /user/{id}, /user-verify/{id}                         users
/// /book, /books, /books-mostpick, /book-category/{id}           books
/// /categories, /category, /category/{id}                        categories
/// /rating, /ratings, /rating-average/{id}                       ratings
/// /news, /news/{id}                                             news
/// /roles                                                        roles
/// /bookmark/{id}, /remove-bookmark                              bookmarks
/// /transaction, /transactions, /transaction/{id}                transactions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(books::router())
        .merge(categories::router())
        .merge(ratings::router())
        .merge(news::router())
        .merge(roles::router())
        .merge(bookmarks::router())
        .merge(transactions::router())
}
