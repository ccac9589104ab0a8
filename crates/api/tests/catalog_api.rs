//! HTTP-level integration tests for the catalog surface: categories,
//! books, ratings, bookmarks, and roles.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_book, create_test_user, delete, get, get_auth, login_user, post_json,
    post_json_auth, put_json, put_json_auth,
};
use sqlx::PgPool;

async fn access_token(app: axum::Router, pool: &PgPool, email: &str) -> String {
    let (_user, password) = create_test_user(pool, email, 2).await;
    let tokens = login_user(app, email, &password).await;
    tokens["accessToken"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Authentication boundary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_reject_missing_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    for uri in ["/users", "/books", "/transactions", "/roles"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{uri} must require a bearer token"
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = get_auth(app, "/books", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Autentikasi token tidak valid");
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn category_crud_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    // Empty catalog renders as a 404, matching the existing clients.
    let response = get(app.clone(), "/categories").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        app.clone(),
        "/category",
        serde_json::json!({"name": "Fiksi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let categories = json["result"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Fiksi");
    let id = categories[0]["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/category/{id}"),
        serde_json::json!({"name": "Non-Fiksi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app.clone(), &format!("/category/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/categories").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_category_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/category", serde_json::json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Nama kategori harus diisi");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updating_a_missing_category_fails(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = put_json(
        app,
        "/category/999999",
        serde_json::json!({"name": "Apapun"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category tidak ditemukan");
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn book_listing_is_paginated(pool: PgPool) {
    create_test_book(&pool, "Buku Satu", 1).await;
    create_test_book(&pool, "Buku Dua", 1).await;
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "baca@kampus.ac.id").await;

    let response = get_auth(app, "/books?page=1&limit=1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let result = &json["result"];
    assert_eq!(result["content"].as_array().unwrap().len(), 1);
    assert_eq!(result["totalPage"], 2);
    assert_eq!(result["currentPage"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn book_detail_carries_category_names(pool: PgPool) {
    let book = create_test_book(&pool, "Buku Berkategori", 1).await;
    let category_id: i64 =
        sqlx::query_scalar("INSERT INTO categories (name) VALUES ('Sejarah') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2)")
        .bind(book.id)
        .bind(category_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "detail@kampus.ac.id").await;

    let response = get_auth(app, &format!("/book/{}", book.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["title"], "Buku Berkategori");
    assert_eq!(json["result"]["category"], serde_json::json!(["Sejarah"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_book_detail_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "cari@kampus.ac.id").await;

    let response = get_auth(app, "/book/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Buku tidak ditemukan");
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_is_attributed_to_the_caller(pool: PgPool) {
    let book = create_test_book(&pool, "Buku Dinilai", 1).await;
    let (user, password) = create_test_user(&pool, "nilai@kampus.ac.id", 2).await;
    let app = common::build_test_app(pool.clone());
    let tokens = login_user(app.clone(), "nilai@kampus.ac.id", &password).await;
    let access = tokens["accessToken"].as_str().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/rating",
        access,
        serde_json::json!({"bookId": book.id, "rating": 4, "review": "Bagus"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored: (i64, i32) =
        sqlx::query_as("SELECT user_id, rating FROM ratings WHERE book_id = $1")
            .bind(book.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored.0, user.id);
    assert_eq!(stored.1, 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_outside_scale_is_rejected(pool: PgPool) {
    let book = create_test_book(&pool, "Buku Nol", 1).await;
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "skala@kampus.ac.id").await;

    for rating in [0, 6] {
        let response = post_json_auth(
            app.clone(),
            "/rating",
            &token,
            serde_json::json!({"bookId": book.id, "rating": rating}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Rating harus bernilai 1 sampai 5");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_average_is_the_mean(pool: PgPool) {
    let book = create_test_book(&pool, "Buku Rata", 1).await;
    let app = common::build_test_app(pool.clone());

    for (email, rating) in [("satu@kampus.ac.id", 2), ("dua@kampus.ac.id", 5)] {
        let (_user, password) = create_test_user(&pool, email, 2).await;
        let tokens = login_user(app.clone(), email, &password).await;
        let access = tokens["accessToken"].as_str().unwrap();
        let response = post_json_auth(
            app.clone(),
            "/rating",
            access,
            serde_json::json!({"bookId": book.id, "rating": rating}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(app, &format!("/rating-average/{}", book.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["ratingAverage"], 3.5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unrated_book_averages_zero(pool: PgPool) {
    let book = create_test_book(&pool, "Buku Sepi", 1).await;
    let app = common::build_test_app(pool.clone());

    let response = get(app, &format!("/rating-average/{}", book.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["ratingAverage"], 0.0);
}

// ---------------------------------------------------------------------------
// Bookmarks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn bookmark_add_list_remove_round_trip(pool: PgPool) {
    let book = create_test_book(&pool, "Buku Favorit", 1).await;
    let (user, password) = create_test_user(&pool, "favorit@kampus.ac.id", 2).await;
    let app = common::build_test_app(pool.clone());
    let tokens = login_user(app.clone(), "favorit@kampus.ac.id", &password).await;
    let access = tokens["accessToken"].as_str().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/bookmark/{}", user.id),
        access,
        serde_json::json!({
            "bookId": book.id,
            "title": book.title,
            "author": book.author,
            "imgUrl": null,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &format!("/bookmark/{}", user.id), access).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let bookmarks = json["result"]["bookmark"].as_array().unwrap();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0]["title"], "Buku Favorit");

    let response = put_json_auth(
        app.clone(),
        &format!("/remove-bookmark?id={}&book_id={}", user.id, book.id),
        access,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/bookmark/{}", user.id), access).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tidak ada bookmark");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn removing_an_absent_bookmark_fails(pool: PgPool) {
    let book = create_test_book(&pool, "Bukan Favorit", 1).await;
    let (user, password) = create_test_user(&pool, "kosong@kampus.ac.id", 2).await;
    let app = common::build_test_app(pool.clone());
    let tokens = login_user(app.clone(), "kosong@kampus.ac.id", &password).await;
    let access = tokens["accessToken"].as_str().unwrap();

    let response = put_json_auth(
        app,
        &format!("/remove-bookmark?id={}&book_id={}", user.id, book.id),
        access,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Gagal menghapus buku dari favorit");
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn news_create_then_public_listing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "warta@kampus.ac.id").await;

    let data = serde_json::json!({
        "title": "Perpustakaan Buka Kembali",
        "descr": "Mulai Senin depan",
    })
    .to_string();
    let response = common::post_multipart_auth(
        app.clone(),
        "/news",
        &token,
        &[
            common::Part::Text {
                name: "data",
                value: &data,
            },
            common::Part::File {
                name: "image",
                filename: "banner.png",
                bytes: b"fake-png",
            },
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The listing needs no token.
    let response = get(app, "/news?page=1&limit=10").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let content = json["result"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["title"], "Perpustakaan Buka Kembali");
    assert!(content[0]["imgUrl"].as_str().unwrap().contains("/public/assets/news/"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn news_image_must_be_an_image(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "salahfile@kampus.ac.id").await;

    let data = serde_json::json!({"title": "Judul", "descr": "Isi"}).to_string();
    let response = common::post_multipart_auth(
        app,
        "/news",
        &token,
        &[
            common::Part::Text {
                name: "data",
                value: &data,
            },
            common::Part::File {
                name: "image",
                filename: "lampiran.pdf",
                bytes: b"fake-pdf",
            },
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Gambar berita harus format image");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_missing_news_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "hapus@kampus.ac.id").await;

    let response = common::delete_auth(app, "/news/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Data tidak ditemukan");
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn seeded_roles_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token(app.clone(), &pool, "peran@kampus.ac.id").await;

    let response = get_auth(app, "/roles", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let roles = json["result"].as_array().unwrap();
    let codes: Vec<i64> = roles.iter().map(|r| r["code"].as_i64().unwrap()).collect();
    assert!(codes.contains(&0) && codes.contains(&1) && codes.contains(&2));
}
