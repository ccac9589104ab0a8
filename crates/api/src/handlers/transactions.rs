//! Handlers for the `/transaction` resource: the borrow/return flow.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use pustaka_core::error::CoreError;
use pustaka_core::lending::{compute_penalty, days_until_due, generate_transaction_code,
    validate_loan_window};
use pustaka_core::types::DbId;
use pustaka_db::models::transaction::{
    CloseTransaction, CreateTransaction, TransactionBook, TransactionListItem,
};
use pustaka_db::repositories::{
    is_unique_violation, BookRepo, BorrowOutcome, ReturnOutcome, RoleRepo, TransactionRepo,
    UserRepo,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::handlers::MultipartPayload;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{ok, ok_empty, ApiResponse, Paginated};
use crate::state::AppState;
use crate::uploads;

/// Attempts to mint a unique transaction code before giving up. Collisions
/// in the eight-digit space are rare; one retry is almost always enough.
const CODE_RETRIES: usize = 3;

/// Request body for `POST /transaction`. Field names follow the wire
/// format consumed by the existing clients.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub id_user: DbId,
    pub id_book: DbId,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
}

/// POST /transaction
///
/// Validates the loan window, then decrements stock and inserts the open
/// loan row in one SQL transaction. A validation failure leaves the
/// counters untouched.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTransactionRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_loan_window(input.date_from, input.date_to)?;

    for attempt in 0..CODE_RETRIES {
        let create = CreateTransaction {
            code: generate_transaction_code(),
            user_id: input.id_user,
            book_id: input.id_book,
            date_from: input.date_from,
            date_to: input.date_to,
        };

        let outcome =
            match TransactionRepo::borrow(&state.pool, &create, state.config.allow_negative_stock)
                .await
            {
                Ok(outcome) => outcome,
                Err(err)
                    if is_unique_violation(&err, "uq_transactions_code")
                        && attempt + 1 < CODE_RETRIES =>
                {
                    tracing::debug!(code = %create.code, "transaction code collision, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

        return match outcome {
            BorrowOutcome::Created(_) => Ok(ok_empty()),
            BorrowOutcome::OutOfStock => Err(AppError::BadRequest(
                "Stok buku tidak tersedia".to_string(),
            )),
            BorrowOutcome::BookMissing => {
                Err(AppError::BadRequest("Buku tidak ditemukan".to_string()))
            }
        };
    }

    Err(AppError::InternalError(
        "Failed to allocate a unique transaction code".to_string(),
    ))
}

/// PUT /transaction/:id
///
/// Closes the loan. The optional multipart proof image is stored before
/// the DB write and removed again if the close fails. Returning after the
/// due date applies the fixed late penalty.
pub async fn return_book(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = MultipartPayload::read(multipart).await?;

    let mut proof = None;
    if let Some(file) = payload.any_file() {
        if !pustaka_core::assets::is_image_file(&file.filename) {
            return Err(AppError::BadRequest(
                "Bukti pengembalian harus format image".to_string(),
            ));
        }
        proof = Some(
            uploads::store_field(
                &state.config.assets_root,
                &state.config.base_url,
                "transactions",
                &file.filename,
                &file.bytes,
            )
            .await?,
        );
    }

    let date_to = TransactionRepo::due_date(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Transaksi tidak ditemukan".to_string()))?;

    let return_date = Utc::now().date_naive();
    let (penalty, penalty_desc) = compute_penalty(date_to, return_date);

    let outcome = TransactionRepo::close(
        &state.pool,
        id,
        &CloseTransaction {
            return_date,
            penalty,
            penalty_desc: penalty_desc.map(str::to_string),
            return_img_url: proof.as_ref().map(|p| p.url().to_string()),
        },
    )
    .await?;

    match outcome {
        ReturnOutcome::Closed => {
            if let Some(proof) = proof {
                proof.persist();
            }
            Ok(ok_empty())
        }
        ReturnOutcome::AlreadyClosed => Err(AppError::Core(CoreError::Conflict(
            "Transaksi sudah dikembalikan".to_string(),
        ))),
        ReturnOutcome::NotFound => {
            Err(AppError::BadRequest("Transaksi tidak ditemukan".to_string()))
        }
    }
}

/// GET /transactions
///
/// Paginated loan list with the book summary inlined and `dueDate` as
/// days remaining until the due date, negative when overdue.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<TransactionListItem>>>> {
    let rows = TransactionRepo::list(&state.pool, params.limit(), params.offset()).await?;
    let count = TransactionRepo::count(&state.pool).await?;

    let today = Utc::now().date_naive();
    let content = rows
        .into_iter()
        .map(|row| TransactionListItem {
            id: row.id,
            code: row.code,
            return_date: row.return_date,
            return_img_url: row.return_img_url,
            penalty: row.penalty,
            penalty_desc: row.penalty_desc,
            due_date: days_until_due(row.date_to, today),
            book: TransactionBook {
                title: row.book_title,
                author: row.book_author,
                img_url: row.book_img_url,
                categories: row.book_categories,
            },
        })
        .collect();

    Ok(ok(Paginated {
        content,
        total_page: params.total_pages(count),
        current_page: params.page(),
    }))
}

/// GET /transaction/:id
///
/// Loan detail with embedded book and user (plus role) summaries.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let transaction = TransactionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Transaksi tidak ditemukan".to_string()))?;

    let book = BookRepo::find_by_id(&state.pool, transaction.book_id).await?;
    let book = match book {
        Some(book) => json!({
            "title": book.title,
            "author": book.author,
            "publisher": book.publisher,
            "year": book.year,
            "pageSize": book.page_size,
            "imgUrl": book.img_url,
        }),
        None => serde_json::Value::Null,
    };

    let user = UserRepo::find_by_id(&state.pool, transaction.user_id).await?;
    let user = match user {
        Some(user) => {
            let role = RoleRepo::find_by_id(&state.pool, user.role_id).await?;
            json!({
                "idNumber": user.id_number,
                "name": user.name,
                "email": user.email,
                "phoneNumber": user.phone_number,
                "role": role.map(|r| json!({"code": r.code, "descr": r.descr})),
            })
        }
        None => serde_json::Value::Null,
    };

    Ok(ok(json!({
        "id": transaction.id,
        "code": transaction.code,
        "dateFrom": transaction.date_from,
        "dateTo": transaction.date_to,
        "returnDate": transaction.return_date,
        "returnImgUrl": transaction.return_img_url,
        "penalty": transaction.penalty,
        "penaltyDesc": transaction.penalty_desc,
        "book": book,
        "user": user,
    })))
}
