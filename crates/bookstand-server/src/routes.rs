//! Catalogue HTTP Routes
//!
//! Form-driven endpoints for listing, adding, renaming, and deleting books.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use bookstand_core::{Book, BookDraft, CatalogError, Database};

// ==================
// Shared State
// ==================

/// Catalogue state shared across handlers
pub struct CatalogState {
    pub db: Database,
}

impl CatalogState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

// ==================
// Request/Response Types
// ==================

/// Raw add-form fields. Everything optional here; `BookDraft::validate`
/// decides what is acceptable.
#[derive(Debug, Deserialize)]
pub struct AddBookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub date: Option<String>,
}

impl From<AddBookForm> for BookDraft {
    fn from(form: AddBookForm) -> Self {
        BookDraft {
            title: form.title,
            author: form.author,
            publisher: form.publisher,
            date: form.date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenameForm {
    pub oldtitle: String,
    pub newtitle: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub title: String,
}

/// The full current listing, handed to the presentation layer.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub books: Vec<Book>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

// ==================
// Catalogue Routes
// ==================

/// Create catalogue routes
pub fn catalog_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/", get(list_books_handler).post(add_book_handler))
        .route("/update", post(rename_book_handler))
        .route("/delete", post(delete_book_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn error_response(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        }),
    )
}

fn current_listing(
    state: &CatalogState,
) -> Result<Json<ListingResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.db.list_books() {
        Ok(books) => {
            let total = books.len();
            Ok(Json(ListingResponse { books, total }))
        }
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )),
    }
}

// ==================
// Handlers
// ==================

async fn list_books_handler(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<ListingResponse>, (StatusCode, Json<ErrorResponse>)> {
    current_listing(&state)
}

/// Best-effort insert: a rejected book is logged and swallowed, and the
/// caller gets the unchanged listing back instead of an error page.
async fn add_book_handler(
    State(state): State<Arc<CatalogState>>,
    Form(form): Form<AddBookForm>,
) -> Result<Json<ListingResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = state.db.add_book(form.into()) {
        warn!("failed to add book: {e}");
    }
    current_listing(&state)
}

/// Rename failures are surfaced, not swallowed: the record the user asked
/// to rename either moved or the request failed visibly.
async fn rename_book_handler(
    State(state): State<Arc<CatalogState>>,
    Form(form): Form<RenameForm>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    match state.db.rename_book(&form.oldtitle, &form.newtitle) {
        Ok(()) => Ok(Redirect::to("/")),
        Err(e) => {
            let status = match &e {
                CatalogError::BookNotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::DuplicateTitle(_) => StatusCode::CONFLICT,
                CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err(error_response(status, e.to_string()))
        }
    }
}

/// Deleting an absent title is a no-op; either way the client goes back
/// to the listing.
async fn delete_book_handler(
    State(state): State<Arc<CatalogState>>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    match state.db.remove_book(&form.title) {
        Ok(_) => Ok(Redirect::to("/")),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )),
    }
}
