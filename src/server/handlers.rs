//! Request handlers.
//!
//! Catalog lookups are blocking (the `SQLite` backend does file I/O), so they
//! run on the blocking pool via [`with_catalog`].

use super::AppState;
use super::pages::{ApiError, MISSING_ID_MESSAGE, home_page, not_found};
use crate::models::{Book, BookFilter};
use crate::storage::CatalogBackend;
use crate::{Error, Result};
use axum::Json;
use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::{Html, Response};
use std::sync::Arc;

/// Raw query string pairs in request order.
///
/// Read as a list rather than a struct so a repeated key is not a
/// deserialization error; lookups take the first occurrence.
pub type QueryPairs = Vec<(String, String)>;

/// Returns the first value given for `key`.
#[must_use]
pub fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

/// Query string of the id-only lookup.
#[derive(Debug, Default)]
pub struct IdParams {
    /// Raw `id` value.
    pub id: Option<String>,
}

impl IdParams {
    /// Picks the first `id` out of the query pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            id: first_value(pairs, "id"),
        }
    }
}

/// Query string of the multi-field lookup.
#[derive(Debug, Default)]
pub struct FilterParams {
    /// Raw `id` value, passed through unparsed.
    pub id: Option<String>,
    /// Raw `published` value.
    pub published: Option<String>,
    /// Raw `author` value.
    pub author: Option<String>,
}

impl FilterParams {
    /// Picks the first `id`, `published` and `author` out of the query pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            id: first_value(pairs, "id"),
            published: first_value(pairs, "published"),
            author: first_value(pairs, "author"),
        }
    }
}

impl From<FilterParams> for BookFilter {
    fn from(params: FilterParams) -> Self {
        Self::from_params(params.id, params.published, params.author)
    }
}

/// Parses the `id` of an id-only lookup.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `raw` is absent or not an integer.
pub fn parse_id(raw: Option<&str>) -> Result<i64> {
    let raw = raw.ok_or_else(|| Error::InvalidInput(MISSING_ID_MESSAGE.to_string()))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("Error: id must be an integer, got '{raw}'.")))
}

/// Runs `op` against the catalog on the blocking pool.
async fn with_catalog<T, F>(catalog: Arc<dyn CatalogBackend>, op: F) -> Result<T>
where
    F: FnOnce(&dyn CatalogBackend) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(catalog.as_ref()))
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "catalog_task".to_string(),
            cause: e.to_string(),
        })?
}

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Html<&'static str> {
    Html(home_page(state.kind))
}

/// `GET /api/v1/resources/books/all`
pub async fn all_books(State(state): State<AppState>) -> std::result::Result<Json<Vec<Book>>, ApiError> {
    let books = with_catalog(state.catalog, |catalog| catalog.all()).await?;
    tracing::debug!(count = books.len(), "returning all books");
    Ok(Json(books))
}

/// `GET /api/v1/resources/books` on the memory catalog.
///
/// `id` is required and must be an integer.
pub async fn find_by_id(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> std::result::Result<Json<Vec<Book>>, ApiError> {
    let params = IdParams::from_pairs(&pairs);
    let id = parse_id(params.id.as_deref()).inspect_err(|e| {
        tracing::debug!(error = %e, "rejecting id lookup");
    })?;

    let books = with_catalog(state.catalog, move |catalog| catalog.find_by_id(id)).await?;
    Ok(Json(books))
}

/// `GET /api/v1/resources/books` on the `SQLite` catalog.
///
/// Any of `id`, `published` and `author` narrow the result; none at all is
/// answered with the 404 page.
pub async fn filter_books(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> std::result::Result<Json<Vec<Book>>, ApiError> {
    let filter = BookFilter::from(FilterParams::from_pairs(&pairs));
    let books = with_catalog(state.catalog, move |catalog| catalog.find(&filter)).await?;
    Ok(Json(books))
}

/// Fallback for unmatched paths.
pub async fn fallback() -> Response {
    not_found()
}

/// Counts responses by method and status.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::counter!(
        "http_requests_total",
        "method" => method,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    response
}
