//! Fixed response bodies and error mapping.

use crate::Error;
use crate::config::CatalogKind;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Body of every 404 response.
pub const NOT_FOUND_BODY: &str = "<h1>404</h1><p>The resource could not be found.</p>";

/// Body returned when the memory catalog is queried without an `id`.
pub const MISSING_ID_MESSAGE: &str = "Error: No id field provided. Please specify an id.";

const MEMORY_HOME: &str = "<h1>Distant Reading Archive</h1><p>This site is a prototype API for distant reading of science fiction novels.</p>";

const SQLITE_HOME: &str = "<h1>Distant Reading Archive</h1>
<p>A prototype API for distant reading of science fiction novels.</p>";

/// Returns the welcome page for a catalog kind.
#[must_use]
pub const fn home_page(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Memory => MEMORY_HOME,
        CatalogKind::Sqlite => SQLITE_HOME,
    }
}

/// The fixed 404 response.
#[must_use]
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response()
}

/// Wrapper that turns a crate [`Error`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::InvalidInput(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Error::NoFilterCriteria => not_found(),
            err @ Error::OperationFailed { .. } => {
                tracing::error!(error = %err, "catalog request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            },
        }
    }
}
