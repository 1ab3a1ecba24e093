//! Shared helpers for the HTTP integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use distant_reading::{Book, CatalogKind, CatalogServer, ServerConfig};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::ServiceExt;

/// Rows of the seeded `books` table: (id, published, author, title, first sentence).
pub const SEED_ROWS: &[(i64, i64, &str, &str, &str)] = &[
    (
        1,
        1999,
        "Connie Willis",
        "To Say Nothing of the Dog",
        "It was the last straw.",
    ),
    (
        2,
        1992,
        "Connie Willis",
        "Doomsday Book",
        "Mr. Dunworthy opened the door to the laboratory.",
    ),
    (
        3,
        1999,
        "Vernor Vinge",
        "A Deepness in the Sky",
        "The Qeng Ho fleet was the first to arrive.",
    ),
    (
        4,
        1969,
        "Ursula K. Le Guin",
        "The Left Hand of Darkness",
        "I'll make my report as if I told a story.",
    ),
];

/// Creates `books.db` in `dir` with the [`SEED_ROWS`].
pub fn seed_database(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("books.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY,
            published INT,
            author VARCHAR,
            title VARCHAR,
            first_sentence VARCHAR
        );",
    )
    .unwrap();
    for (id, published, author, title, first) in SEED_ROWS {
        conn.execute(
            "INSERT INTO books (id, published, author, title, first_sentence) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, published, author, title, first],
        )
        .unwrap();
    }
    path
}

/// Router serving the built-in catalog.
pub fn memory_router() -> Router {
    CatalogServer::new(ServerConfig::new()).router()
}

/// Router serving the database at `path`.
pub fn sqlite_router(path: &Path) -> Router {
    let config = ServerConfig::new()
        .with_catalog(CatalogKind::Sqlite)
        .with_database(path);
    CatalogServer::new(config).router()
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parses the body as a list of books.
    pub fn books(&self) -> Vec<Book> {
        serde_json::from_str(&self.body).expect("body is a JSON array of books")
    }

    /// Sorted ids of the returned books.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.books().iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids
    }
}

/// Sends `GET uri` through `router`.
pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
