//! Shared `SQLite` infrastructure for the catalog backend.
//!
//! ## Module Structure
//!
//! - [`connection`]: Read-only connection opening and configuration
//! - [`sql`]: Filter clause building with numbered parameters
//! - [`book_row`]: Row conversion into [`Book`](crate::models::Book)
//!
//! Values supplied by callers only ever travel as bound parameters; the SQL
//! text is assembled from fixed column names and placeholders.

mod book_row;
mod connection;
mod sql;

pub use book_row::{BOOK_COLUMNS, book_from_row, column_text};
pub use connection::{BUSY_TIMEOUT, configure_connection, open_read_only};
pub use sql::{FilterQuery, build_filter_clause_numbered, build_select_query};
