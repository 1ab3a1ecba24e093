//! Row conversion for the `books` table.

use crate::models::Book;
use rusqlite::Row;
use rusqlite::types::ValueRef;

/// Columns selected for every catalog query, in [`book_from_row`] order.
pub const BOOK_COLUMNS: &str = "id, title, author, first_sentence, published";

/// Builds a [`Book`] from a row selected with [`BOOK_COLUMNS`].
///
/// # Errors
///
/// Returns an error if `id` is not an integer.
pub fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: column_text(row, 1)?,
        author: column_text(row, 2)?,
        first_sentence: column_text(row, 3)?,
        published: column_text(row, 4)?,
    })
}

/// Reads a column as text regardless of its storage class.
///
/// External catalogs are not consistent about types (`published` is often an
/// `INT` column), so integers and reals are rendered in decimal and `NULL`
/// becomes an empty string.
///
/// # Errors
///
/// Returns an error if `idx` is out of range.
pub fn column_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}
