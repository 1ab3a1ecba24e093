//! SQL construction for catalog lookups.
//!
//! A [`BookFilter`] is folded into a `WHERE` clause with numbered parameters
//! (`?1`, `?2`, ...) and a parameter list in the same order. Column names come
//! from [`FilterField::column`], never from input, so the only caller-supplied
//! data in a query is bound values.

use super::BOOK_COLUMNS;
use crate::models::{BookFilter, FilterField};

/// A parameterized query ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    /// SQL text containing only fixed identifiers and placeholders.
    pub sql: String,
    /// Values for the placeholders, `params[i]` binds `?{i + 1}`.
    pub params: Vec<String>,
}

/// Builds the equality conditions of a filter with numbered parameters.
///
/// # Arguments
///
/// * `filter` - The filter to convert
/// * `start_param` - The number of the first placeholder
///
/// # Returns
///
/// A tuple containing:
/// - The conditions joined with ` AND ` (empty if the filter is empty)
/// - Vector of parameter values
/// - The next available parameter index
///
/// # Examples
///
/// ```
/// use distant_reading::BookFilter;
/// use distant_reading::storage::sqlite::build_filter_clause_numbered;
///
/// let filter = BookFilter::new()
///     .with_author("Connie Willis")
///     .with_published("1999");
///
/// let (clause, params, next_idx) = build_filter_clause_numbered(&filter, 1);
/// assert_eq!(clause, "published = ?1 AND author = ?2");
/// assert_eq!(params, vec!["1999", "Connie Willis"]);
/// assert_eq!(next_idx, 3);
/// ```
#[must_use]
pub fn build_filter_clause_numbered(
    filter: &BookFilter,
    start_param: usize,
) -> (String, Vec<String>, usize) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();
    let mut param_idx = start_param;

    for (field, value) in filter.criteria() {
        conditions.push(condition(field, param_idx));
        params.push(value.to_string());
        param_idx += 1;
    }

    (conditions.join(" AND "), params, param_idx)
}

fn condition(field: FilterField, param_idx: usize) -> String {
    format!("{} = ?{param_idx}", field.column())
}

/// Builds the full `SELECT` for a filter.
///
/// An empty filter selects every row.
#[must_use]
pub fn build_select_query(filter: &BookFilter) -> FilterQuery {
    let (clause, params, _) = build_filter_clause_numbered(filter, 1);

    let sql = if clause.is_empty() {
        format!("SELECT {BOOK_COLUMNS} FROM books;")
    } else {
        format!("SELECT {BOOK_COLUMNS} FROM books WHERE {clause};")
    };

    FilterQuery { sql, params }
}
