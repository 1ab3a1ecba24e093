//! Filter criteria for catalog lookups.

use super::Book;
use std::fmt;

/// A field that can be used as a lookup criterion.
///
/// The declaration order is the order in which criteria are applied and
/// rendered into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Match on `id`.
    Id,
    /// Match on `published`.
    Published,
    /// Match on `author`.
    Author,
}

impl FilterField {
    /// All fields, in application order.
    pub const ALL: [Self; 3] = [Self::Id, Self::Published, Self::Author];

    /// Returns the query-parameter name for this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Published => "published",
            Self::Author => "author",
        }
    }

    /// Returns the column name in the `books` table.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Published => "published",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality criteria for a filtered lookup.
///
/// Each supplied criterion must match; absent criteria are ignored. An empty
/// filter has no criteria at all and is rejected by catalog lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Required `id`, as text.
    pub id: Option<String>,
    /// Required `published` value.
    pub published: Option<String>,
    /// Required `author` value.
    pub author: Option<String>,
}

impl BookFilter {
    /// Creates an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id: None,
            published: None,
            author: None,
        }
    }

    /// Builds a filter from raw query values.
    ///
    /// Empty values are treated as absent, so `?author=` does not constrain
    /// anything.
    #[must_use]
    pub fn from_params(
        id: Option<String>,
        published: Option<String>,
        author: Option<String>,
    ) -> Self {
        Self {
            id: id.filter(|v| !v.is_empty()),
            published: published.filter(|v| !v.is_empty()),
            author: author.filter(|v| !v.is_empty()),
        }
    }

    /// Sets the `id` criterion.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the `published` criterion.
    #[must_use]
    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    /// Sets the `author` criterion.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Returns the value supplied for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Id => self.id.as_deref(),
            FilterField::Published => self.published.as_deref(),
            FilterField::Author => self.author.as_deref(),
        }
    }

    /// Returns the supplied criteria in application order.
    #[must_use]
    pub fn criteria(&self) -> Vec<(FilterField, &str)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
            .collect()
    }

    /// Returns true if no criteria are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none() && self.published.is_none() && self.author.is_none()
    }

    /// Returns true if `book` satisfies every supplied criterion.
    ///
    /// `id` goes through [`integer_value`], so `"1"`, `"01"` and `"1.0"` all
    /// select id 1 while `"1.5"` or `"one"` select nothing.
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        self.criteria().into_iter().all(|(field, value)| match field {
            FilterField::Id => integer_value(value) == Some(book.id),
            FilterField::Published => book.published == value,
            FilterField::Author => book.author == value,
        })
    }
}

/// Converts text to an integer the way `SQLite` applies INTEGER affinity.
///
/// Integer literals convert directly. Real literals convert only when the
/// value is whole and fits in an `i64`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
pub fn integer_value(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }

    // Rust accepts "inf" and "NaN"; SQLite treats those as plain text.
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    let real = text.parse::<f64>().ok()?;
    let in_range = real >= i64::MIN as f64 && real < i64::MAX as f64;
    (real.is_finite() && real.fract() == 0.0 && in_range).then_some(real as i64)
}
