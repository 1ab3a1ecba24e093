//! Book records.

use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// `published` is the canonical name of the publication-year field. Older
/// catalog data spelled it `year_published` for some records; that spelling is
/// accepted on input and never produced on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identifier. Conventionally unique, not enforced.
    pub id: i64,
    /// Title of the work.
    pub title: String,
    /// Author as printed.
    pub author: String,
    /// Opening sentence of the work.
    pub first_sentence: String,
    /// Publication year, kept as text.
    #[serde(alias = "year_published")]
    pub published: String,
}

impl Book {
    /// Creates a new book record.
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        first_sentence: impl Into<String>,
        published: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            first_sentence: first_sentence.into(),
            published: published.into(),
        }
    }
}

/// Returns the built-in catalog served by the memory variant, in order.
#[must_use]
pub fn fixed_catalog() -> Vec<Book> {
    vec![
        Book::new(
            0,
            "A Fire Upon the Deep",
            "Vernor Vinge",
            "The coldsleep itself was dreamless.",
            "1992",
        ),
        Book::new(
            1,
            "The Ones Who Walk Away From Omelas",
            "Ursula K. Le Guin",
            "With a clamor of bells that set the swallows soaring, the Festival of Summer came to the city Omelas, bright-towered by the sea.",
            "1973",
        ),
        Book::new(
            2,
            "Dhalgren",
            "Samuel R. Delany",
            "to wound the autumnal city.",
            "1975",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_catalog_order() {
        let ids: Vec<i64> = fixed_catalog().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_serializes_canonical_published() {
        let book = Book::new(7, "T", "A", "S", "2001");
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["published"], "2001");
        assert!(json.get("year_published").is_none());
    }

    #[test]
    fn test_accepts_year_published_alias() {
        let json = r#"{
            "id": 0,
            "title": "A Fire Upon the Deep",
            "author": "Vernor Vinge",
            "first_sentence": "The coldsleep itself was dreamless.",
            "year_published": "1992"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();

        assert_eq!(book, fixed_catalog()[0]);
    }
}
