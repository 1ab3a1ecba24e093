//! Data models for the book catalog.
//!
//! This module contains the record type served by the API and the filter
//! type used to narrow it.

mod book;
mod filter;

pub use book::{Book, fixed_catalog};
pub use filter::{BookFilter, FilterField, integer_value};
