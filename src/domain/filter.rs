//! Free-text filtering of doctors and medicines.
//!
//! A query is trimmed and lowercased, then matched as a single substring
//! against each of an item's searchable fields. An empty query matches
//! everything. Filtering is stable: results keep the order of the input.

use crate::domain::{Doctor, Medicine};

/// Something with text fields a search box can match against.
pub trait Searchable {
    /// The fields a query is matched against.
    fn search_fields(&self) -> impl Iterator<Item = &str>;
}

impl Searchable for Doctor {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.name.as_str(),
            self.specialty.as_str(),
            self.location.as_str(),
        ]
        .into_iter()
    }
}

impl Searchable for Medicine {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.usage.as_str()].into_iter()
    }
}

/// A normalised search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Normalises raw search-box input.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Whether the query matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any of `item`'s fields contains the query, ignoring case.
    #[must_use]
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.is_empty()
            || item
                .search_fields()
                .any(|field| field.to_lowercase().contains(&self.0))
    }

    /// The items matching this query, in their original order.
    pub fn filter<'a, T: Searchable>(&'a self, items: &'a [T]) -> impl Iterator<Item = &'a T> {
        items.iter().filter(move |item| self.matches(*item))
    }
}

/// Doctors whose name, specialty or location contains `query`.
#[must_use]
pub fn filter_doctors(doctors: &[Doctor], query: &str) -> Vec<Doctor> {
    Query::new(query).filter(doctors).cloned().collect()
}

/// Medicines whose name or use contains `query`.
#[must_use]
pub fn filter_medicines(medicines: &[Medicine], query: &str) -> Vec<Medicine> {
    Query::new(query).filter(medicines).cloned().collect()
}
