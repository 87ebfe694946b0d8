//! Listing filter.
//!
//! Listings are restricted to public artworks, optionally narrowed by a
//! case-insensitive substring search over title and artist name and by an
//! exact category match. Results are newest first.

use std::cmp::Ordering;

use sqlx::{Postgres, QueryBuilder};

use crate::artwork::{Artwork, Visibility};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkFilter {
    search: Option<String>,
    category: Option<String>,
}

impl ArtworkFilter {
    /// Empty strings count as absent.
    pub fn new(search: Option<String>, category: Option<String>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            category: category.filter(|c| !c.is_empty()),
        }
    }

    /// Evaluate the filter against an in-memory record.
    pub fn matches(&self, artwork: &Artwork) -> bool {
        let fields = &artwork.fields;
        if fields.visibility != Some(Visibility::Public) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = |v: &Option<String>| {
                v.as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
            };
            if !hit(&fields.title) && !hit(&fields.artist_name) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if fields.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        true
    }

    /// Append the `WHERE` clause for the `artworks` table.
    ///
    /// User input is always bound, never spliced into the SQL text.
    /// `strpos` keeps the search literal so `%`, `_` and regex
    /// metacharacters match themselves. `lower()` needs a UTF-8 database
    /// locale to fold non-ASCII letters the way [`str::to_lowercase`] does.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE content->>'visibility' = ");
        qb.push_bind(Visibility::Public.as_str());

        if let Some(search) = &self.search {
            qb.push(" AND (strpos(lower(content->>'title'), lower(");
            qb.push_bind(search.clone());
            qb.push(")) > 0 OR strpos(lower(content->>'artistName'), lower(");
            qb.push_bind(search.clone());
            qb.push(")) > 0)");
        }

        if let Some(category) = &self.category {
            qb.push(" AND content->>'category' = ");
            qb.push_bind(category.clone());
        }
    }
}

/// Listing order: `createdAt` descending, identifier descending on ties.
pub fn newest_first(a: &Artwork, b: &Artwork) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

pub const ORDER_BY_NEWEST: &str = " ORDER BY created_at DESC, id DESC";
