//! Search, status filter, and date sort over in-memory record lists.
//!
//! The engine is generic over [`Record`]: each record type names its own
//! status and sort-key types, so asking for an unknown sort field or a status
//! from another domain does not compile. [`apply`] never mutates its input
//! and keeps no state between calls.

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// A record the query engine can filter and sort.
pub trait Record {
    /// Value matched by [`StatusFilter::Only`].
    type Status: PartialEq;
    /// Date-valued fields the list can be ordered by.
    type SortKey: Copy;

    /// Fields the free-text term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> &Self::Status;

    fn sort_value(&self, key: Self::SortKey) -> Date;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// `All`, or exactly one status value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter<S> {
    #[default]
    All,
    Only(S),
}

impl<S: PartialEq> StatusFilter<S> {
    fn matches(&self, status: &S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl<S> From<Option<S>> for StatusFilter<S> {
    fn from(value: Option<S>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

/// Search term, status filter, and optional sort for one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S, K> {
    pub term: String,
    pub status: StatusFilter<S>,
    /// `None` keeps the source order.
    pub sort: Option<SortSpec<K>>,
}

impl<S, K> Default for ListQuery<S, K> {
    fn default() -> Self {
        Self {
            term: String::new(),
            status: StatusFilter::All,
            sort: None,
        }
    }
}

impl<S, K> ListQuery<S, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn status(mut self, status: S) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    pub fn sort_by(mut self, key: K, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec { key, direction });
        self
    }

    /// Flip the sort direction, if sorting at all.
    pub fn toggle_direction(&mut self) {
        if let Some(sort) = &mut self.sort {
            sort.direction = sort.direction.toggled();
        }
    }
}

/// Filter `records` by term and status, then sort.
///
/// The sort is stable: records with equal dates keep their relative source
/// order in both directions.
pub fn apply<'a, R: Record>(
    records: &'a [R],
    query: &ListQuery<R::Status, R::SortKey>,
) -> Vec<&'a R> {
    let needle = query.term.to_lowercase();

    let mut out: Vec<&R> = records
        .iter()
        .filter(|r| matches_term(*r, &needle))
        .filter(|r| query.status.matches(r.status()))
        .collect();

    if let Some(SortSpec { key, direction }) = query.sort {
        out.sort_by(|a, b| {
            let ord = a.sort_value(key).cmp(&b.sort_value(key));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    out
}

/// [`apply`], cloning the selected records.
pub fn apply_owned<R: Record + Clone>(
    records: &[R],
    query: &ListQuery<R::Status, R::SortKey>,
) -> Vec<R> {
    apply(records, query).into_iter().cloned().collect()
}

fn matches_term<R: Record>(record: &R, needle: &str) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}
