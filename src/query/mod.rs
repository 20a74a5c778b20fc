//! In-memory search and facet filtering over record collections.
//!
//! A record type opts in by implementing [`Searchable`]. A [`RecordQuery`]
//! names the text fields a search runs across and any facet filters;
//! [`filter_records`] applies it and borrows the matches from the input,
//! keeping input order.

pub mod fields;

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

pub use fields::{
    BUSINESS_LIST_FIELDS, BusinessFacet, BusinessField, INDIVIDUAL_LIST_FIELDS, IndividualFacet,
    IndividualField, SERVICE_LIST_FIELDS, ServiceFacet, ServiceField, TASK_LIST_FIELDS, TaskFacet,
    TaskField,
};

/// Filter value meaning "do not filter on this facet".
pub const ALL_SENTINEL: &str = "all";

/// Accepted values for one facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FacetFilter {
    #[default]
    All,
    Exact(String),
    AnyOf(Vec<String>),
}

impl FacetFilter {
    /// Build a filter from a page parameter. Unset and `"all"` disable filtering.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(ALL_SENTINEL) => Self::All,
            Some(value) => Self::Exact(value.to_string()),
        }
    }

    /// Multi-select filter. An empty selection accepts everything.
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Self::All
        } else {
            Self::AnyOf(values)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Exact, case-sensitive comparison. A missing value only passes `All`.
    pub fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Exact(expected) => value == Some(expected.as_str()),
            Self::AnyOf(accepted) => {
                value.is_some_and(|value| accepted.iter().any(|candidate| candidate == value))
            }
        }
    }
}

/// A record that can be searched by text and filtered by facets.
pub trait Searchable {
    type Field: Copy + fmt::Debug;
    type Facet: Copy + PartialEq + fmt::Debug;

    /// String form of a text field, or `None` when the record has no value.
    fn field_text(&self, field: Self::Field) -> Option<Cow<'_, str>>;

    /// Wire value of a facet, or `None` when the record has no value.
    fn facet_value(&self, facet: Self::Facet) -> Option<&'static str>;
}

/// Search text, the fields it runs across, and facet filters.
#[derive(Debug, Clone)]
pub struct RecordQuery<T: Searchable> {
    search_text: String,
    fields: Vec<T::Field>,
    facets: Vec<(T::Facet, FacetFilter)>,
}

impl<T: Searchable> RecordQuery<T> {
    pub fn new(fields: &[T::Field]) -> Self {
        Self {
            search_text: String::new(),
            fields: fields.to_vec(),
            facets: Vec::new(),
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Add a facet filter. Filters on different facets combine as a conjunction;
    /// a later filter on the same facet replaces the earlier one.
    pub fn facet(mut self, facet: T::Facet, filter: FacetFilter) -> Self {
        match self.facets.iter_mut().find(|(existing, _)| *existing == facet) {
            Some((_, current)) => *current = filter,
            None => self.facets.push((facet, filter)),
        }
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn matches(&self, record: &T) -> bool {
        self.matches_text(record) && self.matches_facets(record)
    }

    fn matches_text(&self, record: &T) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        self.fields.iter().any(|field| {
            record
                .field_text(*field)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }

    fn matches_facets(&self, record: &T) -> bool {
        self.facets
            .iter()
            .all(|(facet, filter)| filter.is_all() || filter.accepts(record.facet_value(*facet)))
    }
}

/// Records matching `query`, in input order.
pub fn filter_records<'a, T, I>(records: I, query: &RecordQuery<T>) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut scanned = 0usize;
    let matched: Vec<&'a T> = records
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter(|record| query.matches(record))
        .collect();
    debug!(
        search = %query.search_text,
        facets = query.facets.len(),
        scanned,
        matched = matched.len(),
        "filtered records"
    );
    matched
}
