use chrono::{DateTime, Utc};

use crate::domain::entities::filter::SearchType;
use crate::domain::entities::user::RemoteUser;

/// Server-applicable subset of a filter identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerCriteria {
    pub search_query: Option<String>,
    pub search_type: SearchType,
    pub gender: Option<String>,
}

/// The single request shape issued for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteQuery {
    List,
    Search { query: String },
    FilterByField { field: String, value: String },
}

impl ServerCriteria {
    /// Search wins over gender; gender wins over a plain listing.
    pub fn remote_query(&self) -> RemoteQuery {
        if let Some(query) = self.search_query.as_ref().filter(|q| !q.is_empty()) {
            return match self.search_type.field() {
                None => RemoteQuery::Search {
                    query: query.clone(),
                },
                Some(field) => RemoteQuery::FilterByField {
                    field: field.to_string(),
                    value: query.clone(),
                },
            };
        }
        if let Some(gender) = self.gender.as_ref().filter(|g| !g.is_empty()) {
            return RemoteQuery::FilterByField {
                field: "gender".to_string(),
                value: gender.clone(),
            };
        }
        RemoteQuery::List
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Records loaded when the request was made; the page cache key.
    pub logical_offset: usize,
    /// Offset sent to the source. Differs from `logical_offset` while cycling.
    pub remote_offset: usize,
    pub limit: usize,
    pub criteria: ServerCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<RemoteUser>,
    pub reported_total: usize,
    pub requested_offset: usize,
    pub remote_offset: usize,
    pub returned_count: usize,
    pub fetched_at: DateTime<Utc>,
}

impl Page {
    pub fn new(
        records: Vec<RemoteUser>,
        reported_total: usize,
        requested_offset: usize,
        remote_offset: usize,
    ) -> Self {
        let returned_count = records.len();
        Self {
            records,
            reported_total,
            requested_offset,
            remote_offset,
            returned_count,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.returned_count == 0
    }
}
