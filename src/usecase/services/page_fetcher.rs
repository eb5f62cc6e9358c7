use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::page::{Page, PageRequest, RemoteQuery};
use crate::usecase::ports::source::{TransportError, UserSource};

pub struct PageFetcher {
    source: Arc<dyn UserSource>,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self { source }
    }

    /// Issues exactly one request for `request` and tags the resulting page
    /// with the request's logical offset.
    pub fn fetch(&self, request: &PageRequest) -> Result<Page, TransportError> {
        let query = request.criteria.remote_query();
        let limit = request.limit;
        let offset = request.remote_offset;
        debug!(?query, limit, offset, logical = request.logical_offset, "fetching page");

        let envelope = match &query {
            RemoteQuery::List => self.source.list(limit, offset),
            RemoteQuery::Search { query } => self.source.search(query, limit, offset),
            RemoteQuery::FilterByField { field, value } => {
                self.source.filter_by_field(field, value, limit, offset)
            }
        }
        .inspect_err(|err| warn!(%err, "page fetch failed"))?;

        let page = Page::new(
            envelope.records,
            envelope.total,
            request.logical_offset,
            offset,
        );
        debug!(
            returned = page.returned_count,
            reported_total = page.reported_total,
            "page received"
        );
        Ok(page)
    }
}
