use tracing::{debug, trace};

use crate::domain::entities::page::Page;
use crate::domain::entities::user::{User, UserId};

/// Monotonic id source owned by one browsing session. It survives cache
/// resets so ids stay unique for the whole session.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> UserId {
        self.next += 1;
        UserId(self.next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub requested_offset: usize,
    pub reported_total: usize,
    pub returned_count: usize,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended { returned: usize },
    DuplicateOffset,
}

#[derive(Debug, Default)]
pub struct PageCache {
    pages: Vec<CachedPage>,
    ids: IdAllocator,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites every record id before storing the page. A page whose
    /// offset is already cached is ignored.
    pub fn append(&mut self, page: Page) -> AppendOutcome {
        if self.contains_offset(page.requested_offset) {
            trace!(offset = page.requested_offset, "duplicate page ignored");
            return AppendOutcome::DuplicateOffset;
        }

        trace!(
            offset = page.requested_offset,
            fetched_at = %page.fetched_at,
            empty = page.is_empty(),
            "caching page"
        );
        let users: Vec<User> = page
            .records
            .into_iter()
            .map(|remote| User::from_remote(self.ids.next_id(), remote))
            .collect();
        let returned = users.len();
        self.pages.push(CachedPage {
            requested_offset: page.requested_offset,
            reported_total: page.reported_total,
            returned_count: returned,
            users,
        });
        AppendOutcome::Appended { returned }
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        self.pages.iter().any(|page| page.requested_offset == offset)
    }

    pub fn flatten(&self) -> impl Iterator<Item = &User> + '_ {
        self.pages.iter().flat_map(|page| page.users.iter())
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.flatten().find(|user| user.id == id)
    }

    pub fn reset(&mut self) {
        debug!(pages = self.page_count(), "page cache reset");
        self.pages.clear();
    }

    pub fn total_records_loaded(&self) -> usize {
        self.pages.iter().map(|page| page.returned_count).sum()
    }

    pub fn reported_total(&self) -> usize {
        self.pages.last().map_or(0, |page| page.reported_total)
    }

    pub fn last_page(&self) -> Option<&CachedPage> {
        self.pages.last()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
