use crate::usecase::services::page_cache::PageCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    CapReached,
    /// The last page came back empty.
    Exhausted,
    /// The source reports nothing to cycle through, or cycling is disabled.
    NoProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Next {
        logical: usize,
        remote: usize,
        limit: usize,
    },
    Stop(StopReason),
}

impl Cursor {
    pub fn is_stop(self) -> bool {
        matches!(self, Cursor::Stop(_))
    }

    pub fn remote_offset(self) -> Option<usize> {
        match self {
            Cursor::Next { remote, .. } => Some(remote),
            Cursor::Stop(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPolicy {
    pub page_size: usize,
    pub cap: usize,
    /// Re-request already seen remote offsets once the source's total is
    /// exhausted, until the cap is reached.
    pub cycle_past_total: bool,
}

impl CursorPolicy {
    pub fn new(page_size: usize, cap: usize, cycle_past_total: bool) -> Self {
        Self {
            page_size: page_size.max(1),
            cap,
            cycle_past_total,
        }
    }

    pub fn next(&self, cache: &PageCache) -> Cursor {
        let loaded = cache.total_records_loaded();
        if loaded >= self.cap {
            return Cursor::Stop(StopReason::CapReached);
        }

        let Some(last) = cache.last_page() else {
            return self.at(0, 0);
        };
        if last.returned_count == 0 {
            return Cursor::Stop(StopReason::Exhausted);
        }

        let total = cache.reported_total();
        if loaded < total {
            return self.at(loaded, loaded);
        }
        if total == 0 || !self.cycle_past_total {
            return Cursor::Stop(StopReason::NoProgress);
        }
        self.at(loaded, loaded % total)
    }

    fn at(&self, logical: usize, remote: usize) -> Cursor {
        let limit = self.page_size.min(self.cap - logical);
        Cursor::Next {
            logical,
            remote,
            limit,
        }
    }
}
