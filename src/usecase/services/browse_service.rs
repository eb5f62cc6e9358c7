use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::entities::config::EngineConfig;
use crate::domain::entities::filter::FilterState;
use crate::domain::entities::page::{Page, PageRequest};
use crate::domain::entities::user::{User, UserId};
use crate::usecase::ports::source::TransportError;
use crate::usecase::services::cursor_policy::{Cursor, CursorPolicy};
use crate::usecase::services::filter_engine::{
    extend_visible, has_residual_work, materialize, split,
};
use crate::usecase::services::page_cache::{AppendOutcome, PageCache};
use crate::usecase::services::page_fetcher::PageFetcher;
use crate::usecase::services::scheduler::{
    AutoAdvanceScheduler, Completion, FetchTicket, Observation, SchedulerState,
};

/// One fetch handed to the driver. The driver runs it and reports back
/// through [`BrowseSession::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    pub ticket: FetchTicket,
    pub request: PageRequest,
}

impl FetchJob {
    pub fn run(&self, fetcher: &PageFetcher) -> Result<Page, TransportError> {
        fetcher.fetch(&self.request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied { returned: usize },
    /// The result belonged to a superseded filter session.
    Discarded,
    Failed(TransportError),
}

/// State behind the directory browser: filter, cache, scheduler, selection
/// and focus for one user session.
#[derive(Debug)]
pub struct BrowseSession {
    policy: CursorPolicy,
    filter: FilterState,
    cache: PageCache,
    scheduler: AutoAdvanceScheduler,
    visible: Vec<User>,
    selection: BTreeSet<UserId>,
    focused: Option<User>,
    last_error: Option<TransportError>,
    closed: bool,
}

impl BrowseSession {
    pub fn new(config: &EngineConfig, filter: FilterState) -> Self {
        Self {
            policy: CursorPolicy::new(
                config.page_size,
                config.max_records,
                config.cycle_past_total,
            ),
            filter,
            cache: PageCache::new(),
            scheduler: AutoAdvanceScheduler::new(
                config.auto_advance_delay(),
                config.low_water_mark,
            ),
            visible: Vec::new(),
            selection: BTreeSet::new(),
            focused: None,
            last_error: None,
            closed: false,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible_records(&self) -> &[User] {
        &self.visible
    }

    pub fn total_loaded(&self) -> usize {
        self.cache.total_records_loaded()
    }

    pub fn reported_total(&self) -> usize {
        self.cache.reported_total()
    }

    pub fn is_fetching(&self) -> bool {
        self.scheduler.is_fetching()
    }

    pub fn has_more(&self) -> bool {
        self.last_error.is_none() && !self.cursor().is_stop()
    }

    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn cursor(&self) -> Cursor {
        self.policy.next(&self.cache)
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        if self.closed {
            return None;
        }
        self.scheduler.next_deadline()
    }

    /// A new identity starts an empty session; an age-range-only change just
    /// re-filters what is cached.
    pub fn on_filter_change(&mut self, next: FilterState, now: Instant) {
        if next == self.filter {
            return;
        }
        if next.identity != self.filter.identity {
            info!(
                query = %next.identity.search_query,
                search_type = next.identity.search_type.token(),
                gender = %next.identity.gender,
                "filter identity changed"
            );
            self.cache.reset();
            self.scheduler.reset();
            self.selection.clear();
            self.last_error = None;
        }
        self.filter = next;
        self.rematerialize();
        self.advance(now);
    }

    /// Safe to call at any time; ignored while fetching or stopped.
    pub fn on_request_more(&mut self, now: Instant) {
        if self.closed {
            return;
        }
        let cursor = self.cursor();
        self.scheduler.request(cursor, now);
    }

    pub fn retry(&mut self, now: Instant) -> bool {
        if self.closed || !self.scheduler.retry() {
            return false;
        }
        debug!("retrying after transport failure");
        self.last_error = None;
        let cursor = self.cursor();
        self.scheduler.request(cursor, now);
        true
    }

    pub fn poll(&mut self, now: Instant) -> Option<FetchJob> {
        if self.closed {
            return None;
        }
        self.advance(now);
        let ticket = self.scheduler.take_due(now)?;
        let (criteria, _) = split(&self.filter);
        Some(FetchJob {
            ticket,
            request: PageRequest {
                logical_offset: ticket.logical_offset,
                remote_offset: ticket.remote_offset,
                limit: ticket.limit,
                criteria,
            },
        })
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page, TransportError>,
        now: Instant,
    ) -> Outcome {
        let succeeded = result.is_ok();
        if self.scheduler.complete(ticket, succeeded) == Completion::Stale {
            debug!(session = ticket.session, "stale fetch result discarded");
            return Outcome::Discarded;
        }

        let outcome = match result {
            Ok(page) => match self.cache.append(page) {
                AppendOutcome::Appended { returned } => {
                    self.last_error = None;
                    if let Some(page) = self.cache.last_page() {
                        extend_visible(&mut self.visible, page, &self.filter);
                    }
                    Outcome::Applied { returned }
                }
                AppendOutcome::DuplicateOffset => Outcome::Discarded,
            },
            Err(err) => {
                warn!(%err, "fetch failed, session stopped");
                self.last_error = Some(err.clone());
                Outcome::Failed(err)
            }
        };
        self.advance(now);
        outcome
    }

    /// Drops pending work; later completions are discarded and nothing new
    /// is scheduled.
    pub fn teardown(&mut self) {
        self.scheduler.reset();
        self.closed = true;
    }

    pub fn toggle_selected(&mut self, id: UserId) -> bool {
        if self.selection.remove(&id) {
            false
        } else {
            self.selection.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected users in cache order.
    pub fn selected_records(&self) -> Vec<User> {
        self.cache
            .flatten()
            .filter(|user| self.selection.contains(&user.id))
            .cloned()
            .collect()
    }

    pub fn focus(&mut self, id: UserId) -> bool {
        match self.cache.find(id) {
            Some(user) => {
                self.focused = Some(user.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Snapshot taken when focused; may no longer be in the cache.
    pub fn focused(&self) -> Option<&User> {
        self.focused.as_ref()
    }

    fn rematerialize(&mut self) {
        self.visible = materialize(&self.cache, &self.filter);
    }

    fn advance(&mut self, now: Instant) {
        if self.closed {
            return;
        }
        let observation = Observation {
            cursor: self.cursor(),
            loaded: self.cache.total_records_loaded(),
            visible: self.visible.len(),
            residual_active: has_residual_work(&self.filter),
        };
        self.scheduler.evaluate(observation, now);
    }
}
