use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::usecase::services::cursor_policy::{Cursor, StopReason};

/// Identifies one dispatched fetch. A completion whose ticket is not the
/// scheduler's current one belongs to a superseded session and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub session: u64,
    pub logical_offset: usize,
    pub remote_offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    Cursor(StopReason),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Fetching {
        ticket: FetchTicket,
        due: Instant,
        dispatched: bool,
    },
    Stopped(Halt),
}

/// What the scheduler looks at when deciding whether to keep fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub cursor: Cursor,
    pub loaded: usize,
    pub visible: usize,
    pub residual_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Accepted,
    Stale,
}

#[derive(Debug)]
pub struct AutoAdvanceScheduler {
    delay: Duration,
    low_water_mark: usize,
    session: u64,
    state: SchedulerState,
}

impl AutoAdvanceScheduler {
    pub fn new(delay: Duration, low_water_mark: usize) -> Self {
        Self {
            delay,
            low_water_mark,
            session: 0,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, SchedulerState::Fetching { .. })
    }

    /// Starts a new session. Any pending or in-flight ticket becomes stale.
    pub fn reset(&mut self) {
        self.session += 1;
        self.state = SchedulerState::Idle;
        debug!(session = self.session, "scheduler reset");
    }

    /// Background advance. Only acts while idle.
    pub fn evaluate(&mut self, observation: Observation, now: Instant) {
        if self.state != SchedulerState::Idle {
            return;
        }
        let Cursor::Next { .. } = observation.cursor else {
            self.stop_on(observation.cursor);
            return;
        };

        // The first page of a session is always fetched.
        let first_page = observation.loaded == 0;
        let below_low_water =
            !observation.residual_active && observation.loaded < self.low_water_mark;
        if first_page || observation.visible > 0 || below_low_water {
            self.schedule(observation.cursor, now + self.delay);
        } else {
            trace!(
                loaded = observation.loaded,
                "auto-advance paused until more is requested"
            );
        }
    }

    /// On-demand fetch. Skips the heuristic and the delay; a no-op while a
    /// fetch is in flight or the session is stopped.
    pub fn request(&mut self, cursor: Cursor, now: Instant) {
        match &mut self.state {
            SchedulerState::Idle => {
                if cursor.is_stop() {
                    self.stop_on(cursor);
                } else {
                    self.schedule(cursor, now);
                }
            }
            SchedulerState::Fetching {
                due, dispatched, ..
            } => {
                if !*dispatched && *due > now {
                    *due = now;
                }
            }
            SchedulerState::Stopped(_) => {}
        }
    }

    /// Hands out the pending ticket once its delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<FetchTicket> {
        match &mut self.state {
            SchedulerState::Fetching {
                ticket,
                due,
                dispatched,
            } if !*dispatched && *due <= now => {
                *dispatched = true;
                Some(*ticket)
            }
            _ => None,
        }
    }

    pub fn complete(&mut self, ticket: FetchTicket, succeeded: bool) -> Completion {
        match self.state {
            SchedulerState::Fetching {
                ticket: current,
                dispatched: true,
                ..
            } if current == ticket => {
                self.state = if succeeded {
                    SchedulerState::Idle
                } else {
                    SchedulerState::Stopped(Halt::Failed)
                };
                Completion::Accepted
            }
            _ => Completion::Stale,
        }
    }

    /// Explicit user retry after a transport failure.
    pub fn retry(&mut self) -> bool {
        if self.state == SchedulerState::Stopped(Halt::Failed) {
            self.state = SchedulerState::Idle;
            return true;
        }
        false
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Fetching {
                due,
                dispatched: false,
                ..
            } => Some(due),
            _ => None,
        }
    }

    fn schedule(&mut self, cursor: Cursor, due: Instant) {
        let Cursor::Next {
            logical,
            remote,
            limit,
        } = cursor
        else {
            return;
        };
        let ticket = FetchTicket {
            session: self.session,
            logical_offset: logical,
            remote_offset: remote,
            limit,
        };
        trace!(?ticket, "fetch scheduled");
        self.state = SchedulerState::Fetching {
            ticket,
            due,
            dispatched: false,
        };
    }

    fn stop_on(&mut self, cursor: Cursor) {
        if let Cursor::Stop(reason) = cursor {
            debug!(session = self.session, ?reason, "scheduler stopped");
            self.state = SchedulerState::Stopped(Halt::Cursor(reason));
        }
    }
}
