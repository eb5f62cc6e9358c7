use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

#[derive(Debug)]
struct Pending<T> {
    ticket: DebounceTicket,
    value: T,
    deadline: Instant,
}

/// Cancellable delayed task: each `push` supersedes the previous value and
/// restarts the delay. Only the latest ticket can fire.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) -> DebounceTicket {
        self.generation += 1;
        let ticket = DebounceTicket(self.generation);
        self.pending = Some(Pending {
            ticket,
            value,
            deadline: now + self.delay,
        });
        ticket
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn fire(&mut self, ticket: DebounceTicket, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket && pending.deadline <= now => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Applies the pending value immediately, e.g. on form submit.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
