//! One-shot timers for notices and the order confirmation.
//!
//! Each [`TimerKind`] has at most one pending timer. Scheduling a kind again
//! aborts the older timer, and a [`TimerTicket`] from a replaced timer is
//! refused by [`Timers::finish`], so a stale callback that already woke up
//! cannot act. Dropping [`Timers`] aborts everything still pending.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    AddedNotice,
    AlreadyInCartNotice,
    OrderConfirmation,
}

/// Identifies one scheduling of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub kind: TimerKind,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    pending: HashMap<TimerKind, (u64, JoinHandle<()>)>,
    next_generation: u64,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `on_fire` after `delay`, replacing any pending timer of `kind`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, kind: TimerKind, delay: Duration, on_fire: F) -> TimerTicket
    where
        F: FnOnce(TimerTicket) + Send + 'static,
    {
        self.next_generation += 1;
        let ticket = TimerTicket {
            kind,
            generation: self.next_generation,
        };

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(ticket);
        });

        if let Some((_, previous)) = self.pending.insert(kind, (ticket.generation, handle)) {
            previous.abort();
        }
        ticket
    }

    /// Claim a fired timer.
    ///
    /// Returns `true` and forgets the timer if `ticket` is still the current
    /// one for its kind; `false` if it was cancelled or replaced.
    pub fn finish(&mut self, ticket: TimerTicket) -> bool {
        match self.pending.get(&ticket.kind) {
            Some((generation, _)) if *generation == ticket.generation => {
                self.pending.remove(&ticket.kind);
                true
            }
            _ => false,
        }
    }

    /// Cancel the pending timer of `kind`, if any.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.pending.remove(&kind).is_some_and(|(_, handle)| {
            handle.abort();
            true
        })
    }

    pub fn cancel_all(&mut self) {
        for (_, (_, handle)) in self.pending.drain() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
