//! Query debouncing on top of uncancellable host timers.
//!
//! Zellij timers (`set_timeout`) carry no identity and cannot be cancelled, so
//! the debouncer models the pending search as an owned *ticket*:
//!
//! - [`Debouncer::schedule`] retires the live ticket, issues a new one and asks
//!   the host to arm one timer for it;
//! - host timers of equal duration fire in arming order, so each timer event
//!   retires the oldest armed ticket ([`Debouncer::on_timer`]);
//! - only the live ticket fires; every superseded or cancelled ticket is inert.
//!
//! At most one ticket is live at any time.

use std::collections::VecDeque;
use std::time::Duration;

/// Quiet period between the last keystroke and the search call.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Identifier of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Owner of the single pending debounce timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    next_ticket: u64,
    /// Host timers in flight, oldest first.
    armed: VecDeque<Ticket>,
    /// The only ticket allowed to fire.
    live: Option<Ticket>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: 0,
            armed: VecDeque::new(),
            live: None,
        }
    }

    /// Delay the host must wait before delivering the timer event.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending timer with a fresh one.
    ///
    /// Returns the new ticket; the caller must arm exactly one host timer of
    /// [`delay`](Self::delay) for it.
    pub fn schedule(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(previous) = self.live.replace(ticket) {
            tracing::trace!(superseded = previous.0, "debounce timer superseded");
        }
        self.armed.push_back(ticket);
        ticket
    }

    /// Drops the live ticket, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.live.take().is_some()
    }

    /// Handles one host timer event.
    ///
    /// Returns `true` exactly when the timer belongs to the live ticket; the
    /// ticket is released in that case. Timers without an armed ticket (for
    /// example from another source) are ignored.
    pub fn on_timer(&mut self) -> bool {
        let Some(fired) = self.armed.pop_front() else {
            tracing::trace!("timer event without an armed debounce ticket");
            return false;
        };

        if self.live == Some(fired) {
            self.live = None;
            true
        } else {
            false
        }
    }

    /// Whether a search is waiting for its quiet period to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.live.is_some()
    }

    /// Number of host timers still expected to fire.
    #[must_use]
    pub fn armed_timers(&self) -> usize {
        self.armed.len()
    }
}
