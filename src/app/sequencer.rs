//! Request sequencing for out-of-order search responses.
//!
//! Every search call gets a monotonically increasing [`RequestId`]. Only the
//! most recently *issued* id is accepted when a response comes back; a slow
//! response to an older query is dropped even if it arrives last.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier attached to a search request and echoed by its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tracks the one request whose response may still be applied.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    next_id: u64,
    in_flight: Option<RequestId>,
}

impl RequestSequencer {
    /// Issues a new id, superseding whatever was in flight.
    pub fn issue(&mut self) -> RequestId {
        self.next_id = self.next_id.saturating_add(1);
        let id = RequestId(self.next_id);
        if let Some(previous) = self.in_flight.replace(id) {
            tracing::trace!(superseded = %previous, issued = %id, "search request superseded");
        }
        id
    }

    /// Accepts the response for `id` if it belongs to the latest request.
    ///
    /// Accepting releases the in-flight slot, so a duplicate response for the
    /// same id is rejected.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if self.in_flight == Some(id) {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(response = %id, in_flight = ?self.in_flight, "discarding stale search response");
            false
        }
    }

    /// Makes every outstanding response stale.
    pub fn invalidate(&mut self) {
        self.in_flight = None;
    }

    /// The request currently awaiting a response.
    #[must_use]
    pub const fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_monotonically() {
        let mut sequencer = RequestSequencer::default();
        let a = sequencer.issue();
        let b = sequencer.issue();
        assert!(b > a);
        assert_eq!(sequencer.in_flight(), Some(b));
    }

    #[test]
    fn last_request_wins_regardless_of_arrival_order() {
        let mut sequencer = RequestSequencer::default();
        let a = sequencer.issue();
        let b = sequencer.issue();

        assert!(sequencer.accept(b));
        assert!(!sequencer.accept(a));
    }

    #[test]
    fn duplicate_and_invalidated_responses_are_rejected() {
        let mut sequencer = RequestSequencer::default();
        let a = sequencer.issue();
        assert!(sequencer.accept(a));
        assert!(!sequencer.accept(a));

        let b = sequencer.issue();
        sequencer.invalidate();
        assert!(!sequencer.accept(b));
        assert_eq!(sequencer.in_flight(), None);
    }
}
