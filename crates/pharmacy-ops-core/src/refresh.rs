//! Latest-wins policy for overlapping fetches of the same resource.
//!
//! Every fetch takes a ticket before it starts. When its response arrives
//! the ticket is offered back; responses older than the last one applied
//! are dropped.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Generation number of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(self) -> u64 {
        self.0
    }

    /// Rebuild a ticket handed out across the FFI boundary.
    pub(crate) fn from_generation(generation: u64) -> Self {
        Self(generation)
    }
}

/// Tracks issued and applied fetches for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshTracker {
    issued: u64,
    applied: u64,
}

impl RefreshTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch.
    pub fn issue(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Whether a response may be applied. Accepting a ticket marks it as
    /// the latest applied one. Tickets this tracker never issued are
    /// refused.
    pub fn accept(&mut self, ticket: RefreshTicket) -> bool {
        if ticket.0 > self.issued {
            warn!(ticket = ticket.0, issued = self.issued, "discarding response for unknown ticket");
            return false;
        }
        if ticket.0 <= self.applied {
            warn!(
                ticket = ticket.0,
                applied = self.applied,
                "discarding stale response"
            );
            return false;
        }
        self.applied = ticket.0;
        true
    }

    /// Whether any fetch issued after the last applied one is outstanding.
    pub fn is_pending(&self) -> bool {
        self.issued > self.applied
    }
}

/// A collection that is replaced wholesale by accepted fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot<T> {
    items: Vec<T>,
    tracker: RefreshTracker,
}

impl<T> Default for InventorySnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            tracker: RefreshTracker::default(),
        }
    }
}

impl<T> InventorySnapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn issue(&mut self) -> RefreshTicket {
        self.tracker.issue()
    }

    /// Replace the collection if the ticket is still current.
    pub fn apply(&mut self, ticket: RefreshTicket, items: Vec<T>) -> bool {
        if !self.tracker.accept(ticket) {
            return false;
        }
        self.items = items;
        true
    }

    /// Replace the collection outside of any fetch. Responses to fetches
    /// issued before this call are discarded.
    pub fn replace(&mut self, items: Vec<T>) {
        let ticket = self.tracker.issue();
        self.tracker.accept(ticket);
        self.items = items;
    }

    pub fn is_pending(&self) -> bool {
        self.tracker.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_responses() {
        let mut tracker = RefreshTracker::new();
        let first = tracker.issue();
        assert!(tracker.is_pending());
        assert!(tracker.accept(first));
        assert!(!tracker.is_pending());

        let second = tracker.issue();
        assert!(tracker.accept(second));
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut tracker = RefreshTracker::new();
        let old = tracker.issue();
        let new = tracker.issue();

        assert!(tracker.accept(new));
        assert!(!tracker.accept(old));
        // Same ticket twice
        assert!(!tracker.accept(new));
    }

    #[test]
    fn test_unissued_ticket_refused() {
        let mut tracker = RefreshTracker::new();
        assert!(!tracker.accept(RefreshTicket::from_generation(u64::MAX)));
        assert!(!tracker.accept(RefreshTicket::from_generation(1)));

        let real = tracker.issue();
        assert!(!tracker.accept(RefreshTicket::from_generation(real.generation() + 1)));
        assert!(tracker.accept(real));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_older_response_first_still_applies() {
        let mut tracker = RefreshTracker::new();
        let old = tracker.issue();
        let new = tracker.issue();

        assert!(tracker.accept(old));
        assert!(tracker.is_pending());
        assert!(tracker.accept(new));
    }

    #[test]
    fn test_snapshot_replaces_wholesale() {
        let mut snapshot = InventorySnapshot::new();
        let t1 = snapshot.issue();
        let t2 = snapshot.issue();

        assert!(snapshot.apply(t2, vec![1, 2, 3]));
        assert!(!snapshot.apply(t1, vec![9]));
        assert_eq!(snapshot.items(), &[1, 2, 3]);

        let t3 = snapshot.issue();
        snapshot.replace(vec![4]);
        assert!(!snapshot.apply(t3, vec![5]));
        assert_eq!(snapshot.items(), &[4]);
    }
}
