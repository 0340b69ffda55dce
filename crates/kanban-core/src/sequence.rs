//! Request Sequencing
//!
//! Each remote call is tagged with a monotonically increasing number per
//! resource key. A response may only be applied while its ticket is still
//! the latest one issued for that key. Numbers come from one counter shared
//! by all keys, so a settled key can be dropped without reusing numbers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct SequencerState {
    next: u64,
    latest: HashMap<String, u64>,
}

/// Shared handle; clones observe the same counters
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    state: Arc<Mutex<SequencerState>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    key: String,
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Issue a ticket, superseding every earlier ticket for `key`
    pub fn issue(&self, key: impl Into<String>) -> RequestTicket {
        let key = key.into();
        let mut state = self.state();
        state.next += 1;
        let seq = state.next;
        state.latest.insert(key.clone(), seq);
        RequestTicket { key, seq }
    }

    /// Settle a finished call. True when `ticket` is still the latest for
    /// its key; the key is then forgotten, so any older ticket still in
    /// flight stays stale.
    pub fn settle(&self, ticket: &RequestTicket) -> bool {
        let mut state = self.state();
        if state.latest.get(&ticket.key) != Some(&ticket.seq) {
            return false;
        }
        state.latest.remove(&ticket.key);
        true
    }

    /// Keys with a call in flight
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.state().latest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue("board");
        let second = sequencer.issue("board");
        assert!(!sequencer.settle(&first));
        assert!(sequencer.settle(&second));
        assert!(second.seq() > first.seq());
    }

    #[test]
    fn test_keys_are_independent() {
        let sequencer = RequestSequencer::new();
        let board = sequencer.issue("board");
        let card = sequencer.issue("card:t1");
        sequencer.issue("card:t2");
        assert!(sequencer.settle(&board));
        assert!(sequencer.settle(&card));
        assert_eq!(sequencer.pending(), 1);
    }

    #[test]
    fn test_settled_keys_are_forgotten() {
        let sequencer = RequestSequencer::new();
        for id in 0..50 {
            let ticket = sequencer.issue(format!("card:t{}", id));
            assert!(sequencer.settle(&ticket));
        }
        assert_eq!(sequencer.pending(), 0);
    }

    #[test]
    fn test_ticket_settles_once() {
        let sequencer = RequestSequencer::new();
        let ticket = sequencer.issue("card:t1");
        assert!(sequencer.settle(&ticket));
        assert!(!sequencer.settle(&ticket));
    }

    #[test]
    fn test_older_ticket_stays_stale_after_newer_settles() {
        let sequencer = RequestSequencer::new();
        let older = sequencer.issue("card:t1");
        let newer = sequencer.issue("card:t1");
        assert!(sequencer.settle(&newer));
        assert!(!sequencer.settle(&older));

        // A fresh ticket for the same key never collides with the old one
        let fresh = sequencer.issue("card:t1");
        assert!(!sequencer.settle(&older));
        assert!(sequencer.settle(&fresh));
    }

    #[test]
    fn test_clones_share_state() {
        let sequencer = RequestSequencer::new();
        let ticket = sequencer.issue("board");
        sequencer.clone().issue("board");
        assert!(!sequencer.settle(&ticket));
    }
}
