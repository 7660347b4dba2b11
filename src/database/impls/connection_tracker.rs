use crate::database::structs::connection_tracker::{ConnectionLease, ConnectionTracker};
use std::sync::atomic::Ordering;

impl ConnectionTracker {
    pub fn new() -> ConnectionTracker {
        ConnectionTracker::default()
    }

    pub fn lease(&self) -> ConnectionLease {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionLease { active: self.active.clone() }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for ConnectionLease {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_released_on_drop() {
        let tracker = ConnectionTracker::new();
        let first = tracker.lease();
        let second = tracker.lease();
        assert_eq!(tracker.active(), 2);
        drop(first);
        assert_eq!(tracker.active(), 1);
        drop(second);
        assert_eq!(tracker.active(), 0);
    }

    #[test]
    fn test_clones_share_the_count() {
        let tracker = ConnectionTracker::new();
        let clone = tracker.clone();
        let _lease = clone.lease();
        assert_eq!(tracker.active(), 1);
    }

    #[test]
    fn test_lease_released_on_panic_unwind() {
        let tracker = ConnectionTracker::new();
        let inner = tracker.clone();
        let result = std::panic::catch_unwind(move || {
            let _lease = inner.lease();
            panic!("statement failed");
        });
        assert!(result.is_err());
        assert_eq!(tracker.active(), 0);
    }
}
