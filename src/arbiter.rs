//! Latest-request-wins arbitration.
//!
//! Every read or request is issued a monotonically increasing [`RequestId`].
//! A completion is only applied if its id is newer than the last one applied,
//! so a slow, older response can never overwrite a newer result.

use std::cell::Cell;

/// Ticket identifying one in-flight read or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request ids and decides which completions may be displayed.
#[derive(Debug, Default)]
pub struct RequestArbiter {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl RequestArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id.
    pub fn issue(&self) -> RequestId {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        RequestId(next)
    }

    /// Record `id` as displayed if nothing newer has been displayed yet.
    /// Returns false when the completion is stale and must be dropped.
    pub fn try_apply(&self, id: RequestId) -> bool {
        if id.0 > self.applied.get() {
            self.applied.set(id.0);
            true
        } else {
            false
        }
    }

    /// Whether a newer (or the same) completion has already been displayed.
    pub fn is_superseded(&self, id: RequestId) -> bool {
        id.0 <= self.applied.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let arbiter = RequestArbiter::new();
        let a = arbiter.issue();
        let b = arbiter.issue();
        assert!(b > a);
        assert_eq!(a.to_string(), "#1");
        assert_eq!(b.to_string(), "#2");
    }

    #[test]
    fn test_in_order_completions_all_apply() {
        let arbiter = RequestArbiter::new();
        let a = arbiter.issue();
        let b = arbiter.issue();
        assert!(arbiter.try_apply(a));
        assert!(arbiter.try_apply(b));
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let arbiter = RequestArbiter::new();
        let older = arbiter.issue();
        let newer = arbiter.issue();

        assert!(arbiter.try_apply(newer));
        assert!(arbiter.is_superseded(older));
        assert!(!arbiter.try_apply(older));
    }

    #[test]
    fn test_pending_request_is_not_superseded() {
        let arbiter = RequestArbiter::new();
        let first = arbiter.issue();
        let second = arbiter.issue();
        assert!(arbiter.try_apply(first));
        assert!(!arbiter.is_superseded(second));
    }
}
