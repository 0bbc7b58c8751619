//! Two-phase optimistic values.
//!
//! The UI shows the proposed value immediately, marks it pending while the
//! request runs, and either commits it or rolls back to the last confirmed
//! value. Only one proposal may be in flight at a time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Committed,
    Pending,
    /// The last proposal was rejected and rolled back.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Optimistic<T> {
    confirmed: T,
    shown: T,
    phase: Phase,
}

impl<T: Clone + PartialEq> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            confirmed: value.clone(),
            shown: value,
            phase: Phase::Committed,
        }
    }

    /// The value to render.
    pub fn value(&self) -> &T {
        &self.shown
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Show `next` right away. Refused while another proposal is pending.
    pub fn propose(&mut self, next: T) -> bool {
        if self.is_pending() {
            return false;
        }
        self.shown = next;
        self.phase = Phase::Pending;
        true
    }

    pub fn commit(&mut self) {
        self.confirmed = self.shown.clone();
        self.phase = Phase::Committed;
    }

    pub fn roll_back(&mut self) {
        self.shown = self.confirmed.clone();
        self.phase = Phase::Failed;
    }

    /// Commit on `Ok`, roll back on `Err`.
    pub fn settle<E>(&mut self, result: &Result<(), E>) {
        match result {
            Ok(()) => self.commit(),
            Err(_) => self.roll_back(),
        }
    }

    /// Adopt a fresh server value, unless a proposal is still in flight.
    pub fn refresh(&mut self, value: T) {
        if self.is_pending() {
            return;
        }
        self.confirmed = value.clone();
        self.shown = value;
        self.phase = Phase::Committed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit() {
        let mut v = Optimistic::new(false);
        assert!(v.propose(true));
        assert!(*v.value());
        assert!(!*v.confirmed());
        assert!(v.is_pending());

        v.settle::<()>(&Ok(()));
        assert!(*v.value());
        assert!(*v.confirmed());
        assert_eq!(v.phase(), Phase::Committed);
    }

    #[test]
    fn test_rollback() {
        let mut v = Optimistic::new(3);
        v.propose(4);
        v.settle(&Err("offline"));
        assert_eq!(*v.value(), 3);
        assert_eq!(v.phase(), Phase::Failed);
    }

    #[test]
    fn test_single_flight() {
        let mut v = Optimistic::new(false);
        assert!(v.propose(true));
        assert!(!v.propose(false));
        assert!(*v.value());
    }

    #[test]
    fn test_refresh_ignored_while_pending() {
        let mut v = Optimistic::new(false);
        v.propose(true);
        v.refresh(false);
        assert!(*v.value());
        v.commit();
        v.refresh(false);
        assert!(!*v.value());
    }
}
