//! Saved-policy toggles, optimistic per policy id.

use std::collections::HashMap;

use api::{ApiError, Policy, PolicyBackend};

use crate::optimistic::Optimistic;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bookmarks {
    states: HashMap<String, Optimistic<bool>>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the saved flags of a freshly fetched list.
    pub fn observe(&mut self, policies: &[Policy]) {
        for policy in policies {
            self.states
                .entry(policy.id.clone())
                .and_modify(|state| state.refresh(policy.is_saved))
                .or_insert_with(|| Optimistic::new(policy.is_saved));
        }
    }

    /// Shown state; `fallback` for ids never observed.
    pub fn is_saved(&self, id: &str, fallback: bool) -> bool {
        self.states.get(id).map_or(fallback, |s| *s.value())
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.states.get(id).is_some_and(Optimistic::is_pending)
    }

    /// Flip the shown state. Returns the requested value (`true` = save), or
    /// `None` if a toggle for this id is already in flight.
    pub fn begin_toggle(&mut self, id: &str, fallback: bool) -> Option<bool> {
        let state = self
            .states
            .entry(id.to_string())
            .or_insert_with(|| Optimistic::new(fallback));
        let next = !*state.value();
        state.propose(next).then_some(next)
    }

    pub fn settle(&mut self, id: &str, result: &Result<(), ApiError>) {
        if let Some(state) = self.states.get_mut(id) {
            state.settle(result);
        }
    }
}

/// Issue the save or unsave call for a toggle started with
/// [`Bookmarks::begin_toggle`].
pub async fn persist<B: PolicyBackend>(backend: &B, id: &str, save: bool) -> Result<(), ApiError> {
    let result = if save {
        backend.save_policy(id).await
    } else {
        backend.unsave_policy(id).await
    };
    if let Err(e) = &result {
        tracing::warn!("Bookmark update for policy {id} failed: {e}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    fn policy(id: &str, saved: bool) -> Policy {
        Policy {
            id: id.into(),
            is_saved: saved,
            ..Policy::default()
        }
    }

    #[tokio::test]
    async fn test_toggle_commits() {
        let backend = FakeBackend::default();
        let mut marks = Bookmarks::new();
        marks.observe(&[policy("1", false)]);

        let save = marks.begin_toggle("1", false).unwrap();
        assert!(save);
        assert!(marks.is_saved("1", false));
        assert!(marks.is_pending("1"));
        // A second click while pending is ignored.
        assert_eq!(marks.begin_toggle("1", false), None);

        let result = persist(&backend, "1", save).await;
        marks.settle("1", &result);
        assert!(marks.is_saved("1", false));
        assert!(!marks.is_pending("1"));
        assert_eq!(*backend.saved.borrow(), vec!["1".to_string()]);
    }

    #[tokio::test]
    async fn test_toggle_rolls_back() {
        let backend = FakeBackend {
            fail_save: true,
            ..FakeBackend::default()
        };
        let mut marks = Bookmarks::new();
        marks.observe(&[policy("1", true)]);

        let save = marks.begin_toggle("1", true).unwrap();
        assert!(!save);
        assert!(!marks.is_saved("1", true));

        let result = persist(&backend, "1", save).await;
        marks.settle("1", &result);
        assert!(marks.is_saved("1", true));
    }

    #[test]
    fn test_unobserved_uses_fallback() {
        let marks = Bookmarks::new();
        assert!(marks.is_saved("9", true));
        assert!(!marks.is_pending("9"));
    }
}
