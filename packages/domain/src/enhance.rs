//! On-demand enhanced policy info, cached per policy id.
//!
//! A card asks for enhancement when the user expands it. The cache makes the
//! request idempotent: nothing is sent while one is in flight or once a
//! result arrived. Failures are remembered too, so the card falls back to the
//! heuristic extraction until the user explicitly retries.

use std::collections::HashMap;

use api::{ApiError, EnhancedPolicy, Policy, PolicyBackend};

/// Loading indicator frames, advanced by a UI timer.
const ELLIPSIS_FRAMES: [&str; 4] = ["", ".", "..", "..."];

#[derive(Debug, Clone, PartialEq)]
pub enum EnhanceState {
    Pending,
    Ready(EnhancedPolicy),
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnhancementCache {
    entries: HashMap<String, EnhanceState>,
}

impl EnhancementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&EnhanceState> {
        self.entries.get(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        matches!(self.entries.get(id), Some(EnhanceState::Pending))
    }

    /// Use enhancement data that arrived with the policy record itself.
    pub fn seed(&mut self, policy: &Policy) {
        if let Some(enhanced) = policy.enhanced.as_ref().filter(|e| !e.is_empty()) {
            self.entries
                .entry(policy.id.clone())
                .or_insert_with(|| EnhanceState::Ready(enhanced.clone()));
        }
    }

    pub fn seed_all(&mut self, policies: &[Policy]) {
        for policy in policies {
            self.seed(policy);
        }
    }

    /// Mark `id` as in flight. Returns false when a request is pending or
    /// any outcome, including a failure, is already cached.
    pub fn begin(&mut self, id: &str) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), EnhanceState::Pending);
        true
    }

    /// Explicit user retry. Only a cached failure is sent again.
    pub fn retry(&mut self, id: &str) -> bool {
        match self.entries.get(id) {
            Some(EnhanceState::Failed) => {
                self.entries.insert(id.to_string(), EnhanceState::Pending);
                true
            }
            _ => false,
        }
    }

    pub fn finish(&mut self, id: &str, result: Result<EnhancedPolicy, ApiError>) {
        let state = match result {
            Ok(enhanced) if !enhanced.is_empty() => EnhanceState::Ready(enhanced),
            Ok(_) => {
                tracing::debug!("Enhancement for policy {id} came back empty");
                EnhanceState::Failed
            }
            Err(e) => {
                tracing::warn!("Enhancement for policy {id} failed: {e}");
                EnhanceState::Failed
            }
        };
        self.entries.insert(id.to_string(), state);
    }
}

/// Request enhancement for `policy`.
pub async fn fetch<B: PolicyBackend>(backend: &B, policy: &Policy) -> Result<EnhancedPolicy, ApiError> {
    backend.enhance(&policy.id, &policy.content).await
}

pub fn ellipsis_frame(tick: usize) -> &'static str {
    ELLIPSIS_FRAMES[tick % ELLIPSIS_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    fn enhanced() -> EnhancedPolicy {
        EnhancedPolicy {
            summary: "청년 구직자에게 수당을 지급합니다.".into(),
            eligibility: vec!["만 15~34세".into()],
            benefits: vec!["월 50만원".into()],
            application_process: "고용24".into(),
        }
    }

    #[test]
    fn test_begin_is_idempotent() {
        let mut cache = EnhancementCache::new();
        assert!(cache.begin("1"));
        assert!(!cache.begin("1"));
        assert!(cache.is_pending("1"));

        cache.finish("1", Ok(enhanced()));
        assert!(!cache.begin("1"));
        assert_eq!(cache.get("1"), Some(&EnhanceState::Ready(enhanced())));
    }

    #[tokio::test]
    async fn test_failure_cached_then_retryable() {
        // The fake answers with an empty body, which counts as a failure.
        let backend = FakeBackend::default();
        let policy = Policy {
            id: "1".into(),
            ..Policy::default()
        };
        let mut cache = EnhancementCache::new();
        assert!(cache.begin("1"));
        cache.finish("1", fetch(&backend, &policy).await);
        assert_eq!(cache.get("1"), Some(&EnhanceState::Failed));

        assert!(!cache.begin("1"));
        assert!(cache.retry("1"));
        assert!(cache.is_pending("1"));
        assert!(!cache.retry("1"));
        cache.finish("1", Err(ApiError::Network("offline".into())));
        assert_eq!(cache.get("1"), Some(&EnhanceState::Failed));
    }

    #[test]
    fn test_reexpanding_after_failure_sends_nothing() {
        let mut cache = EnhancementCache::new();
        let mut requests = 0;
        for _ in 0..3 {
            if cache.begin("1") {
                requests += 1;
                cache.finish("1", Err(ApiError::Network("offline".into())));
            }
        }
        assert_eq!(requests, 1);
        assert_eq!(cache.get("1"), Some(&EnhanceState::Failed));
    }

    #[test]
    fn test_retry_ignores_ready_and_unknown() {
        let mut cache = EnhancementCache::new();
        assert!(!cache.retry("1"));
        assert!(cache.begin("1"));
        cache.finish("1", Ok(enhanced()));
        assert!(!cache.retry("1"));
    }

    #[test]
    fn test_seed_from_record() {
        let mut cache = EnhancementCache::new();
        cache.seed(&Policy {
            id: "5".into(),
            enhanced: Some(enhanced()),
            ..Policy::default()
        });
        assert!(!cache.begin("5"));
    }

    #[test]
    fn test_seed_all_skips_bare_and_empty_records() {
        let mut cache = EnhancementCache::new();
        cache.seed_all(&[
            Policy {
                id: "1".into(),
                enhanced: Some(enhanced()),
                ..Policy::default()
            },
            Policy {
                id: "2".into(),
                enhanced: Some(EnhancedPolicy::default()),
                ..Policy::default()
            },
            Policy {
                id: "3".into(),
                ..Policy::default()
            },
        ]);
        assert_eq!(cache.get("1"), Some(&EnhanceState::Ready(enhanced())));
        assert!(cache.begin("2"));
        assert!(cache.begin("3"));
    }

    #[test]
    fn test_ellipsis_cycles() {
        let frames: Vec<_> = (0..5).map(ellipsis_frame).collect();
        assert_eq!(frames, vec!["", ".", "..", "...", ""]);
    }
}
