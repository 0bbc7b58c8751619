//! Policy records, search parameters and LLM-enhanced summaries.

use serde::{Deserialize, Serialize};

use super::{de_id, de_opt_id};

/// A policy as shown in search results, recommendations and bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, alias = "policy_title")]
    pub title: String,
    /// Free-text body. Older endpoints call it `description` or `policy_content`.
    #[serde(default, alias = "description", alias = "policy_content")]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Page of the source guidebook the policy was extracted from.
    #[serde(
        default,
        alias = "source_page",
        alias = "page_number",
        deserialize_with = "de_opt_id"
    )]
    pub page: Option<String>,
    #[serde(default, alias = "saved")]
    pub is_saved: bool,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
    /// Present when the backend already attached an enhanced summary.
    #[serde(default, alias = "enhanced_info")]
    pub enhanced: Option<EnhancedPolicy>,
}

/// Backend-computed structured summary (`POST /policies/enhance`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedPolicy {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub application_process: String,
}

impl EnhancedPolicy {
    /// True when the backend returned nothing worth showing.
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
            && self.eligibility.iter().all(|s| s.trim().is_empty())
            && self.benefits.iter().all(|s| s.trim().is_empty())
            && self.application_process.trim().is_empty()
    }
}

/// Query parameters of `GET /policies/search`.
///
/// Empty fields mean "any" and are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub q: String,
    pub age: String,
    pub gender: String,
    pub employment: String,
    pub region: String,
}

impl SearchQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        [
            ("q", &self.q),
            ("age", &self.age),
            ("gender", &self.gender),
            ("employment", &self.employment),
            ("region", &self.region),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| (k, v.trim().to_string()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_display_shape() {
        let policy: Policy = serde_json::from_str(
            r#"{"id": "p-12", "title": "청년 일자리 도약 장려금", "content": "본문", "page": 42, "category": null, "is_saved": true}"#,
        )
        .unwrap();
        assert_eq!(policy.id, "p-12");
        assert_eq!(policy.page.as_deref(), Some("42"));
        assert!(policy.category.is_none());
        assert!(policy.is_saved);
        assert!(policy.enhanced.is_none());
    }

    #[test]
    fn test_policy_legacy_shape() {
        let policy: Policy = serde_json::from_str(
            r#"{"id": 3, "title": "실업급여", "description": "구직급여 안내", "source_page": 10}"#,
        )
        .unwrap();
        assert_eq!(policy.id, "3");
        assert_eq!(policy.content, "구직급여 안내");
        assert_eq!(policy.page.as_deref(), Some("10"));
        assert!(!policy.is_saved);
    }

    #[test]
    fn test_recommended_shape() {
        let policy: Policy = serde_json::from_str(
            r#"{"policy_id": "x", "id": "x", "policy_title": "내일배움카드", "policy_content": "훈련비 지원", "relevance_score": 0.82}"#,
        )
        .unwrap();
        assert_eq!(policy.title, "내일배움카드");
        assert_eq!(policy.content, "훈련비 지원");
        assert_eq!(policy.relevance_score, Some(0.82));
    }

    #[test]
    fn test_enhanced_partial_body() {
        let enhanced: EnhancedPolicy =
            serde_json::from_str(r#"{"summary": "요약", "eligibility": ["만 15~34세"]}"#).unwrap();
        assert_eq!(enhanced.summary, "요약");
        assert!(enhanced.benefits.is_empty());
        assert!(!enhanced.is_empty());
        assert!(EnhancedPolicy::default().is_empty());
    }

    #[test]
    fn test_search_params_skip_empty() {
        let query = SearchQuery {
            q: " 청년 ".to_string(),
            region: "seoul".to_string(),
            ..SearchQuery::default()
        };
        assert_eq!(
            query.to_params(),
            vec![("q", "청년".to_string()), ("region", "seoul".to_string())]
        );
        assert!(SearchQuery::default().to_params().is_empty());
    }
}
