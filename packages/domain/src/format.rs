//! # Policy display formatting
//!
//! Backend policy records come straight out of a PDF guidebook: titles carry
//! page counters like `(1)`, descriptions are long and unstructured, and the
//! category is often missing. [`PolicyDisplay::from_policy`] derives
//! everything a card shows.
//!
//! | Derived | Rule |
//! |---------|------|
//! | title | drop `(<digits>)` groups and the whitespace around them, trim |
//! | category | first matching keyword rule on the title, else the record's category, else [`DEFAULT_CATEGORY`] |
//! | icon | fixed table by category, else [`DEFAULT_ICON`] |
//! | summary | first two sentences, cut to [`SUMMARY_LIMIT`] chars + `...` |
//! | key info | see [`crate::extract`] |

use std::sync::LazyLock;

use api::Policy;
use regex::Regex;

use crate::extract::{extract, Extraction};

pub const DEFAULT_CATEGORY: &str = "일반 정책";
pub const DEFAULT_ICON: &str = "📋";
pub const SUMMARY_LIMIT: usize = 80;
pub const ELLIPSIS: &str = "...";

static NUMERIC_GROUP: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\s*\(\s*\d+\s*\)\s*"));
static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\s+"));

/// Keyword rules in priority order. The first pattern found in the title
/// decides the category.
const CATEGORY_RULES: &[(&str, &str)] = &[
    ("청년|대학생|청소년|졸업", "청년 지원"),
    ("중장년|고령|노인|신중년|시니어|장년", "중장년 지원"),
    ("장애", "장애인 지원"),
    ("여성|경력단절|육아|출산|모성|임신", "여성·가족 지원"),
    ("외국인|이주|다문화", "외국인 지원"),
    ("창업", "창업 지원"),
    ("훈련|교육|내일배움|자격|직업능력", "직업훈련"),
    ("실업|구직급여", "실업급여"),
    ("취업|일자리|구직|채용|고용촉진", "취업 지원"),
    ("고용유지|고용안정|장려금|지원금", "고용안정"),
    ("임금|근로|산재|노동|안전|체불", "근로자 보호"),
];

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("청년 지원", "👨‍🎓"),
    ("중장년 지원", "👴"),
    ("장애인 지원", "♿"),
    ("여성·가족 지원", "👩‍👧"),
    ("외국인 지원", "🌏"),
    ("창업 지원", "🚀"),
    ("직업훈련", "📚"),
    ("실업급여", "💰"),
    ("취업 지원", "💼"),
    ("고용안정", "🏢"),
    ("근로자 보호", "🛡️"),
    (DEFAULT_CATEGORY, DEFAULT_ICON),
];

static CATEGORY_MATCHERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CATEGORY_RULES
        .iter()
        .filter_map(|(pattern, category)| compile(pattern).map(|re| (re, *category)))
        .collect()
});

/// Compile a built-in pattern. A broken pattern disables its rule instead of
/// taking the UI down.
pub(crate) fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("Invalid built-in pattern {pattern:?}: {e}");
            None
        }
    }
}

pub fn clean_title(title: &str) -> String {
    match NUMERIC_GROUP.as_ref() {
        Some(re) => re.replace_all(title, "").trim().to_string(),
        None => title.trim().to_string(),
    }
}

pub fn infer_category(title: &str, fallback: Option<&str>) -> String {
    let title = clean_title(title);
    if let Some((_, category)) = CATEGORY_MATCHERS.iter().find(|(re, _)| re.is_match(&title)) {
        return category.to_string();
    }
    fallback
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

pub fn category_icon(category: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    match WHITESPACE.as_ref() {
        Some(re) => re.replace_all(text.trim(), " ").into_owned(),
        None => text.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Split after `.`, `!`, `?` or `。` when followed by whitespace or the end.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?' | '。') {
            continue;
        }
        let at_break = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_break {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// Cut to `limit` characters and append [`ELLIPSIS`] when longer.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str(ELLIPSIS);
    cut
}

pub fn summarize(description: &str) -> String {
    let text = collapse_whitespace(description);
    let lead = sentences(&text).into_iter().take(2).collect::<Vec<_>>().join(" ");
    truncate_chars(&lead, SUMMARY_LIMIT)
}

/// Everything a policy card renders, derived once per record.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDisplay {
    pub title: String,
    pub category: String,
    pub icon: &'static str,
    pub summary: String,
    pub key_info: Extraction,
}

impl PolicyDisplay {
    pub fn from_policy(policy: &Policy) -> Self {
        let category = infer_category(&policy.title, policy.category.as_deref());
        Self {
            title: clean_title(&policy.title),
            icon: category_icon(&category),
            category,
            summary: summarize(&policy.content),
            key_info: extract(&policy.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_numeric_groups() {
        assert_eq!(clean_title("정책(1) (2)안내"), "정책안내");
        assert_eq!(clean_title("  청년 도약 계좌 (12) "), "청년 도약 계좌");
        // Non-numeric groups stay.
        assert_eq!(clean_title("고용보험(실업급여)"), "고용보험(실업급여)");
    }

    #[test]
    fn test_category_first_rule_wins() {
        assert_eq!(infer_category("청년 일자리 도약 장려금", None), "청년 지원");
        assert_eq!(category_icon("청년 지원"), "👨‍🎓");
        assert_eq!(infer_category("신중년 경력형 일자리", None), "중장년 지원");
    }

    #[test]
    fn test_category_fallbacks() {
        assert_eq!(infer_category("무엇인가", Some("복지")), "복지");
        assert_eq!(infer_category("무엇인가", Some("  ")), DEFAULT_CATEGORY);
        assert_eq!(infer_category("무엇인가", None), DEFAULT_CATEGORY);
        assert_eq!(category_icon("복지"), DEFAULT_ICON);
        assert_eq!(category_icon(DEFAULT_CATEGORY), DEFAULT_ICON);
    }

    #[test]
    fn test_sentences() {
        assert_eq!(
            sentences("첫 문장입니다. 둘째! 셋째? 끝"),
            vec!["첫 문장입니다.", "둘째!", "셋째?", "끝"]
        );
        // Decimal points are not sentence breaks.
        assert_eq!(sentences("월 1.5배 지원."), vec!["월 1.5배 지원."]);
    }

    #[test]
    fn test_summary_two_sentences_truncated() {
        let description = "청년층의 안정적인 일자리 진입을 돕기 위해 중소기업이 청년을 정규직으로 채용하면 인건비를 지원합니다. \
             기업당 최대 30명까지 1인당 연 960만원을 2년간 지원합니다.   세 번째 문장은 요약에 들어가지 않습니다.";
        let lead = "청년층의 안정적인 일자리 진입을 돕기 위해 중소기업이 청년을 정규직으로 채용하면 인건비를 지원합니다. \
             기업당 최대 30명까지 1인당 연 960만원을 2년간 지원합니다.";
        assert!(lead.chars().count() > SUMMARY_LIMIT);

        let summary = summarize(description);
        let expected: String = lead.chars().take(SUMMARY_LIMIT).collect();
        assert_eq!(summary, format!("{expected}..."));
        assert_eq!(summary.chars().count(), SUMMARY_LIMIT + 3);
    }

    #[test]
    fn test_summary_short_untouched() {
        assert_eq!(summarize("짧은   설명입니다.\n둘째 문장."), "짧은 설명입니다. 둘째 문장.");
        assert_eq!(summarize(""), "");
    }

    #[test]
    fn test_display_from_policy() {
        let policy = Policy {
            id: "7".into(),
            title: "청년내일채움공제 (3)".into(),
            content: "청년의 자산 형성을 지원합니다.".into(),
            ..Policy::default()
        };
        let display = PolicyDisplay::from_policy(&policy);
        assert_eq!(display.title, "청년내일채움공제");
        assert_eq!(display.category, "청년 지원");
        assert_eq!(display.icon, "👨‍🎓");
        assert_eq!(display.summary, "청년의 자산 형성을 지원합니다.");
    }
}
