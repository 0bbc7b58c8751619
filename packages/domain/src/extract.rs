//! # Key-info extraction
//!
//! Best-effort labels for "who is it for", "what do you get" and "how to
//! apply", pulled out of free policy text by an ordered rule list.
//!
//! 1. [`FIELD_RULES`] run top to bottom; the first rule that matches a field
//!    fills it, later rules for the same field are skipped.
//! 2. No field matched and the text has at least [`MIN_FALLBACK_CHARS`]
//!    characters: the [`PURPOSE_RULES`] are tried the same way.
//! 3. Still nothing and the text looks like a flattened table: point the
//!    reader at the source document.
//! 4. Otherwise abstain. Saying nothing beats a misleading label.

use std::sync::LazyLock;

use regex::Regex;

use crate::format::{collapse_whitespace, compile, truncate_chars};

pub const MIN_FALLBACK_CHARS: usize = 60;
pub const SEE_SOURCE: &str = "상세 내용은 원문 자료를 참고하세요.";
const VALUE_LIMIT: usize = 60;
/// Lines with column-like structure needed before text counts as a table.
const TABULAR_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Target,
    Benefits,
    Process,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Target => "지원대상",
            Field::Benefits => "지원내용",
            Field::Process => "신청방법",
        }
    }
}

/// Ordered (field, pattern) rules. Capture group 1 is the value.
pub const FIELD_RULES: &[(Field, &str)] = &[
    (
        Field::Target,
        r"(?:지원\s*대상|신청\s*대상|참여\s*대상|대상자)\s*[:：]?\s*(?:은|는)?\s*([^\n.。]{2,80})",
    ),
    (
        Field::Target,
        r"([^\s,.。]+(?:\s+[^\s,.。]+){0,3})\s*(?:을|를)\s*대상으로",
    ),
    (Field::Target, r"(만\s*\d+\s*세\s*(?:이상|이하|미만|~)[^\n.。,]{0,40})"),
    (
        Field::Benefits,
        r"(?:지원\s*내용|지원\s*금액|지원\s*혜택|혜택)\s*[:：]?\s*(?:은|는)?\s*([^\n.。]{2,80})",
    ),
    (
        Field::Benefits,
        r"((?:월|연|최대|1인당)\s*(?:최대\s*)?\d[\d,]*\s*(?:만\s*)?원[^\n.。]{0,40})",
    ),
    (
        Field::Process,
        r"(?:신청\s*방법|신청\s*절차|접수\s*방법|신청\s*방식)\s*[:：]?\s*(?:은|는)?\s*([^\n.。]{2,80})",
    ),
    (
        Field::Process,
        r"([^\n.。]{0,30}(?:고용센터|고용24|워크넷|홈페이지|온라인)[^\n.。]{0,30}(?:신청|접수)[^\n.。]{0,20})",
    ),
];

/// Fallback rules describing why the policy exists.
pub const PURPOSE_RULES: &[&str] = &[
    r"(?:목적|취지)\s*[:：]?\s*(?:은|는)?\s*([^\n.。]{2,80})",
    r"([^\n.。]{4,80}(?:위한|위하여|위해)\s*(?:사업|제도|지원|정책)[^\n.。]{0,20})",
];

static FIELD_MATCHERS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    FIELD_RULES
        .iter()
        .filter_map(|(field, pattern)| compile(pattern).map(|re| (*field, re)))
        .collect()
});

static PURPOSE_MATCHERS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| PURPOSE_RULES.iter().filter_map(|p| compile(p)).collect());

static COLUMN_GAP: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\S(?: {3,}|\t)\S"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInfo {
    pub target: Option<String>,
    pub benefits: Option<String>,
    pub process: Option<String>,
}

impl KeyInfo {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Target => &mut self.target,
            Field::Benefits => &mut self.benefits,
            Field::Process => &mut self.process,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.benefits.is_none() && self.process.is_none()
    }

    /// Filled fields in display order.
    pub fn entries(&self) -> Vec<(Field, &str)> {
        [
            (Field::Target, &self.target),
            (Field::Benefits, &self.benefits),
            (Field::Process, &self.process),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Fields(KeyInfo),
    Purpose(String),
    SeeSource,
    Abstain,
}

fn tidy(raw: &str) -> Option<String> {
    let value = collapse_whitespace(raw);
    let value = value.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '：' | '-' | '·' | ','));
    (value.chars().count() >= 2).then(|| truncate_chars(value, VALUE_LIMIT))
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    tidy(caps.get(1)?.as_str())
}

/// Whether the text reads like a table flattened into lines: several lines
/// with pipe separators or wide column gaps.
pub fn looks_tabular(text: &str) -> bool {
    let columnar = text
        .lines()
        .filter(|line| {
            line.matches(['|', '│']).count() >= 2
                || COLUMN_GAP.as_ref().is_some_and(|re| re.is_match(line))
        })
        .count();
    columnar >= TABULAR_LINES
}

pub fn extract(text: &str) -> Extraction {
    let mut info = KeyInfo::default();
    for (field, re) in FIELD_MATCHERS.iter() {
        let slot = info.slot(*field);
        if slot.is_none() {
            *slot = capture(re, text);
        }
    }
    if !info.is_empty() {
        return Extraction::Fields(info);
    }

    if text.trim().chars().count() >= MIN_FALLBACK_CHARS {
        if let Some(purpose) = PURPOSE_MATCHERS.iter().find_map(|re| capture(re, text)) {
            return Extraction::Purpose(purpose);
        }
    }

    if looks_tabular(text) {
        Extraction::SeeSource
    } else {
        Extraction::Abstain
    }
}
