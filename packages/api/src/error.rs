//! # Errors returned by backend calls
//!
//! [`ApiError`] is the single error type of the crate. It is `Clone +
//! PartialEq` so views can keep the last failure in a signal and compare it.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Unauthorized` | the backend answered 401 (token missing, expired or invalid) |
//! | `NotFound` | the backend answered 404 (e.g. a chat thread deleted elsewhere) |
//! | `Status` | any other non-2xx status; `detail` carries the FastAPI `detail` text |
//! | `Network` | the request never produced a response |
//! | `Decode` | the response body did not match the expected shape |

use serde_json::Value;

/// Error returned by every backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success HTTP status (and optional backend detail) to an error.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            _ => ApiError::Status {
                status,
                detail: detail.unwrap_or_default(),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Backend-provided explanation, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }

    /// Message suitable for inline display. Backend details win; otherwise a
    /// fixed text per category, or `fallback` for the call site's own wording.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(detail) = self.detail() {
            return detail.to_string();
        }
        match self {
            ApiError::Unauthorized => "로그인이 필요한 서비스입니다.".to_string(),
            ApiError::Network(_) => "서버에 연결할 수 없습니다. 잠시 후 다시 시도해주세요.".to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Extract a human-readable detail from an error body.
///
/// FastAPI answers `{"detail": "..."}` for handled errors and
/// `{"detail": [{"msg": "...", ...}, ...]}` for validation failures; some
/// endpoints use `{"message": "..."}`.
pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join(", "));
            }
        }
        _ => {}
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ApiError::from_status(401, None), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_status(404, Some("gone".to_string())),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from_status(500, None),
            ApiError::Status {
                status: 500,
                detail: String::new()
            }
        );
    }

    #[test]
    fn test_detail_from_fastapi_string() {
        let body = r#"{"detail": "이미 등록된 이메일입니다."}"#;
        assert_eq!(detail_from_body(body).as_deref(), Some("이미 등록된 이메일입니다."));
    }

    #[test]
    fn test_detail_from_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "field required"}, {"msg": "too short"}]}"#;
        assert_eq!(
            detail_from_body(body).as_deref(),
            Some("field required, too short")
        );
    }

    #[test]
    fn test_detail_from_message_or_garbage() {
        assert_eq!(
            detail_from_body(r#"{"message": "bad"}"#).as_deref(),
            Some("bad")
        );
        assert_eq!(detail_from_body("<html>502</html>"), None);
        assert_eq!(detail_from_body(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::from_status(400, Some("비활성 사용자".to_string()));
        assert_eq!(err.user_message("실패"), "비활성 사용자");

        let err = ApiError::from_status(500, None);
        assert_eq!(err.user_message("정책을 불러오는데 실패했습니다."), "정책을 불러오는데 실패했습니다.");

        assert_eq!(
            ApiError::Unauthorized.user_message("x"),
            "로그인이 필요한 서비스입니다."
        );
    }
}
