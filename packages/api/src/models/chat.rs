//! Chat threads, messages and assistant replies.

use serde::{Deserialize, Serialize};

use super::de_id;

/// A persisted conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[default]
    #[serde(alias = "bot", alias = "ai")]
    Assistant,
}

/// A passage of the source guidebook cited by an answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "de_id")]
    pub page: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "score")]
    pub similarity: Option<f64>,
}

/// One entry of a thread's transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "role")]
    pub sender: Sender,
    #[serde(alias = "content")]
    pub text: String,
    #[serde(default, alias = "created_at")]
    pub timestamp: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Response of `POST /chat/{id}/message`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_list() {
        let threads: Vec<ChatThread> = serde_json::from_str(
            r#"[{"id": 12, "title": "실업급여 문의", "created_at": "2025-03-01T10:00:00"}, {"id": "ab"}]"#,
        )
        .unwrap();
        assert_eq!(threads[0].id, "12");
        assert_eq!(threads[1].id, "ab");
        assert_eq!(threads[1].title, "");
    }

    #[test]
    fn test_message_aliases() {
        let msg: ChatMessage = serde_json::from_str(
            r#"{"id": 5, "role": "assistant", "content": "안녕하세요", "created_at": "2025-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(msg.sender, Sender::Assistant);
        assert_eq!(msg.text, "안녕하세요");
        assert_eq!(msg.timestamp, "2025-03-01T10:00:00Z");
        assert!(msg.sources.is_empty());
    }

    #[test]
    fn test_reply_with_sources() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"answer": "고용센터에 신청하세요.", "sources": [{"page": 12, "text": "구직급여", "similarity": 0.91}, {"page": "13", "text": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.sources.len(), 2);
        assert_eq!(reply.sources[0].page, "12");
        assert_eq!(reply.sources[0].similarity, Some(0.91));
        assert_eq!(reply.sources[1].similarity, None);
    }
}
