//! # Chat session
//!
//! [`ChatSession`] owns the thread list, the active thread and the transcript
//! shown for it.
//!
//! ```text
//!   Inactive ──/chat/new──▶ Temporary ──first send creates thread──▶ Persisted(id)
//!       │                       ▲                                        │
//!       └──────/chat/{id}───────┼──────── load ok ───────────────────────┘
//!                               └── 404 / load failure / active thread deleted
//! ```
//!
//! Sending is two-phase. [`ChatSession::begin_send`] appends the user message
//! as pending and returns a [`SendPlan`]; [`dispatch`] performs the backend
//! calls without touching the session; [`ChatSession::apply`] folds the
//! [`SendOutcome`] back in. Only one send may be in flight per session.
//!
//! A response that arrives after the user switched threads is matched by the
//! entry key; if the pending entry is gone the reply is dropped, but a thread
//! it created is still added to the list.

use api::{ApiError, ChatBackend, ChatMessage, ChatReply, ChatThread, Sender};

use crate::format::truncate_chars;
use crate::time::now_rfc3339;

/// Route id of the unsaved chat.
pub const TEMPORARY_MARKER: &str = "new";
pub const GREETING: &str = "안녕하세요! 고용노동 정책 어시스턴트입니다. 어떤 정책에 관심이 있으신가요?";
pub const SEND_FAILURE: &str =
    "죄송합니다. 메시지 처리 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";
pub const LOAD_FAILURE: &str = "대화 내용을 불러오지 못해 새 대화를 시작합니다.";
/// Thread titles are the first message cut to this many characters.
const TITLE_LIMIT: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadMode {
    Inactive,
    /// Client-only chat; the first send creates a thread.
    Temporary,
    Persisted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Committed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Stable render key, unique within the session.
    pub key: u64,
    pub message: ChatMessage,
    pub delivery: Delivery,
    /// Assistant text standing in for a failed reply.
    pub is_error: bool,
}

impl TranscriptEntry {
    pub fn is_user(&self) -> bool {
        self.message.sender == Sender::User
    }
}

/// What to do when the chat route changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Already showing this thread.
    Stay,
    StartTemporary,
    Load(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTarget {
    Thread(String),
    Create { title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendPlan {
    pub key: u64,
    pub text: String,
    pub target: SendTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    pub key: u64,
    pub created: Option<ChatThread>,
    pub reply: Result<ChatReply, ApiError>,
}

/// Thread to open for a bare `/chat`: the most recent one, or the temporary
/// chat when there is none or the list could not be fetched.
pub fn index_target(threads: &Result<Vec<ChatThread>, ApiError>) -> String {
    match threads {
        Ok(threads) => threads
            .iter()
            .rev()
            .max_by(|a, b| a.created_at.cmp(&b.created_at))
            .map(|t| t.id.clone())
            .unwrap_or_else(|| TEMPORARY_MARKER.to_string()),
        Err(e) => {
            tracing::warn!("Could not list chat threads: {e}");
            TEMPORARY_MARKER.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    threads: Vec<ChatThread>,
    mode: ThreadMode,
    transcript: Vec<TranscriptEntry>,
    sending: bool,
    notice: Option<String>,
    next_key: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            threads: Vec::new(),
            mode: ThreadMode::Inactive,
            transcript: Vec::new(),
            sending: false,
            notice: None,
            next_key: 0,
        }
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    pub fn mode(&self) -> &ThreadMode {
        &self.mode
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn active_thread(&self) -> Option<&str> {
        match &self.mode {
            ThreadMode::Persisted(id) => Some(id),
            _ => None,
        }
    }

    pub fn set_threads(&mut self, threads: Vec<ChatThread>) {
        self.threads = threads;
    }

    /// Decide what entering `/chat/{route_id}` means.
    pub fn entry(&self, route_id: &str) -> Entry {
        match &self.mode {
            ThreadMode::Temporary if route_id == TEMPORARY_MARKER => Entry::Stay,
            ThreadMode::Persisted(id) if id == route_id => Entry::Stay,
            _ if route_id == TEMPORARY_MARKER => Entry::StartTemporary,
            _ => Entry::Load(route_id.to_string()),
        }
    }

    fn key(&mut self) -> u64 {
        self.next_key += 1;
        self.next_key
    }

    fn push(&mut self, key: u64, sender: Sender, text: String, delivery: Delivery) {
        self.transcript.push(TranscriptEntry {
            key,
            message: ChatMessage {
                id: format!("local-{key}"),
                sender,
                text,
                timestamp: now_rfc3339(),
                sources: Vec::new(),
            },
            delivery,
            is_error: false,
        });
    }

    fn greet(&mut self) {
        self.transcript.clear();
        let key = self.key();
        self.push(key, Sender::Assistant, GREETING.to_string(), Delivery::Committed);
    }

    /// Fresh unsaved chat containing only the greeting.
    pub fn start_temporary(&mut self) {
        tracing::debug!("Starting temporary chat");
        self.mode = ThreadMode::Temporary;
        self.notice = None;
        self.greet();
    }

    /// Fold the result of loading `id`'s messages in.
    pub fn finish_load(&mut self, id: &str, result: Result<Vec<ChatMessage>, ApiError>) {
        match result {
            Ok(messages) => {
                self.mode = ThreadMode::Persisted(id.to_string());
                self.notice = None;
                if messages.is_empty() {
                    self.greet();
                    return;
                }
                let mut transcript = Vec::with_capacity(messages.len());
                for message in messages {
                    transcript.push(TranscriptEntry {
                        key: self.key(),
                        message,
                        delivery: Delivery::Committed,
                        is_error: false,
                    });
                }
                self.transcript = transcript;
            }
            Err(ApiError::NotFound) => {
                tracing::info!("Chat thread {id} not found, starting a new chat");
                self.start_temporary();
            }
            Err(e) => {
                tracing::warn!("Loading chat thread {id} failed: {e}");
                self.start_temporary();
                self.notice = Some(LOAD_FAILURE.to_string());
            }
        }
    }

    /// Append `text` as a pending user message and plan the backend calls.
    /// `None` for blank input or while another send is in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<SendPlan> {
        let text = text.trim();
        if text.is_empty() || self.sending {
            return None;
        }
        let target = match &self.mode {
            ThreadMode::Persisted(id) => SendTarget::Thread(id.clone()),
            ThreadMode::Temporary | ThreadMode::Inactive => SendTarget::Create {
                title: truncate_chars(text, TITLE_LIMIT),
            },
        };
        if self.mode == ThreadMode::Inactive {
            self.mode = ThreadMode::Temporary;
        }
        let key = self.key();
        self.push(key, Sender::User, text.to_string(), Delivery::Pending);
        self.sending = true;
        self.notice = None;
        Some(SendPlan {
            key,
            text: text.to_string(),
            target,
        })
    }

    /// Fold a finished send in. Returns the id of a thread the send created
    /// for the chat still on screen, so the caller can move to its URL.
    pub fn apply(&mut self, outcome: SendOutcome) -> Option<String> {
        self.sending = false;
        let on_screen = self.transcript.iter().any(|e| e.key == outcome.key);

        let mut promoted = None;
        if let Some(thread) = outcome.created {
            if !self.threads.iter().any(|t| t.id == thread.id) {
                self.threads.insert(0, thread.clone());
            }
            if on_screen && self.mode == ThreadMode::Temporary {
                self.mode = ThreadMode::Persisted(thread.id.clone());
                promoted = Some(thread.id);
            }
        }

        if !on_screen {
            tracing::debug!("Dropping reply for a chat no longer on screen");
            return promoted;
        }

        let (delivery, reply_text, sources, is_error) = match outcome.reply {
            Ok(reply) => (Delivery::Committed, reply.answer, reply.sources, false),
            Err(e) => {
                tracing::warn!("Sending chat message failed: {e}");
                (Delivery::Failed, SEND_FAILURE.to_string(), Vec::new(), true)
            }
        };
        if let Some(entry) = self.transcript.iter_mut().find(|e| e.key == outcome.key) {
            entry.delivery = delivery;
        }
        let key = self.key();
        self.push(key, Sender::Assistant, reply_text, Delivery::Committed);
        if let Some(last) = self.transcript.last_mut() {
            last.message.sources = sources;
            last.is_error = is_error;
        }
        promoted
    }

    /// Drop a deleted thread. Deleting the active one returns to a fresh
    /// temporary chat. Returns whether the active thread was removed.
    pub fn remove_thread(&mut self, id: &str) -> bool {
        self.threads.retain(|t| t.id != id);
        if self.active_thread() == Some(id) {
            self.start_temporary();
            true
        } else {
            false
        }
    }
}

/// Perform the calls of a [`SendPlan`]: create the thread if needed, then
/// post the message.
pub async fn dispatch<B: ChatBackend>(backend: &B, plan: SendPlan) -> SendOutcome {
    let (thread_id, created) = match plan.target {
        SendTarget::Thread(id) => (id, None),
        SendTarget::Create { title } => match backend.create_thread(&title).await {
            Ok(thread) => {
                tracing::info!("Created chat thread {}", thread.id);
                (thread.id.clone(), Some(thread))
            }
            Err(e) => {
                return SendOutcome {
                    key: plan.key,
                    created: None,
                    reply: Err(e),
                }
            }
        },
    };
    let reply = backend.send_message(&thread_id, &plan.text).await;
    SendOutcome {
        key: plan.key,
        created,
        reply,
    }
}
