//! Chat session: the transcript of one browsing session and the gate that
//! allows at most one outstanding request.
//!
//! A submission runs in two phases. [`ChatSession::begin_submit`] records the
//! user message and moves the session into `Sending`; the returned
//! [`PendingRequest`] is dispatched on the transport wherever the caller
//! likes; [`ChatSession::complete`] applies the result, but only if the session
//! is still waiting on that very request. [`ChatSession::submit`] and
//! [`ChatSession::retry`] chain the phases for callers that simply await.

use chrono::{DateTime, Duration, DurationRound, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::ChatTransport;
use crate::models::{ChatMessage, ChatResponse, Role};

/// A quick-start prompt offered before the first message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub icon: &'static str,
    pub label: &'static str,
}

impl Suggestion {
    /// The text submitted when the suggestion is picked.
    pub fn prompt(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        icon: "💼",
        label: "Skills & expertise",
    },
    Suggestion {
        icon: "🚀",
        label: "Projects",
    },
    Suggestion {
        icon: "🎓",
        label: "Education",
    },
    Suggestion {
        icon: "📧",
        label: "Contact info",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending { request_id: u64 },
}

/// How a response was applied by [`ChatSession::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// An assistant message was appended.
    Replied,
    /// The failure was surfaced as the session error.
    Failed,
    /// The session was not waiting on this request; nothing changed.
    Stale,
}

/// One outbound chat call, detached from the session so it can be awaited
/// without holding a borrow on it.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub request_id: u64,
    pub message: String,
    /// Every message of the session up to and including `message`.
    pub history: Vec<ChatMessage>,
}

impl PendingRequest {
    pub async fn dispatch(&self, transport: &dyn ChatTransport) -> ChatResponse {
        transport.send_chat(&self.message, &self.history).await
    }
}

pub struct ChatSession {
    id: Uuid,
    transport: Arc<dyn ChatTransport>,
    transcript: Vec<ChatMessage>,
    state: SessionState,
    error: Option<String>,
    last_request_id: u64,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Chat session started");
        Self {
            id,
            transport,
            transcript: Vec::new(),
            state: SessionState::Idle,
            error: None,
            last_request_id: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transport(&self) -> Arc<dyn ChatTransport> {
        Arc::clone(&self.transport)
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, SessionState::Sending { .. })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.transcript.iter().rev().find(|m| m.role == Role::User)
    }

    /// Records a user message and opens a request for it.
    ///
    /// Returns `None` without touching the session when the trimmed text is
    /// empty or another request is still in flight. Dropped submissions are
    /// not queued.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingRequest> {
        let content = text.trim();
        if content.is_empty() {
            debug!(session_id = %self.id, "Ignoring blank chat submission");
            return None;
        }

        if let SessionState::Sending { request_id } = self.state {
            debug!(
                session_id = %self.id,
                request_id,
                "Dropping chat submission while a request is in flight"
            );
            return None;
        }

        self.error = None;
        let timestamp = self.next_timestamp();
        self.transcript
            .push(ChatMessage::at(Role::User, content, timestamp));

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.state = SessionState::Sending { request_id };

        info!(
            session_id = %self.id,
            request_id,
            transcript_len = self.transcript.len(),
            "Chat request started"
        );

        Some(PendingRequest {
            request_id,
            message: content.to_string(),
            history: self.transcript.clone(),
        })
    }

    /// Clears the error, then resubmits the most recent user message.
    ///
    /// Returns `None` when there is no user message to resend or when the
    /// resubmission is gated like any other.
    pub fn begin_retry(&mut self) -> Option<PendingRequest> {
        self.error = None;
        let content = self.last_user_message()?.content.clone();
        self.begin_submit(&content)
    }

    /// Applies the response for `request_id`.
    pub fn complete(&mut self, request_id: u64, response: ChatResponse) -> CompletionOutcome {
        match self.state {
            SessionState::Sending { request_id: current } if current == request_id => {}
            state => {
                warn!(
                    session_id = %self.id,
                    request_id,
                    ?state,
                    "Ignoring response for a request the session is not waiting on"
                );
                return CompletionOutcome::Stale;
            }
        }

        self.state = SessionState::Idle;

        match response.error_message() {
            Some(error) => {
                warn!(session_id = %self.id, request_id, "Chat request failed: {}", error);
                self.error = Some(error.to_string());
                CompletionOutcome::Failed
            }
            None => {
                let timestamp = self.next_timestamp();
                self.transcript
                    .push(ChatMessage::at(Role::Assistant, response.response, timestamp));
                debug!(session_id = %self.id, request_id, "Chat reply appended");
                CompletionOutcome::Replied
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Submits `text` and waits for the reply. `None` if the submission was
    /// dropped.
    pub async fn submit(&mut self, text: &str) -> Option<CompletionOutcome> {
        let pending = self.begin_submit(text)?;
        Some(self.finish(pending).await)
    }

    /// Resubmits the last user message and waits for the reply.
    pub async fn retry(&mut self) -> Option<CompletionOutcome> {
        let pending = self.begin_retry()?;
        Some(self.finish(pending).await)
    }

    async fn finish(&mut self, pending: PendingRequest) -> CompletionOutcome {
        let transport = self.transport();
        let response = pending.dispatch(transport.as_ref()).await;
        self.complete(pending.request_id, response)
    }

    /// Millisecond-precision `now`, nudged forward so timestamps strictly
    /// increase along the transcript.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let now = now
            .duration_trunc(Duration::milliseconds(1))
            .unwrap_or(now);

        match self.transcript.last() {
            Some(last) if now <= last.timestamp => last.timestamp + Duration::milliseconds(1),
            _ => now,
        }
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("error", &self.error)
            .field("transcript_len", &self.transcript.len())
            .finish()
    }
}
