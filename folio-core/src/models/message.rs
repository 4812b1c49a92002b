use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of a chat transcript.
///
/// The timestamp is assigned by the client when the message is created and
/// travels as an ISO-8601 string with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::at(role, content, Utc::now())
    }

    pub fn at(role: Role, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Creation time rendered in the local timezone, e.g. `"%H:%M"`.
    pub fn local_time(&self, format: &str) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format(format)
            .to_string()
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub history: &'a [ChatMessage],
}

/// Outcome of one chat exchange.
///
/// A populated `error` means the exchange failed; `response` is then empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            response: String::new(),
            error: Some(error.into()),
        }
    }

    /// The failure text, treating an empty string as no failure.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
