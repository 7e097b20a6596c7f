use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The request could not complete (connect, reset, TLS).
    Transport,
    Timeout,
    /// The backend answered with a non-success status.
    HttpStatus(u16),
    /// The body did not have the expected shape.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Transport => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "invalid response body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({message})")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Transport | FailureKind::Timeout | FailureKind::InvalidUrl
        )
    }

    /// The backend answered, but not with what the protocol expects.
    pub fn is_protocol(&self) -> bool {
        matches!(self.kind, FailureKind::HttpStatus(_) | FailureKind::Decode)
    }
}

/// `GET /health` body. Only `sections` drives behavior; the rest is logged.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ollama_url: Option<String>,
    #[serde(default)]
    pub rag: Option<RagStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RagStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub chunks: usize,
    #[serde(default)]
    pub embed_model: Option<String>,
}

/// `POST /chat` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// `POST /chat_rag` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub top_k: Option<u32>,
    #[serde(default)]
    pub hits: Vec<RagHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RagHit {
    pub section: String,
    pub chunk_id: u32,
}

/// `POST /rag/rebuild` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RebuildReport {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub chunks: usize,
}
