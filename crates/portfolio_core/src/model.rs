/// Monotonic identifier of one user-submission-to-response cycle.
pub type TurnId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }
}

/// Per-request knobs forwarded to the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOptions {
    /// Let the backend augment the answer with retrieved context.
    pub use_rag: bool,
    /// Backend model variant; `None` means the backend default.
    pub model: Option<String>,
    /// Number of retrieved chunks; `None` means the backend default.
    pub top_k: Option<u32>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            use_rag: true,
            model: None,
            top_k: None,
        }
    }
}
