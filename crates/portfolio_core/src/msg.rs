use crate::TurnId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page bootstrap finished; greet the user.
    Started,
    /// Health probe answered with the backend's context sections.
    HealthLoaded { sections: Vec<String> },
    /// Health probe failed; `reason` is shown to the user.
    HealthFailed { reason: String },
    /// User edited the chat input box.
    InputChanged(String),
    /// User submitted the current chat input.
    PromptSubmitted,
    /// Backend accepted the streaming request.
    StreamOpened { turn: TurnId },
    /// One decoded payload for a turn.
    PayloadReceived { turn: TurnId, text: String },
    /// Transport reported end of stream.
    StreamFinished { turn: TurnId },
    /// Request or stream failed.
    StreamFailed { turn: TurnId, reason: String },
}
