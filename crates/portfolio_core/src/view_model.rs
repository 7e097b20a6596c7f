use crate::{Role, TurnPhase};

/// Send button label while idle.
pub const SEND_LABEL: &str = "Send";
/// Send button label while a turn is in flight.
pub const BUSY_LABEL: &str = "…";

/// Snapshot of everything a front end draws outside the message stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: TurnPhase,
    pub messages: Vec<MessageView>,
    pub input: String,
    pub input_enabled: bool,
    pub send_label: &'static str,
    pub sections: Vec<String>,
    pub diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub text: String,
    /// The bubble currently growing with streamed payloads.
    pub streaming: bool,
}
