use crate::{ChatOptions, Role, TurnId};

/// Work requested by `update`. Rendering effects are applied to a
/// [`crate::Surface`] in order; the rest need IO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ProbeHealth,
    StartStream {
        turn: TurnId,
        question: String,
        options: ChatOptions,
    },
    AppendMessage { role: Role, text: String },
    /// Grow the bot message opened by the last `AppendMessage { role: Bot, .. }` of the turn.
    ExtendReply { text: String },
    SetBusy(bool),
    ShowDiagnostic(String),
}

impl Effect {
    /// True for effects that only touch the rendering surface.
    pub fn is_render(&self) -> bool {
        matches!(
            self,
            Effect::AppendMessage { .. }
                | Effect::ExtendReply { .. }
                | Effect::SetBusy(_)
                | Effect::ShowDiagnostic(_)
        )
    }
}
