use crate::welcome::{fallback_welcome, unreachable_backend, welcome_message};
use crate::{AppState, ChatMessage, Effect, Msg, Role, TurnPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::ProbeHealth],
        Msg::HealthLoaded { sections } => {
            let text = welcome_message(&sections);
            state.set_sections(sections);
            state.push_message(ChatMessage::bot(text.clone()));
            vec![Effect::AppendMessage {
                role: Role::Bot,
                text,
            }]
        }
        Msg::HealthFailed { reason } => {
            let diagnostic = unreachable_backend(&reason);
            let welcome = fallback_welcome();
            state.set_diagnostic(diagnostic.clone());
            state.push_message(ChatMessage::bot(diagnostic.clone()));
            state.push_message(ChatMessage::bot(welcome.clone()));
            // The status line carries the bare reason; the bubble has the full text.
            vec![
                Effect::ShowDiagnostic(format!("health check failed: {reason}")),
                Effect::AppendMessage {
                    role: Role::Bot,
                    text: diagnostic,
                },
                Effect::AppendMessage {
                    role: Role::Bot,
                    text: welcome,
                },
            ]
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::PromptSubmitted => {
            let question = state.input().trim().to_string();
            // One turn at a time; blank input is not a turn.
            if question.is_empty() || state.phase() != TurnPhase::Idle {
                return (state, Vec::new());
            }
            let turn = state.begin_turn(&question);
            vec![
                Effect::AppendMessage {
                    role: Role::User,
                    text: question.clone(),
                },
                Effect::SetBusy(true),
                Effect::AppendMessage {
                    role: Role::Bot,
                    text: String::new(),
                },
                Effect::StartStream {
                    turn,
                    question,
                    options: state.options().clone(),
                },
            ]
        }
        Msg::StreamOpened { turn } => {
            if state.is_current(turn) {
                state.mark_streaming();
            }
            Vec::new()
        }
        Msg::PayloadReceived { turn, text } => {
            if !state.is_current(turn) {
                return (state, Vec::new());
            }
            state.extend_reply(&text);
            vec![Effect::ExtendReply { text }]
        }
        Msg::StreamFinished { turn } => {
            if !state.is_current(turn) {
                return (state, Vec::new());
            }
            state.end_turn();
            vec![Effect::SetBusy(false)]
        }
        Msg::StreamFailed { turn, reason } => {
            if !state.is_current(turn) {
                return (state, Vec::new());
            }
            // The partial reply stays; the error gets its own bubble.
            let text = format!("Error: {reason}");
            state.push_message(ChatMessage::bot(text.clone()));
            state.end_turn();
            vec![
                Effect::AppendMessage {
                    role: Role::Bot,
                    text,
                },
                Effect::SetBusy(false),
            ]
        }
    };

    (state, effects)
}
