use crate::view_model::{AppViewModel, MessageView, BUSY_LABEL, SEND_LABEL};
use crate::{ChatMessage, ChatOptions, TurnId};

/// Where the chat widget is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    /// Request issued, nothing received yet. Input is disabled.
    Sending,
    /// Payloads are arriving and growing the reply bubble.
    Streaming,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: TurnPhase,
    input: String,
    options: ChatOptions,
    transcript: Vec<ChatMessage>,
    reply: Option<usize>,
    turn: TurnId,
    sections: Vec<String>,
    diagnostic: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ChatOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Turn most recently started; 0 before the first submission.
    pub fn current_turn(&self) -> TurnId {
        self.turn
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.phase != TurnPhase::Idle;
        let messages = self
            .transcript
            .iter()
            .enumerate()
            .map(|(idx, msg)| MessageView {
                role: msg.role,
                text: msg.text.clone(),
                streaming: busy && self.reply == Some(idx),
            })
            .collect();
        AppViewModel {
            phase: self.phase,
            messages,
            input: self.input.clone(),
            input_enabled: !busy,
            send_label: if busy { BUSY_LABEL } else { SEND_LABEL },
            sections: self.sections.clone(),
            diagnostic: self.diagnostic.clone(),
        }
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn is_current(&self, turn: TurnId) -> bool {
        self.phase != TurnPhase::Idle && turn == self.turn
    }

    pub(crate) fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    /// Opens a turn: records the question, opens an empty reply bubble and returns the turn id.
    pub(crate) fn begin_turn(&mut self, question: &str) -> TurnId {
        self.turn += 1;
        self.phase = TurnPhase::Sending;
        self.input.clear();
        self.push_message(ChatMessage::user(question));
        self.push_message(ChatMessage::bot(""));
        self.reply = Some(self.transcript.len() - 1);
        self.turn
    }

    pub(crate) fn mark_streaming(&mut self) {
        if self.phase == TurnPhase::Sending {
            self.phase = TurnPhase::Streaming;
        }
    }

    pub(crate) fn extend_reply(&mut self, text: &str) {
        self.mark_streaming();
        if let Some(msg) = self.reply.and_then(|idx| self.transcript.get_mut(idx)) {
            msg.text.push_str(text);
        }
    }

    pub(crate) fn end_turn(&mut self) {
        self.phase = TurnPhase::Idle;
        self.reply = None;
    }

    pub(crate) fn set_sections(&mut self, sections: Vec<String>) {
        self.sections = sections;
        self.diagnostic = None;
    }

    pub(crate) fn set_diagnostic(&mut self, diagnostic: String) {
        self.diagnostic = Some(diagnostic);
    }
}
