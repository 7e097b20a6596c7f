use std::collections::VecDeque;

use engine_logging::{engine_info, engine_warn};
use futures_util::StreamExt;
use portfolio_core::{
    render_gallery, update, AppState, ChatOptions, Effect, MessageId, Msg, Role, Surface,
    TurnId, TurnPhase, PROJECTS,
};

use crate::{health, ChatBackend};

/// Drives the chat state machine against a backend and a rendering surface.
///
/// Runs on one task: payloads are rendered as each frame completes, and a turn
/// always ends with exactly one `StreamFinished` or `StreamFailed`.
pub struct ChatSession<B, S> {
    backend: B,
    surface: S,
    state: AppState,
    reply: Option<MessageId>,
}

impl<B, S> ChatSession<B, S>
where
    B: ChatBackend,
    S: Surface,
{
    pub fn new(backend: B, surface: S, options: ChatOptions) -> Self {
        Self {
            backend,
            surface,
            state: AppState::with_options(options),
            reply: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Page bootstrap: gallery first, then the health probe and welcome message.
    pub async fn start(&mut self) {
        render_gallery(&mut self.surface, PROJECTS);
        self.dispatch(Msg::Started).await;
    }

    /// Submit one line of user input. Returns whether it started a turn.
    pub async fn submit(&mut self, input: &str) -> bool {
        let before = self.state.current_turn();
        self.dispatch(Msg::InputChanged(input.to_string())).await;
        self.dispatch(Msg::PromptSubmitted).await;
        self.state.current_turn() != before
    }

    /// Apply a message and run every effect it leads to, IO included.
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut pending: VecDeque<Effect> = self.apply(msg).into();
        while let Some(effect) = pending.pop_front() {
            let follow_up = match effect {
                Effect::ProbeHealth => health::probe(&self.backend).await,
                Effect::StartStream {
                    turn,
                    question,
                    options,
                } => {
                    engine_logging::set_current_turn(turn);
                    self.run_stream(turn, &question, &options).await
                }
                _ => continue,
            };
            pending.extend(self.apply(follow_up));
        }
    }

    async fn run_stream(&mut self, turn: TurnId, question: &str, options: &ChatOptions) -> Msg {
        engine_info!("turn started ({} chars)", question.len());
        let mut payloads = match self.backend.open_stream(question, options).await {
            Ok(payloads) => payloads,
            Err(err) => {
                engine_warn!("stream request failed: {}", err);
                return Msg::StreamFailed {
                    turn,
                    reason: err.to_string(),
                };
            }
        };
        self.absorb(Msg::StreamOpened { turn });

        let mut received = 0usize;
        while let Some(item) = payloads.next().await {
            match item {
                Ok(text) => {
                    received += 1;
                    self.absorb(Msg::PayloadReceived { turn, text });
                }
                Err(err) => {
                    engine_warn!("stream broke after {} payloads: {}", received, err);
                    return Msg::StreamFailed {
                        turn,
                        reason: err.to_string(),
                    };
                }
            }
        }
        engine_info!("turn finished after {} payloads", received);
        Msg::StreamFinished { turn }
    }

    /// Apply a mid-stream message; those only ever render.
    fn absorb(&mut self, msg: Msg) {
        for effect in self.apply(msg) {
            engine_warn!("ignoring effect while streaming: {:?}", effect);
        }
    }

    /// Run `update`, render what it asks for, and hand back the IO effects.
    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        let mut io = Vec::new();
        for effect in effects {
            if effect.is_render() {
                self.render(effect);
            } else {
                io.push(effect);
            }
        }
        io
    }

    fn render(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { role, text } => {
                let id = self.surface.append_message(role, &text);
                // The only bot bubble opened while a turn is live is the reply bubble.
                if role == Role::Bot && self.state.phase() != TurnPhase::Idle {
                    self.reply = Some(id);
                }
            }
            Effect::ExtendReply { text } => match self.reply {
                Some(id) => self.surface.extend_message(id, &text),
                None => engine_warn!("payload without a reply bubble"),
            },
            Effect::SetBusy(busy) => {
                if !busy {
                    self.reply = None;
                }
                self.surface.set_busy(busy);
            }
            Effect::ShowDiagnostic(text) => self.surface.show_diagnostic(&text),
            Effect::ProbeHealth | Effect::StartStream { .. } => {}
        }
    }
}
