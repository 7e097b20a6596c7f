//! Portfolio core: pure chat state machine, gallery data and view-model helpers.
mod effect;
mod gallery;
mod model;
mod msg;
mod state;
mod surface;
mod update;
mod view_model;
mod welcome;

pub use effect::Effect;
pub use gallery::{render_gallery, Project, PROJECTS};
pub use model::{ChatMessage, ChatOptions, Role, TurnId};
pub use msg::Msg;
pub use state::{AppState, TurnPhase};
pub use surface::{MessageId, Surface};
pub use update::update;
pub use view_model::{AppViewModel, MessageView, BUSY_LABEL, SEND_LABEL};
pub use welcome::{display_section_name, fallback_welcome, unreachable_backend, welcome_message};
