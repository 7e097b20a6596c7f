//! Portfolio engine: SSE framing, backend client and the chat session runner.
mod backend;
mod endpoint;
mod health;
mod session;
mod sse;
mod stream;
mod types;

pub use backend::{ChatBackend, ChatSettings, PayloadStream, ReqwestBackend};
pub use endpoint::{is_loopback_host, BackendEndpoint, LOCAL_BACKEND, REMOTE_BACKEND};
pub use health::probe;
pub use session::ChatSession;
pub use sse::{SseDecoder, DATA_PREFIX, FRAME_DELIMITER};
pub use stream::{payload_stream, stream_chat, PayloadSink};
pub use types::{
    Answer, BackendError, FailureKind, HealthReport, RagAnswer, RagHit, RagStatus, RebuildReport,
};
