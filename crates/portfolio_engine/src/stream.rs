use std::collections::VecDeque;

use engine_logging::engine_debug;
use futures_util::stream::{self, BoxStream};
use futures_util::{Stream, StreamExt};
use portfolio_core::ChatOptions;

use crate::{BackendError, ChatBackend, PayloadStream, SseDecoder};

/// Receives payloads as soon as their frame completes.
pub trait PayloadSink: Send + Sync {
    fn emit(&self, payload: String);
}

impl<F> PayloadSink for F
where
    F: Fn(String) + Send + Sync,
{
    fn emit(&self, payload: String) {
        self(payload)
    }
}

struct FrameState<B> {
    body: BoxStream<'static, Result<B, BackendError>>,
    decoder: Option<SseDecoder>,
    ready: VecDeque<String>,
}

/// Turn a chunked response body into the payloads it carries.
///
/// The stream ends when the body ends or right after the first body error.
pub fn payload_stream<S, B>(body: S) -> PayloadStream
where
    S: Stream<Item = Result<B, BackendError>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = FrameState {
        body: body.boxed(),
        decoder: Some(SseDecoder::new()),
        ready: VecDeque::new(),
    };
    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(payload) = state.ready.pop_front() {
                return Some((Ok(payload), state));
            }
            let decoder = state.decoder.as_mut()?;
            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let payloads = decoder.decode(chunk.as_ref());
                    state.ready.extend(payloads);
                }
                Some(Err(err)) => {
                    state.decoder = None;
                    return Some((Err(err), state));
                }
                None => {
                    if let Some(decoder) = state.decoder.take() {
                        decoder.finish();
                    }
                    return None;
                }
            }
        }
    })
    .boxed()
}

/// One streaming exchange: every payload goes to `sink`, in order, before more of
/// the body is read. Resolves after end of stream with the number of payloads.
pub async fn stream_chat(
    backend: &dyn ChatBackend,
    question: &str,
    options: &ChatOptions,
    sink: &dyn PayloadSink,
) -> Result<usize, BackendError> {
    let mut payloads = backend.open_stream(question, options).await?;
    let mut count = 0;
    while let Some(payload) = payloads.next().await {
        sink.emit(payload?);
        count += 1;
    }
    engine_debug!("stream ended after {} payloads", count);
    Ok(count)
}
