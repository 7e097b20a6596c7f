use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use portfolio_core::ChatOptions;
use portfolio_engine::{
    payload_stream, stream_chat, Answer, BackendEndpoint, BackendError, ChatBackend,
    ChatSettings, FailureKind, HealthReport, PayloadSink, PayloadStream, RagAnswer,
    RebuildReport, ReqwestBackend,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    payloads: Arc<Mutex<Vec<String>>>,
}

impl TestSink {
    fn take(&self) -> Vec<String> {
        self.payloads.lock().unwrap().drain(..).collect()
    }
}

impl PayloadSink for TestSink {
    fn emit(&self, payload: String) {
        self.payloads.lock().unwrap().push(payload);
    }
}

async fn backend_with_body(status: u16, body: &str) -> (MockServer, ReqwestBackend) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat_stream"))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), "text/event-stream"))
        .mount(&server)
        .await;
    let endpoint = BackendEndpoint::from_base(&server.uri()).unwrap();
    let backend = ReqwestBackend::new(endpoint, ChatSettings::default()).unwrap();
    (server, backend)
}

#[tokio::test]
async fn callback_sees_every_payload_in_order() {
    let (_server, backend) =
        backend_with_body(200, "data: A\n\nignored: x\n\ndata: B\n\ndata: C\n\n").await;
    let sink = TestSink::default();

    let count = stream_chat(&backend, "q", &ChatOptions::default(), &sink)
        .await
        .expect("stream ok");

    assert_eq!(count, 3);
    assert_eq!(sink.take(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn unterminated_last_frame_is_not_delivered() {
    let (_server, backend) = backend_with_body(200, "data: A\n\ndata: lost").await;
    let sink = TestSink::default();

    let count = stream_chat(&backend, "q", &ChatOptions::default(), &sink)
        .await
        .expect("stream ok");

    assert_eq!(count, 1);
    assert_eq!(sink.take(), vec!["A"]);
}

#[tokio::test]
async fn closures_work_as_sinks() {
    let (_server, backend) = backend_with_body(200, "data: só\n\n").await;
    let seen = Arc::new(Mutex::new(String::new()));
    let seen_in_sink = seen.clone();
    let sink = move |payload: String| seen_in_sink.lock().unwrap().push_str(&payload);

    stream_chat(&backend, "q", &ChatOptions::default(), &sink)
        .await
        .expect("stream ok");

    assert_eq!(seen.lock().unwrap().as_str(), "só");
}

#[tokio::test]
async fn status_failure_never_calls_sink() {
    let (_server, backend) = backend_with_body(502, "data: nope\n\n").await;
    let sink = TestSink::default();

    let err = stream_chat(&backend, "q", &ChatOptions::default(), &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert!(sink.take().is_empty());
}

/// Sends one complete frame, then keeps the connection open without sending more.
struct StalledBackend;

#[async_trait::async_trait]
impl ChatBackend for StalledBackend {
    async fn health(&self) -> Result<HealthReport, BackendError> {
        Ok(HealthReport::default())
    }

    async fn ask(&self, _question: &str) -> Result<Answer, BackendError> {
        unreachable!("only the stream is used")
    }

    async fn ask_rag(
        &self,
        _question: &str,
        _options: &ChatOptions,
    ) -> Result<RagAnswer, BackendError> {
        unreachable!("only the stream is used")
    }

    async fn rebuild_index(&self) -> Result<RebuildReport, BackendError> {
        unreachable!("only the stream is used")
    }

    async fn open_stream(
        &self,
        _question: &str,
        _options: &ChatOptions,
    ) -> Result<PayloadStream, BackendError> {
        let first: Result<&'static [u8], BackendError> = Ok(b"data: A\n\n".as_slice());
        Ok(payload_stream(stream::iter([first]).chain(stream::pending())))
    }
}

#[tokio::test]
async fn callback_runs_before_the_stream_ends() {
    let sink = TestSink::default();

    let outcome = tokio::time::timeout(
        Duration::from_millis(200),
        stream_chat(&StalledBackend, "q", &ChatOptions::default(), &sink),
    )
    .await;

    assert!(outcome.is_err(), "stream should still be open");
    assert_eq!(sink.take(), vec!["A"]);
}
