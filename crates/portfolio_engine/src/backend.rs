use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use portfolio_core::ChatOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::stream::payload_stream;
use crate::{
    Answer, BackendEndpoint, BackendError, FailureKind, HealthReport, RagAnswer, RebuildReport,
};

/// Lazy, ordered, non-restartable sequence of payloads from one `/chat_stream` response.
pub type PayloadStream = BoxStream<'static, Result<String, BackendError>>;

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub connect_timeout: Duration,
    /// Upper bound for the non-streaming calls. Streams are not time limited.
    pub request_timeout: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthReport, BackendError>;

    /// `POST /chat`, one complete answer.
    async fn ask(&self, question: &str) -> Result<Answer, BackendError>;

    /// `POST /chat_rag`, one complete answer with the retrieved chunks.
    async fn ask_rag(&self, question: &str, options: &ChatOptions)
        -> Result<RagAnswer, BackendError>;

    /// `POST /rag/rebuild`
    async fn rebuild_index(&self) -> Result<RebuildReport, BackendError>;

    /// `POST /chat_stream`. Fails before yielding anything when the status is not a success.
    async fn open_stream(
        &self,
        question: &str,
        options: &ChatOptions,
    ) -> Result<PayloadStream, BackendError>;
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Serialize)]
struct RagRequest<'a> {
    question: &'a str,
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Serialize)]
struct StreamRequest<'a> {
    question: &'a str,
    use_rag: bool,
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

impl<'a> StreamRequest<'a> {
    fn new(question: &'a str, options: &'a ChatOptions) -> Self {
        Self {
            question,
            use_rag: options.use_rag,
            model: options.model.as_deref(),
            top_k: options.top_k,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    endpoint: BackendEndpoint,
    settings: ChatSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(endpoint: BackendEndpoint, settings: ChatSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Transport, err.to_string()))?;
        Ok(Self {
            endpoint,
            settings,
            client,
        })
    }

    pub fn endpoint(&self) -> &BackendEndpoint {
        &self.endpoint
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint.url(path)?;
        engine_info!("POST {}", url);
        let response = self
            .client
            .post(url)
            .timeout(self.settings.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl ChatBackend for ReqwestBackend {
    async fn health(&self) -> Result<HealthReport, BackendError> {
        let url = self.endpoint.url("/health")?;
        engine_info!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<HealthReport>()
            .await
            .map_err(map_reqwest_error)
    }

    async fn ask(&self, question: &str) -> Result<Answer, BackendError> {
        self.post_json("/chat", &AskRequest { question }).await
    }

    async fn ask_rag(
        &self,
        question: &str,
        options: &ChatOptions,
    ) -> Result<RagAnswer, BackendError> {
        let body = RagRequest {
            question,
            model: options.model.as_deref(),
            top_k: options.top_k,
        };
        self.post_json("/chat_rag", &body).await
    }

    async fn rebuild_index(&self) -> Result<RebuildReport, BackendError> {
        let url = self.endpoint.url("/rag/rebuild")?;
        engine_info!("POST {}", url);
        let response = self
            .client
            .post(url)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        response
            .json::<RebuildReport>()
            .await
            .map_err(map_reqwest_error)
    }

    async fn open_stream(
        &self,
        question: &str,
        options: &ChatOptions,
    ) -> Result<PayloadStream, BackendError> {
        let url = self.endpoint.url("/chat_stream")?;
        engine_info!(
            "POST {} use_rag={} model={:?} top_k={:?}",
            url,
            options.use_rag,
            options.model,
            options.top_k
        );
        let response = self
            .client
            .post(url)
            .json(&StreamRequest::new(question, options))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_reqwest_error));
        Ok(payload_stream(body))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = detail_from_body(&body).unwrap_or_else(|| status.to_string());
    engine_warn!("backend answered {}: {}", status, message);
    Err(BackendError::new(
        FailureKind::HttpStatus(status.as_u16()),
        message,
    ))
}

/// Error bodies look like `{"detail": "..."}`.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::Decode, err.to_string());
    }
    BackendError::new(FailureKind::Transport, err.to_string())
}
