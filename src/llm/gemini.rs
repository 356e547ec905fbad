//! Google Gemini streaming provider
//!
//! Gemini's REST API is stateless, so the session handle carries the
//! multi-turn history itself and replays it with every message.

use super::sse::SseDecoder;
use super::types::{ChatTurn, FragmentStream, MessageRole, SessionOptions};
use super::{ChatBackend, LlmError, UpstreamSession};
use crate::config::ChatConfig;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Gemini backend; one HTTP client shared by every session it creates
pub struct GeminiBackend {
    client: Client,
    config: ChatConfig,
}

impl GeminiBackend {
    pub fn new(config: ChatConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ChatBackend for GeminiBackend {
    fn create_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn UpstreamSession>, LlmError> {
        let api_key = self.config.require_api_key()?.to_string();

        Ok(Box::new(GeminiSession {
            client: self.client.clone(),
            url: self.endpoint(),
            api_key,
            options: options.clone(),
            history: Arc::new(Mutex::new(Vec::new())),
        }))
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

type History = Arc<Mutex<Vec<ChatTurn>>>;

fn lock_history(history: &History) -> MutexGuard<'_, Vec<ChatTurn>> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One Gemini conversation: fixed options plus the turns exchanged so far
struct GeminiSession {
    client: Client,
    url: String,
    api_key: String,
    options: SessionOptions,
    history: History,
}

impl GeminiSession {
    fn build_request(&self, text: &str) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = lock_history(&self.history)
            .iter()
            .map(GeminiContent::from_turn)
            .collect();
        contents.push(GeminiContent::text(Some("user"), text));

        let system_instruction = if self.options.system_instruction.trim().is_empty() {
            None
        } else {
            Some(GeminiContent::text(None, &self.options.system_instruction))
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(self.options.temperature),
                max_output_tokens: None,
            }),
        }
    }
}

#[async_trait]
impl UpstreamSession for GeminiSession {
    async fn send_message_stream(&mut self, text: &str) -> Result<FragmentStream, LlmError> {
        let request = self.build_request(text);

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() || e.is_request() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed();

        Ok(fragment_stream(
            body,
            PendingTurn {
                user_text: text.to_string(),
                history: Arc::clone(&self.history),
            },
        ))
    }
}

fn error_from_body(status: u16, body: &str) -> LlmError {
    match serde_json::from_str::<GeminiErrorResponse>(body) {
        Ok(error_resp) => LlmError::from_status(
            status,
            format!("HTTP {status}: {}", error_resp.error.message),
        ),
        Err(_) => LlmError::from_status(status, format!("HTTP {status} error: {body}")),
    }
}

/// A user message whose reply is still streaming. Recorded into the
/// session history only if the stream ends cleanly.
struct PendingTurn {
    user_text: String,
    history: History,
}

impl PendingTurn {
    fn commit(self, reply: &str) {
        if reply.is_empty() {
            return;
        }
        let mut history = lock_history(&self.history);
        history.push(ChatTurn::user(self.user_text));
        history.push(ChatTurn::assistant(reply));
    }
}

struct StreamState {
    body: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: SseDecoder,
    ready: VecDeque<Result<String, LlmError>>,
    reply: String,
    turn: Option<PendingTurn>,
    finished: bool,
}

impl StreamState {
    fn accept(&mut self, events: Vec<String>) {
        for event in events {
            if self.finished {
                return;
            }
            match parse_event(&event) {
                Ok(Some(text)) => {
                    self.reply.push_str(&text);
                    self.ready.push_back(Ok(text));
                }
                Ok(None) => {}
                Err(e) => self.fail(e),
            }
        }
    }

    fn fail(&mut self, error: LlmError) {
        self.ready.push_back(Err(error));
        self.turn = None;
        self.finished = true;
    }

    fn complete(&mut self) {
        if let Some(turn) = self.turn.take() {
            turn.commit(&self.reply);
        }
        self.finished = true;
    }
}

fn fragment_stream(
    body: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    turn: PendingTurn,
) -> FragmentStream {
    let state = StreamState {
        body,
        decoder: SseDecoder::new(),
        ready: VecDeque::new(),
        reply: String::new(),
        turn: Some(turn),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.ready.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }
            match state.body.next().await {
                Some(Ok(bytes)) => {
                    let events = state.decoder.push(&bytes);
                    state.accept(events);
                }
                Some(Err(e)) => {
                    state.fail(LlmError::network(format!(
                        "Failed to read response stream: {e}"
                    )));
                }
                None => {
                    let events = state.decoder.finish();
                    state.accept(events);
                    if !state.finished {
                        state.complete();
                    }
                }
            }
        }
    })
    .boxed()
}

/// Text carried by one streamed chunk, if any.
fn parse_event(data: &str) -> Result<Option<String>, LlmError> {
    let chunk: GeminiStreamChunk = serde_json::from_str(data).map_err(|e| {
        LlmError::unknown(format!("Failed to parse stream chunk: {e} - data: {data}"))
    })?;

    if let Some(error) = chunk.error {
        return Err(match error.code {
            Some(code) => LlmError::from_status(code, error.message),
            None => LlmError::upstream(None, error.message),
        });
    }

    let Some(candidate) = chunk.candidates.into_iter().next() else {
        if let Some(reason) = chunk.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::upstream(None, format!("Prompt blocked: {reason}")));
        }
        return Ok(None);
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            tracing::warn!(finish_reason = %reason, "Gemini reply ended early");
        }
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    Ok(if text.is_empty() { None } else { Some(text) })
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: text.to_string(),
                thought: false,
            }],
        }
    }

    fn from_turn(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        Self::text(Some(role), &turn.text)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    thought: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiStreamChunk {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
    code: Option<u16>,
}
