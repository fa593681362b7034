use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use lore_core::{Answer, Error, LanguageModel, ProviderConfig, Result};

/// Sampling temperature; zero keeps answers deterministic for a given
/// context.
const TEMPERATURE: f32 = 0.0;

/// Chat-completion client for OpenAI-compatible `/chat/completions`
/// endpoints.
pub struct OpenAiChatModel {
    /// HTTP client for API requests.
    client: Client,
    /// API key sent as a bearer token.
    api_key: String,
    /// Base URL of the API.
    base_url: String,
    /// Chat model identifier.
    model: String,
}

impl OpenAiChatModel {
    /// Creates a chat model from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available from config or the
    /// environment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self {
            client: Client::default(),
            api_key,
            base_url: config.base_url.clone(),
            model: config.chat_model.clone(),
        })
    }

    /// Sets the model to use for generation.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn complete(&self, prompt: &str) -> Result<Answer> {
        let start = Instant::now();

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(Error::Provider(format!(
                "chat API error {status}: {error_text}"
            )));
        }

        let payload: ChatResponse = response.json().await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if let Some(usage) = &payload.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                latency_ms,
                "chat completion finished"
            );
        }

        let text = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::InvalidResponse("no choices in chat response".to_owned()))?;

        Ok(Answer {
            text,
            model: self.model.clone(),
            latency_ms,
        })
    }
}

/// Request payload sent to the chat completion API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Chat model identifier.
    model: String,
    /// Conversation messages; a single rendered user prompt here.
    messages: Vec<ChatMessage>,
    /// Sampling temperature.
    temperature: f32,
}

/// A single chat message.
#[derive(Debug, Serialize)]
struct ChatMessage {
    /// Role of the message author.
    role: String,
    /// Textual content of the message.
    content: String,
}

/// Response payload returned by the chat completion API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Candidate completions.
    choices: Vec<ChatChoice>,
    /// Optional token accounting information.
    usage: Option<ChatUsage>,
}

/// A single completion choice.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// Message generated for the choice.
    message: ChatResponseMessage,
}

/// Response message containing the generated text.
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    /// Generated text content.
    content: String,
}

/// Token usage metrics for a completion.
#[derive(Debug, Deserialize)]
struct ChatUsage {
    /// Tokens in the prompt portion of the request.
    prompt_tokens: u64,
    /// Tokens produced in the completion.
    completion_tokens: u64,
}
