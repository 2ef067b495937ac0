use async_trait::async_trait;
use common::err_context::{ErrorContext, ErrorContextExt};
use common::settings::VisionSettings;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ports::secondary::{
    AssistantError, ChatAssistant, ExtractionError, TextExtractor,
};
use crate::domain::{ImageDataUrl, Question};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

const EXTRACTION_PROMPT: &str = "Extract and transcribe all text from this screenshot. Format it clearly and preserve the layout as much as possible.";

const CHAT_SYSTEM_PROMPT: &str = "You are an assistant that helps analyze screenshots. The user has uploaded a screenshot with the following extracted text. Answer their questions about this content.";

/// Client of a vision-language model exposed through a chat completions API
/// (Mistral's, or any compatible one).
#[derive(Debug, Clone)]
pub struct VisionClient {
    http_client: Client,
    // Full URL of the chat completions endpoint.
    endpoint: String,
    api_key: Secret<String>,
    extraction_model: String,
    extraction_max_tokens: u32,
    chat_model: String,
    chat_max_tokens: u32,
}

#[derive(Debug)]
pub enum Error {
    Configuration {
        context: String,
    },
    Client {
        context: String,
        source: reqwest::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { context } => {
                write!(fmt, "Vision Client Configuration: {context}")
            }
            Error::Client { context, source } => {
                write!(fmt, "Vision Client: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<reqwest::Error>> for Error {
    fn from(err: ErrorContext<reqwest::Error>) -> Self {
        Error::Client {
            context: err.0,
            source: err.1,
        }
    }
}

impl VisionClient {
    pub fn new(settings: VisionSettings) -> Result<VisionClient, Error> {
        let VisionSettings {
            server_url,
            api_key,
            extraction_model,
            extraction_max_tokens,
            chat_model,
            chat_max_tokens,
            timeout,
        } = settings;

        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration {
                context: "Missing API key for the vision service".to_string(),
            })?;

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()
            .context("Could not build http client")?;

        Ok(VisionClient {
            http_client,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), COMPLETIONS_PATH),
            api_key: Secret::new(api_key),
            extraction_model,
            extraction_max_tokens,
            chat_model,
            chat_max_tokens,
        })
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .context("http client request to vision service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, model = request.model, "Vision service error");
            return Err(CompletionError::Response {
                context: format!("vision service responded with {status}"),
            });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .context("http client response from vision service")?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Response {
                context: "vision service response has no content".to_string(),
            })
    }
}

#[async_trait]
impl TextExtractor for VisionClient {
    async fn extract_text(&self, image: &ImageDataUrl) -> Result<String, ExtractionError> {
        let request = CompletionRequest {
            model: &self.extraction_model,
            messages: vec![Message {
                role: "user",
                content: Content::Parts(vec![
                    ContentPart::Text {
                        text: EXTRACTION_PROMPT,
                    },
                    ContentPart::ImageUrl {
                        image_url: image.as_ref(),
                    },
                ]),
            }],
            max_tokens: self.extraction_max_tokens,
        };
        self.complete(request).await.map_err(Into::into)
    }
}

#[async_trait]
impl ChatAssistant for VisionClient {
    async fn answer(&self, question: &Question, extracted_text: &str) -> Result<String, AssistantError> {
        let prompt = format!(
            "Here is the text extracted from my screenshot:\n\n{}\n\nMy question is: {}",
            extracted_text,
            question.as_ref()
        );
        let request = CompletionRequest {
            model: &self.chat_model,
            messages: vec![
                Message {
                    role: "system",
                    content: Content::Text(CHAT_SYSTEM_PROMPT),
                },
                Message {
                    role: "user",
                    content: Content::Text(&prompt),
                },
            ],
            max_tokens: self.chat_max_tokens,
        };
        self.complete(request).await.map_err(Into::into)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Content<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: &'a str },
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// Failures common to both ports, converted to each port's error.
enum CompletionError {
    Connection {
        context: String,
        source: reqwest::Error,
    },
    Response {
        context: String,
    },
}

impl From<ErrorContext<reqwest::Error>> for CompletionError {
    fn from(err: ErrorContext<reqwest::Error>) -> Self {
        CompletionError::Connection {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<CompletionError> for ExtractionError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Connection { context, source } => {
                ExtractionError::Connection { context, source }
            }
            CompletionError::Response { context } => ExtractionError::Response { context },
        }
    }
}

impl From<CompletionError> for AssistantError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Connection { context, source } => {
                AssistantError::Connection { context, source }
            }
            CompletionError::Response { context } => AssistantError::Response { context },
        }
    }
}
