use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// In debug mode, error responses carry the full error chain.
    pub debug: bool,
    /// Maximum size of a request body, in bytes.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub body_limit: usize,
}

/// Settings for the vision-language API used for extraction and chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionSettings {
    /// Base URL of the API, the client appends `/v1/chat/completions`.
    pub server_url: String,
    /// Without a key, the vision API is not used at all.
    pub api_key: Option<String>,
    pub extraction_model: String,
    pub extraction_max_tokens: u32,
    pub chat_model: String,
    pub chat_max_tokens: u32,
    /// Request timeout, in seconds.
    pub timeout: u64,
}

impl VisionSettings {
    /// A copy safe to print or log.
    pub fn redacted(&self) -> Self {
        VisionSettings {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

/// Settings for the local OCR binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    pub command: String,
    /// Tesseract language codes, eg `eng+fra`.
    pub languages: String,
    /// Timeout for a single invocation, in seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub vision: VisionSettings,
    pub ocr: OcrSettings,
    pub mode: String,
}

impl Settings {
    pub fn redacted(&self) -> Self {
        Settings {
            vision: self.vision.redacted(),
            ..self.clone()
        }
    }
}
