use serde::{Deserialize, Serialize};

/// Outcome of probing for the local OCR engine at startup.
///
/// It is resolved once, and stays the same for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OcrCapability {
    Available { engine: String, version: String },
    Unavailable { reason: String },
}

impl OcrCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, OcrCapability::Available { .. })
    }
}

/// The engine used to extract text, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionEngine {
    /// A vision-language model behind an HTTP API.
    Vision,
    /// The local tesseract binary.
    Tesseract,
    /// Canned data, when nothing else is available.
    Sample,
}

impl ExtractionEngine {
    /// Picks the best engine: the vision API when we have credentials for it,
    /// then the local OCR engine, then sample data.
    pub fn select(has_vision_credentials: bool, ocr: &OcrCapability) -> Self {
        if has_vision_credentials {
            ExtractionEngine::Vision
        } else if ocr.is_available() {
            ExtractionEngine::Tesseract
        } else {
            ExtractionEngine::Sample
        }
    }
}
